//! Extension trait for fluent API: attach node logging to the hand-off options.
//!
//! Interacts with [`HandoffOptions`](rickbot::HandoffOptions) and
//! [`LoggingMiddleware`](super::logging::LoggingMiddleware).

use std::sync::Arc;

use rickbot::HandoffOptions;

use super::logging::LoggingMiddleware;

/// Attach `LoggingMiddleware` before building the runner.
pub trait WithNodeLogging {
    fn with_node_logging(self) -> Self;
}

impl WithNodeLogging for HandoffOptions {
    fn with_node_logging(self) -> Self {
        Self {
            middleware: Some(Arc::new(LoggingMiddleware)),
            ..self
        }
    }
}
