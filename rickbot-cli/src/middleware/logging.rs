//! Logging middleware that traces node enter/exit around each node.run call.

use async_trait::async_trait;
use tracing::{debug, warn};

use rickbot::{AgentError, Next, NodeFuture, NodeMiddleware, TurnState};

/// Middleware that logs node enter/exit, the active role and the tool calls in flight.
///
/// Events go through `tracing` (stderr), so assistant replies on stdout stay clean.
pub struct LoggingMiddleware;

#[async_trait]
impl NodeMiddleware<TurnState> for LoggingMiddleware {
    async fn around_run(
        &self,
        node_id: &str,
        state: TurnState,
        inner: Box<dyn FnOnce(TurnState) -> NodeFuture<TurnState> + Send>,
    ) -> Result<(TurnState, Next), AgentError> {
        debug!(node = node_id, role = %state.active_role, "[node] enter");
        let result = inner(state).await;
        match &result {
            Ok((state, next)) => debug!(
                node = node_id,
                role = %state.active_role,
                tool_calls = state.tool_calls.len(),
                ?next,
                "[node] exit"
            ),
            Err(e) => warn!(node = node_id, error = %e, "[node] exit with error"),
        }
        result
    }
}
