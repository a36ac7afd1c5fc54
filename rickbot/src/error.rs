//! Agent execution error types.
//!
//! Returned by `Node::run` and surfaced by `HandoffRunner` when a turn fails.

use thiserror::Error;

/// Agent execution error.
///
/// Returned when a graph step fails: an LLM call, a tool call that was not
/// handled by `HandleToolErrors`, or a classifier failure. Tool and store
/// errors are flattened into the message so the agent runtime sees one error kind.
#[derive(Debug, Error)]
pub enum AgentError {
    /// Execution failed with a message (e.g. LLM call failed, tool error).
    #[error("execution failed: {0}")]
    ExecutionFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: Display format of ExecutionFailed contains "execution failed" and the message.
    #[test]
    fn agent_error_display_execution_failed() {
        let err = AgentError::ExecutionFailed("no record named Anatomy Park".to_string());
        let s = err.to_string();
        assert!(s.contains("execution failed"), "{}", s);
        assert!(s.contains("Anatomy Park"), "{}", s);
    }
}
