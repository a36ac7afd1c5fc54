//! Structured logging for graph execution.

use tracing::{debug, error, info};

use crate::error::AgentError;

use super::Next;

pub(crate) fn log_node_start(node_id: &str) {
    debug!(node_id, "Starting node execution");
}

pub(crate) fn log_node_complete(node_id: &str, next: &Next) {
    debug!(node_id, ?next, "Node execution complete");
}

pub(crate) fn log_graph_start(first_node: &str) {
    info!(first_node, "Starting graph execution");
}

pub(crate) fn log_graph_complete(steps: usize) {
    info!(steps, "Graph execution complete");
}

pub(crate) fn log_graph_error(node_id: &str, error: &AgentError) {
    error!(node_id, %error, "Graph execution error");
}
