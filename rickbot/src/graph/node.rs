//! Node trait: one step of a state graph.

use async_trait::async_trait;

use crate::error::AgentError;

use super::Next;

/// One graph step: receives the state, returns the updated state and where to go next.
///
/// **Interaction**: Registered with `StateGraph::add_node` as `Arc<dyn Node<S>>`;
/// called by `CompiledStateGraph::invoke`, optionally wrapped by a `NodeMiddleware`.
#[async_trait]
pub trait Node<S>: Send + Sync
where
    S: Clone + Send + Sync + 'static,
{
    /// Stable id used in logs.
    fn id(&self) -> &str;

    async fn run(&self, state: S) -> Result<(S, Next), AgentError>;
}
