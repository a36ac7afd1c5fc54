//! Compiled state graph: immutable, supports invoke only.
//!
//! Built by `StateGraph::compile`. Holds nodes, the edge order derived from the
//! explicit edges, and optional node middleware.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::AgentError;

use super::logging::{
    log_graph_complete, log_graph_error, log_graph_start, log_node_complete, log_node_start,
};
use super::node_middleware::{NodeFuture, NodeMiddleware};
use super::{Next, Node};

/// Upper bound on node runs per invoke; guards against nodes that jump in a loop forever.
const MAX_STEPS: usize = 256;

/// Compiled graph: immutable structure, supports invoke only.
///
/// Runs from the first node and uses each node's returned `Next` to choose
/// the next node.
#[derive(Clone)]
pub struct CompiledStateGraph<S> {
    pub(super) nodes: HashMap<String, Arc<dyn Node<S>>>,
    pub(super) edge_order: Vec<String>,
    pub(super) middleware: Option<Arc<dyn NodeMiddleware<S>>>,
}

impl<S> CompiledStateGraph<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// Runs the graph with the given state and returns the final state.
    ///
    /// - `Next::Continue`: run the next node in edge order, or end if last.
    /// - `Next::Node(id)`: run the node with that id next.
    /// - `Next::End`: stop and return current state.
    pub async fn invoke(&self, state: S) -> Result<S, AgentError> {
        let mut state = state;
        let mut current_id = self
            .edge_order
            .first()
            .cloned()
            .ok_or_else(|| AgentError::ExecutionFailed("empty graph".into()))?;

        log_graph_start(&current_id);
        for step in 1..=MAX_STEPS {
            let node = self
                .nodes
                .get(&current_id)
                .cloned()
                .ok_or_else(|| AgentError::ExecutionFailed(format!("unknown node: {}", current_id)))?;

            log_node_start(&current_id);
            let result = match &self.middleware {
                Some(middleware) => {
                    middleware
                        .around_run(
                            &current_id,
                            state,
                            Box::new(move |s: S| -> NodeFuture<S> {
                                Box::pin(async move { node.run(s).await })
                            }),
                        )
                        .await
                }
                None => node.run(state).await,
            };
            let (new_state, next) = match result {
                Ok(out) => out,
                Err(e) => {
                    log_graph_error(&current_id, &e);
                    return Err(e);
                }
            };
            log_node_complete(&current_id, &next);
            state = new_state;

            match next {
                Next::End => {
                    log_graph_complete(step);
                    return Ok(state);
                }
                Next::Node(id) => current_id = id,
                Next::Continue => {
                    let pos = self
                        .edge_order
                        .iter()
                        .position(|x| *x == current_id)
                        .ok_or_else(|| {
                            AgentError::ExecutionFailed(format!(
                                "node {} is not on the edge chain",
                                current_id
                            ))
                        })?;
                    match self.edge_order.get(pos + 1) {
                        Some(id) => current_id = id.clone(),
                        None => {
                            log_graph_complete(step);
                            return Ok(state);
                        }
                    }
                }
            }
        }

        Err(AgentError::ExecutionFailed(format!(
            "graph exceeded {} steps",
            MAX_STEPS
        )))
    }

    /// Node ids in linear edge order.
    pub fn edge_order(&self) -> &[String] {
        &self.edge_order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;

    use async_trait::async_trait;

    use crate::graph::{Next, Node, StateGraph, END, START};

    /// **Scenario**: When edge_order is empty, invoke returns ExecutionFailed("empty graph").
    #[tokio::test]
    async fn invoke_empty_graph_returns_execution_failed() {
        let graph = CompiledStateGraph::<i32> {
            nodes: HashMap::new(),
            edge_order: vec![],
            middleware: None,
        };
        match graph.invoke(0).await {
            Err(AgentError::ExecutionFailed(msg)) => assert!(msg.contains("empty graph"), "{}", msg),
            other => panic!("expected ExecutionFailed(\"empty graph\"), got {:?}", other),
        }
    }

    #[derive(Clone)]
    struct AddNode {
        id: &'static str,
        delta: i32,
        next: Next,
    }

    impl AddNode {
        fn cont(id: &'static str, delta: i32) -> Self {
            Self {
                id,
                delta,
                next: Next::Continue,
            }
        }
    }

    #[async_trait]
    impl Node<i32> for AddNode {
        fn id(&self) -> &str {
            self.id
        }

        async fn run(&self, state: i32) -> Result<(i32, Next), AgentError> {
            Ok((state + self.delta, self.next.clone()))
        }
    }

    /// Jumps back to "first" until the state reaches 3, then continues.
    struct LoopUntilThree;

    #[async_trait]
    impl Node<i32> for LoopUntilThree {
        fn id(&self) -> &str {
            "check"
        }

        async fn run(&self, state: i32) -> Result<(i32, Next), AgentError> {
            if state < 3 {
                Ok((state, Next::Node("first".into())))
            } else {
                Ok((state, Next::Continue))
            }
        }
    }

    fn chain(nodes: Vec<AddNode>) -> CompiledStateGraph<i32> {
        let mut graph = StateGraph::<i32>::new();
        let mut prev = START.to_string();
        for n in nodes {
            let id = n.id;
            graph.add_node(id, Arc::new(n));
            graph.add_edge(prev.clone(), id);
            prev = id.to_string();
        }
        graph.add_edge(prev, END);
        graph.compile().expect("graph compiles")
    }

    /// **Scenario**: Continue runs every node in edge order.
    #[tokio::test]
    async fn invoke_runs_nodes_in_edge_order() {
        let graph = chain(vec![AddNode::cont("first", 1), AddNode::cont("second", 2)]);
        assert_eq!(graph.edge_order(), &["first".to_string(), "second".to_string()]);
        assert_eq!(graph.invoke(0).await.unwrap(), 3);
    }

    /// **Scenario**: Next::End stops before the remaining nodes.
    #[tokio::test]
    async fn invoke_next_end_stops_early() {
        let graph = chain(vec![
            AddNode {
                id: "first",
                delta: 5,
                next: Next::End,
            },
            AddNode::cont("second", 100),
        ]);
        assert_eq!(graph.invoke(0).await.unwrap(), 5);
    }

    /// **Scenario**: Next::Node jumps backwards to form a loop.
    #[tokio::test]
    async fn invoke_next_node_loops_back() {
        let mut graph = StateGraph::<i32>::new();
        graph
            .add_node("first", Arc::new(AddNode::cont("first", 1)))
            .add_node("check", Arc::new(LoopUntilThree))
            .add_node("last", Arc::new(AddNode::cont("last", 10)))
            .add_edge(START, "first")
            .add_edge("first", "check")
            .add_edge("check", "last")
            .add_edge("last", END);
        let compiled = graph.compile().unwrap();
        assert_eq!(compiled.invoke(0).await.unwrap(), 13);
    }

    /// **Scenario**: Next::Node to an unknown id fails instead of panicking.
    #[tokio::test]
    async fn invoke_jump_to_unknown_node_fails() {
        let graph = chain(vec![AddNode {
            id: "first",
            delta: 1,
            next: Next::Node("missing".into()),
        }]);
        let err = graph.invoke(0).await.unwrap_err();
        assert!(err.to_string().contains("unknown node: missing"), "{}", err);
    }

    /// **Scenario**: A node that always jumps to itself hits the step cap.
    #[tokio::test]
    async fn invoke_endless_loop_hits_step_cap() {
        let graph = chain(vec![AddNode {
            id: "spin",
            delta: 0,
            next: Next::Node("spin".into()),
        }]);
        let err = graph.invoke(0).await.unwrap_err();
        assert!(err.to_string().contains("exceeded"), "{}", err);
    }
}
