//! State graph: nodes + explicit edges (from → to).
//!
//! Add nodes with `add_node`, define the chain with `add_edge(from, to)` using
//! `START` and `END` for graph entry/exit, then `compile` to get a
//! `CompiledStateGraph`. Loops are expressed at run time by nodes returning
//! `Next::Node(id)`, not by edges.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::graph::compile_error::CompilationError;
use crate::graph::compiled::CompiledStateGraph;
use crate::graph::node::Node;
use crate::graph::node_middleware::NodeMiddleware;

/// Sentinel for graph entry: use as `from_id` in `add_edge(START, first_node_id)`.
pub const START: &str = "__start__";

/// Sentinel for graph exit: use as `to_id` in `add_edge(last_node_id, END)`.
pub const END: &str = "__end__";

/// State graph: nodes plus explicit edges forming one linear chain.
///
/// Generic over state type `S`. Build with `add_node` / `add_edge`, optionally
/// attach middleware with `with_middleware`, then `compile()`.
pub struct StateGraph<S> {
    nodes: HashMap<String, Arc<dyn Node<S>>>,
    /// Edges (from_id, to_id). Compiled graph derives linear execution order from these.
    edges: Vec<(String, String)>,
    middleware: Option<Arc<dyn NodeMiddleware<S>>>,
}

impl<S> Default for StateGraph<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S> StateGraph<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            edges: Vec::new(),
            middleware: None,
        }
    }

    /// Adds a node; replaces any node registered under the same id.
    pub fn add_node(&mut self, id: impl Into<String>, node: Arc<dyn Node<S>>) -> &mut Self {
        self.nodes.insert(id.into(), node);
        self
    }

    /// Adds an edge from `from_id` to `to_id`. Use `START` / `END` for entry and exit.
    pub fn add_edge(&mut self, from_id: impl Into<String>, to_id: impl Into<String>) -> &mut Self {
        self.edges.push((from_id.into(), to_id.into()));
        self
    }

    /// Attaches middleware that wraps every node run of the compiled graph.
    pub fn with_middleware(self, middleware: Arc<dyn NodeMiddleware<S>>) -> Self {
        Self {
            middleware: Some(middleware),
            ..self
        }
    }

    /// Builds the executable graph.
    ///
    /// Returns `CompilationError` if any edge references an unknown node or the
    /// edges do not form a single chain from START to END.
    pub fn compile(self) -> Result<CompiledStateGraph<S>, CompilationError> {
        for (from, to) in &self.edges {
            if from != START && !self.nodes.contains_key(from) {
                return Err(CompilationError::NodeNotFound(from.clone()));
            }
            if to != END && !self.nodes.contains_key(to) {
                return Err(CompilationError::NodeNotFound(to.clone()));
            }
        }

        let first = match self
            .edges
            .iter()
            .filter(|(f, _)| f == START)
            .map(|(_, t)| t.clone())
            .collect::<Vec<_>>()
            .as_slice()
        {
            [only] => only.clone(),
            _ => return Err(CompilationError::MissingStart),
        };

        let expected_last = match self
            .edges
            .iter()
            .filter(|(_, t)| t == END)
            .map(|(f, _)| f.clone())
            .collect::<Vec<_>>()
            .as_slice()
        {
            [only] => only.clone(),
            _ => return Err(CompilationError::MissingEnd),
        };

        let froms: Vec<&String> = self
            .edges
            .iter()
            .filter(|(f, _)| f != START)
            .map(|(f, _)| f)
            .collect();
        let tos: Vec<&String> = self
            .edges
            .iter()
            .filter(|(_, t)| t != END)
            .map(|(_, t)| t)
            .collect();
        if froms.iter().collect::<HashSet<_>>().len() != froms.len() {
            return Err(CompilationError::InvalidChain("duplicate from (branch)".into()));
        }
        if tos.iter().collect::<HashSet<_>>().len() != tos.len() {
            return Err(CompilationError::InvalidChain(
                "duplicate to (merge or branch)".into(),
            ));
        }

        let next_map: HashMap<&str, &str> = self
            .edges
            .iter()
            .filter(|(f, _)| f != START)
            .map(|(f, t)| (f.as_str(), t.as_str()))
            .collect();

        let mut edge_order = vec![first.clone()];
        let mut visited = HashSet::from([first.clone()]);
        let mut current = first;
        let mut reached_end = false;
        while let Some(&next) = next_map.get(current.as_str()) {
            if next == END {
                if current != expected_last {
                    return Err(CompilationError::InvalidChain(
                        "chain tail does not match the single edge to END".into(),
                    ));
                }
                reached_end = true;
                break;
            }
            if !visited.insert(next.to_string()) {
                return Err(CompilationError::InvalidChain("cycle detected".into()));
            }
            edge_order.push(next.to_string());
            current = next.to_string();
        }
        if !reached_end {
            return Err(CompilationError::InvalidChain("chain does not reach END".into()));
        }
        if edge_order.len() + 1 != self.edges.len() {
            return Err(CompilationError::InvalidChain("disconnected edges".into()));
        }

        Ok(CompiledStateGraph {
            nodes: self.nodes,
            edge_order,
            middleware: self.middleware,
        })
    }
}
