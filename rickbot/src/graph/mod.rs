//! State graph: nodes + linear edges, compile and invoke.
//!
//! Add nodes and edges, compile, then invoke with state. Nodes steer execution
//! with [`Next`]: continue along the chain, jump to a node id (loops), or end.
//! The triage/storage hand-off in [`crate::handoff`] is one such graph.

mod compile_error;
mod compiled;
pub(crate) mod logging;
mod next;
mod node;
mod node_middleware;
mod state_graph;

pub use compile_error::CompilationError;
pub use compiled::CompiledStateGraph;
pub use next::Next;
pub use node::Node;
pub use node_middleware::{NodeFuture, NodeMiddleware};
pub use state_graph::{StateGraph, END, START};
