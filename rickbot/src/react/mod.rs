//! ReAct nodes for the storage role: Think, Act, Observe.
//!
//! Three nodes implementing `Node<TurnState>` for the loop
//! storage_think → storage_act → storage_observe, where observe jumps back to
//! think while tools are still being called and the turn cap is not reached.

mod act_node;
mod observe_node;
mod think_node;

pub use act_node::{
    ActNode, ErrorHandlerFn, HandleToolErrors, DEFAULT_EXECUTION_ERROR_TEMPLATE,
};
pub use observe_node::{ObserveNode, DEFAULT_MAX_TURNS};
pub use think_node::ThinkNode;
