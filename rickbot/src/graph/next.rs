//! Routing decision returned by each node.

/// What the compiled graph runs after a node completes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Next {
    /// Follow the linear edge order; end the run after the last node.
    Continue,
    /// Jump to the node with this id (used for the storage think/act/observe loop).
    Node(String),
    /// Stop and return the current state.
    End,
}
