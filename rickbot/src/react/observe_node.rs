//! Observe node: feed tool results back to the conversation and decide whether to loop.
//!
//! After act, each `ToolResult` becomes a user message so the next think step
//! can read it. When tools were called and the cap is not reached, jump back to
//! the think node; otherwise continue along the chain.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::message::Message;
use crate::state::TurnState;

/// Think/act/observe rounds allowed per turn before the loop is cut.
pub const DEFAULT_MAX_TURNS: u32 = 10;

/// Observe node: appends tool results as messages and routes the ReAct loop.
///
/// **Interaction**: Implements `Node<TurnState>`; used by `HandoffRunner` as
/// `storage_observe`, looping to `storage_think`.
pub struct ObserveNode {
    id: String,
    think_node_id: String,
    max_turns: u32,
}

impl ObserveNode {
    /// Creates an Observe node with id `"observe"` that loops to `think_node_id`.
    pub fn new(think_node_id: impl Into<String>) -> Self {
        Self {
            id: "observe".to_string(),
            think_node_id: think_node_id.into(),
            max_turns: DEFAULT_MAX_TURNS,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }
}

#[async_trait]
impl Node<TurnState> for ObserveNode {
    fn id(&self) -> &str {
        &self.id
    }

    async fn run(&self, state: TurnState) -> Result<(TurnState, Next), AgentError> {
        if state.tool_calls.is_empty() {
            return Ok((state, Next::Continue));
        }

        let mut messages = state.messages;
        for result in &state.tool_results {
            let name = result.name.as_deref().unwrap_or("tool");
            messages.push(Message::User(format!(
                "Tool {} returned: {}",
                name, result.content
            )));
        }
        let turn_count = state.turn_count + 1;
        let next = if turn_count >= self.max_turns {
            warn!(turns = turn_count, "tool loop reached turn cap");
            Next::Continue
        } else {
            Next::Node(self.think_node_id.clone())
        };
        debug!(node = %self.id, turn_count, ?next, "observe step");

        let new_state = TurnState {
            messages,
            tool_calls: Vec::new(),
            tool_results: Vec::new(),
            turn_count,
            ..state
        };
        Ok((new_state, next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ToolCall, ToolResult};

    fn pending_state(turn_count: u32) -> TurnState {
        TurnState {
            tool_calls: vec![ToolCall {
                name: "read_from_storage".into(),
                arguments: "{}".into(),
                id: None,
            }],
            tool_results: vec![ToolResult {
                call_id: None,
                name: Some("read_from_storage".into()),
                content: "[]".into(),
            }],
            turn_count,
            ..Default::default()
        }
    }

    /// **Scenario**: results become user messages and the loop returns to think.
    #[tokio::test]
    async fn observe_loops_back_while_tools_are_called() {
        let node = ObserveNode::new("storage_think");
        let (out, next) = node.run(pending_state(0)).await.unwrap();
        assert_eq!(next, Next::Node("storage_think".into()));
        assert_eq!(out.turn_count, 1);
        assert!(out.tool_calls.is_empty());
        assert_eq!(
            out.messages,
            vec![Message::user("Tool read_from_storage returned: []")]
        );
    }

    /// **Scenario**: no tool calls means the loop is done.
    #[tokio::test]
    async fn observe_continues_when_no_tool_calls() {
        let node = ObserveNode::new("storage_think");
        let (out, next) = node.run(TurnState::default()).await.unwrap();
        assert_eq!(next, Next::Continue);
        assert_eq!(out.turn_count, 0);
    }

    /// **Scenario**: reaching the cap continues along the chain instead of looping.
    #[tokio::test]
    async fn observe_stops_at_turn_cap() {
        let node = ObserveNode::new("storage_think").with_max_turns(2);
        let (_, next) = node.run(pending_state(1)).await.unwrap();
        assert_eq!(next, Next::Continue);
    }
}
