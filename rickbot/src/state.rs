//! Per-turn state flowing through the hand-off graph.
//!
//! One `TurnState` is built for each user utterance; every node reads it and
//! returns an updated copy (state-in, state-out).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::message::Message;

/// Role currently in control of the turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Initial role: classifies the utterance and writes the final reply.
    #[default]
    Triage,
    /// Reached only by hand-off from Triage; owns the storage tools.
    Storage,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Triage => f.write_str("triage"),
            Role::Storage => f.write_str("storage"),
        }
    }
}

/// One tool call requested by the LLM.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Tool name, e.g. `read_from_storage`.
    pub name: String,
    /// Arguments as a JSON object string (as returned by the chat API).
    pub arguments: String,
    /// Provider call id, when the LLM supplies one.
    pub id: Option<String>,
}

/// Result of executing one `ToolCall`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResult {
    pub call_id: Option<String>,
    pub name: Option<String>,
    pub content: String,
}

/// A tool invocation attributed to the turn that caused it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToolInvocation {
    pub role: Role,
    pub name: String,
    pub arguments: Value,
}

/// State for one turn through triage → storage → compose.
#[derive(Clone, Debug, Default)]
pub struct TurnState {
    /// Conversation so far plus this turn's messages.
    pub messages: Vec<Message>,
    /// Tool calls from the latest think step; empty means the storage loop is done.
    pub tool_calls: Vec<ToolCall>,
    /// Results of the latest act step.
    pub tool_results: Vec<ToolResult>,
    /// Every tool invoked during this turn, in order.
    pub tool_log: Vec<ToolInvocation>,
    pub active_role: Role,
    /// Storage think/act/observe rounds completed.
    pub turn_count: u32,
}

impl TurnState {
    /// Content of the last assistant message, if any.
    pub fn last_assistant_reply(&self) -> Option<&str> {
        self.messages.iter().rev().find_map(|m| match m {
            Message::Assistant(s) => Some(s.as_str()),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_assistant_reply_returns_latest() {
        let state = TurnState {
            messages: vec![
                Message::user("q"),
                Message::assistant("first"),
                Message::user("tool output"),
                Message::assistant("second"),
            ],
            ..Default::default()
        };
        assert_eq!(state.last_assistant_reply(), Some("second"));
        assert_eq!(TurnState::default().last_assistant_reply(), None);
    }

    #[test]
    fn role_display_is_lowercase() {
        assert_eq!(Role::Triage.to_string(), "triage");
        assert_eq!(Role::Storage.to_string(), "storage");
    }
}
