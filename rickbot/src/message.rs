//! Conversation messages exchanged between the user, the roles and the LLM.

use serde::{Deserialize, Serialize};

/// One message in a conversation.
///
/// Tool output is fed back to the LLM as a `User` message by `ObserveNode`,
/// so three variants are enough for every `LlmClient`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", content = "content", rename_all = "lowercase")]
pub enum Message {
    System(String),
    User(String),
    Assistant(String),
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self::System(content.into())
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::User(content.into())
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::Assistant(content.into())
    }

    /// Text content regardless of role.
    pub fn content(&self) -> &str {
        match self {
            Self::System(s) | Self::User(s) | Self::Assistant(s) => s,
        }
    }
}

/// Returns `messages` with every system message dropped and `prompt` placed first.
///
/// Each role sees the shared conversation under its own instructions; the triage
/// and storage roles call this before invoking their LLM.
pub fn with_role_prompt(prompt: &str, messages: &[Message]) -> Vec<Message> {
    let mut out = Vec::with_capacity(messages.len() + 1);
    out.push(Message::system(prompt));
    out.extend(
        messages
            .iter()
            .filter(|m| !matches!(m, Message::System(_)))
            .cloned(),
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: with_role_prompt replaces existing system messages with the role prompt.
    #[test]
    fn with_role_prompt_replaces_system_messages() {
        let messages = vec![
            Message::system("old"),
            Message::user("Who lives on Purge Planet?"),
            Message::assistant("Let me check."),
        ];
        let out = with_role_prompt("storage", &messages);
        assert_eq!(out.len(), 3);
        assert_eq!(out[0], Message::system("storage"));
        assert_eq!(out[1].content(), "Who lives on Purge Planet?");
    }

    /// **Scenario**: Messages serialize with a lowercase role tag.
    #[test]
    fn message_serializes_with_role_tag() {
        let v = serde_json::to_value(Message::user("hi")).unwrap();
        assert_eq!(v, serde_json::json!({"role": "user", "content": "hi"}));
    }
}
