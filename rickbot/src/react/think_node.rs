//! Think node: prompt the role's LLM with the conversation, record its reply and tool calls.
//!
//! ThinkNode holds an LLM client (e.g. MockLlm or `ChatOpenAI` bound to the
//! storage tools), implements `Node<TurnState>`; run calls the LLM with the
//! role's system prompt in front of `state.messages`, appends one assistant
//! message and sets `state.tool_calls` from the response (empty when done).

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::llm::LlmClient;
use crate::message::{with_role_prompt, Message};
use crate::state::{Role, TurnState};

/// Think node: one ReAct step that produces an assistant message and optional tool_calls.
///
/// **Interaction**: Implements `Node<TurnState>`; used by `HandoffRunner` as
/// `storage_think`. Sets `state.active_role` so `ActNode` attributes tool calls
/// to this role.
pub struct ThinkNode {
    id: String,
    llm: Arc<dyn LlmClient>,
    system_prompt: Option<String>,
    role: Role,
}

impl ThinkNode {
    /// Creates a Think node with id `"think"`, no system prompt, acting as Storage.
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self {
            id: "think".to_string(),
            llm,
            system_prompt: None,
            role: Role::Storage,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// System prompt placed in front of the conversation on every call.
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }
}

#[async_trait]
impl Node<TurnState> for ThinkNode {
    fn id(&self) -> &str {
        &self.id
    }

    /// Calls the LLM, appends its reply and sets tool_calls. Returns Next::Continue.
    async fn run(&self, state: TurnState) -> Result<(TurnState, Next), AgentError> {
        let response = match &self.system_prompt {
            Some(prompt) => {
                self.llm
                    .invoke(&with_role_prompt(prompt, &state.messages))
                    .await?
            }
            None => self.llm.invoke(&state.messages).await?,
        };
        debug!(
            node = %self.id,
            tool_calls = response.tool_calls.len(),
            "think step"
        );
        let mut messages = state.messages;
        messages.push(Message::Assistant(response.content));
        let new_state = TurnState {
            messages,
            tool_calls: response.tool_calls,
            active_role: self.role,
            ..state
        };
        Ok((new_state, Next::Continue))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MockLlm;
    use serde_json::json;

    /// **Scenario**: the system prompt is prepended and the reply plus tool calls land in state.
    #[tokio::test]
    async fn think_prepends_prompt_and_records_tool_calls() {
        let llm = Arc::new(MockLlm::new(vec![MockLlm::tool_call_response(
            "read_from_storage",
            json!({ "type": "location", "entity": "Earth" }),
        )]));
        let node = ThinkNode::new(llm.clone())
            .with_id("storage_think")
            .with_system_prompt("storage prompt");
        let state = TurnState {
            messages: vec![Message::user("who lives on Earth?")],
            ..Default::default()
        };
        let (out, next) = node.run(state).await.unwrap();
        assert_eq!(next, Next::Continue);
        assert_eq!(out.active_role, Role::Storage);
        assert_eq!(out.tool_calls.len(), 1);
        assert_eq!(out.messages.len(), 2);
        let seen = llm.seen();
        assert_eq!(seen[0][0], Message::system("storage prompt"));
        assert_eq!(node.id(), "storage_think");
    }
}
