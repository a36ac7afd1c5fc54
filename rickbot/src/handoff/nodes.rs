//! Triage-role nodes: the entry decision and the final composed reply.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::llm::LlmClient;
use crate::message::{with_role_prompt, Message};
use crate::state::{Role, TurnState};

use super::classifier::{IntentClassifier, Route};
use super::prompts::TRIAGE_INSTRUCTIONS;

fn last_user_utterance(messages: &[Message]) -> Option<&str> {
    messages.iter().rev().find_map(|m| match m {
        Message::User(s) => Some(s.as_str()),
        _ => None,
    })
}

/// Entry node: classifies the utterance and either answers or hands off.
///
/// Returns `Next::End` after a direct answer and `Next::Continue` (into the
/// storage loop) on hand-off.
pub struct TriageNode {
    classifier: Arc<dyn IntentClassifier>,
    llm: Arc<dyn LlmClient>,
}

impl TriageNode {
    pub fn new(classifier: Arc<dyn IntentClassifier>, llm: Arc<dyn LlmClient>) -> Self {
        Self { classifier, llm }
    }
}

#[async_trait]
impl Node<TurnState> for TriageNode {
    fn id(&self) -> &str {
        "triage"
    }

    async fn run(&self, state: TurnState) -> Result<(TurnState, Next), AgentError> {
        let utterance = last_user_utterance(&state.messages).ok_or_else(|| {
            AgentError::ExecutionFailed("turn has no user message".to_string())
        })?;
        match self.classifier.classify(utterance).await? {
            Route::Storage => {
                info!("handing off to storage");
                Ok((
                    TurnState {
                        active_role: Role::Storage,
                        ..state
                    },
                    Next::Continue,
                ))
            }
            Route::Triage => {
                let response = self
                    .llm
                    .invoke(&with_role_prompt(TRIAGE_INSTRUCTIONS, &state.messages))
                    .await?;
                debug!("triage answered directly");
                let mut messages = state.messages;
                messages.push(Message::Assistant(response.content));
                Ok((
                    TurnState {
                        messages,
                        active_role: Role::Triage,
                        ..state
                    },
                    Next::End,
                ))
            }
        }
    }
}

/// Final node: the triage role writes the reply from the storage results.
///
/// Falls back to the storage role's last reply when the model returns no text.
pub struct ComposeNode {
    llm: Arc<dyn LlmClient>,
}

impl ComposeNode {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl Node<TurnState> for ComposeNode {
    fn id(&self) -> &str {
        "compose"
    }

    async fn run(&self, state: TurnState) -> Result<(TurnState, Next), AgentError> {
        let response = self
            .llm
            .invoke(&with_role_prompt(TRIAGE_INSTRUCTIONS, &state.messages))
            .await?;
        let reply = if response.content.trim().is_empty() {
            state.last_assistant_reply().unwrap_or_default().to_string()
        } else {
            response.content
        };
        let mut messages = state.messages;
        messages.push(Message::Assistant(reply));
        Ok((
            TurnState {
                messages,
                tool_calls: Vec::new(),
                active_role: Role::Triage,
                ..state
            },
            Next::Continue,
        ))
    }
}
