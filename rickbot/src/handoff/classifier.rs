//! Intent classification: decide whether a turn stays with Triage or goes to Storage.
//!
//! [`IntentClassifier`] is the seam between the hand-off graph and whatever
//! makes the decision. [`LlmClassifier`] asks the triage model, offering it a
//! single hand-off tool; [`KeywordClassifier`] is deterministic.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use crate::error::AgentError;
use crate::llm::LlmClient;
use crate::message::{with_role_prompt, Message};
use crate::tool_source::ToolSpec;

use super::prompts::{STORAGE_HANDOFF_DESCRIPTION, TRIAGE_INSTRUCTIONS};

/// Tool name the triage model calls to hand the turn to the storage role.
pub const HANDOFF_TOOL_NAME: &str = "transfer_to_storage_agent";

/// Where a user utterance is routed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    /// Triage answers directly.
    Triage,
    /// Hand off to the storage role.
    Storage,
}

/// Classifies one utterance.
#[async_trait]
pub trait IntentClassifier: Send + Sync {
    async fn classify(&self, utterance: &str) -> Result<Route, AgentError>;
}

/// Spec of the hand-off tool; bind it to the LLM used by [`LlmClassifier`].
pub fn handoff_tool_spec() -> ToolSpec {
    ToolSpec {
        name: HANDOFF_TOOL_NAME.to_string(),
        description: Some(STORAGE_HANDOFF_DESCRIPTION.to_string()),
        input_schema: json!({ "type": "object", "properties": {} }),
    }
}

/// Routes to Storage when the triage model calls [`HANDOFF_TOOL_NAME`].
///
/// The wrapped client must have [`handoff_tool_spec`] bound (e.g.
/// `ChatOpenAI::new(model).with_tools(vec![handoff_tool_spec()])`).
pub struct LlmClassifier {
    llm: Arc<dyn LlmClient>,
}

impl LlmClassifier {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl IntentClassifier for LlmClassifier {
    async fn classify(&self, utterance: &str) -> Result<Route, AgentError> {
        let messages = with_role_prompt(TRIAGE_INSTRUCTIONS, &[Message::user(utterance)]);
        let response = self.llm.invoke(&messages).await?;
        let route = if response
            .tool_calls
            .iter()
            .any(|tc| tc.name == HANDOFF_TOOL_NAME)
        {
            Route::Storage
        } else {
            Route::Triage
        };
        debug!(?route, "llm classifier");
        Ok(route)
    }
}

/// Words that mark an utterance as being about stored entities.
pub const DEFAULT_KEYWORDS: &[&str] = &[
    "character",
    "episode",
    "location",
    "planet",
    "dimension",
    "lives",
    "live on",
    "resident",
    "species",
    "air date",
    "aired",
    "store",
    "save",
    "remember",
    "note that",
];

/// Routes to Storage when the utterance contains any keyword (case-insensitive).
#[derive(Clone, Debug)]
pub struct KeywordClassifier {
    keywords: Vec<String>,
}

impl KeywordClassifier {
    pub fn new<I, K>(keywords: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.into().to_lowercase())
                .collect(),
        }
    }

    fn matches(&self, utterance: &str) -> bool {
        let lower = utterance.to_lowercase();
        self.keywords.iter().any(|k| lower.contains(k.as_str()))
    }
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_KEYWORDS.iter().copied())
    }
}

#[async_trait]
impl IntentClassifier for KeywordClassifier {
    async fn classify(&self, utterance: &str) -> Result<Route, AgentError> {
        Ok(if self.matches(utterance) {
            Route::Storage
        } else {
            Route::Triage
        })
    }
}
