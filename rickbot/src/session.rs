//! Explicit per-conversation state: history and display settings.
//!
//! A `Session` is created empty when a conversation starts, passed to every
//! turn, and dropped when the conversation ends. Nothing is held globally.

use serde::{Deserialize, Serialize};

use crate::handoff::{HandoffRunner, RunError};
use crate::message::Message;
use crate::state::ToolInvocation;

/// Display settings fixed at session start.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSettings {
    pub show_tool_execution: bool,
    pub show_reasoning_summary: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            show_tool_execution: true,
            show_reasoning_summary: true,
        }
    }
}

/// What one turn produced: the reply and the tools it invoked.
#[derive(Clone, Debug, PartialEq)]
pub struct TurnOutcome {
    pub reply: String,
    pub tool_invocations: Vec<ToolInvocation>,
}

impl TurnOutcome {
    /// Names of the invoked tools, in call order.
    pub fn tool_names(&self) -> Vec<&str> {
        self.tool_invocations.iter().map(|t| t.name.as_str()).collect()
    }
}

/// Conversation state for one user session.
#[derive(Clone, Debug, Default)]
pub struct Session {
    history: Vec<Message>,
    settings: SessionSettings,
}

impl Session {
    /// Starts a session with empty history.
    pub fn new(settings: SessionSettings) -> Self {
        Self {
            history: Vec::new(),
            settings,
        }
    }

    pub fn history(&self) -> &[Message] {
        &self.history
    }

    pub fn settings(&self) -> SessionSettings {
        self.settings
    }

    /// Runs one turn through `runner` and records the user utterance and reply.
    ///
    /// On error the history is left unchanged.
    pub async fn process_turn(
        &mut self,
        runner: &HandoffRunner,
        utterance: &str,
    ) -> Result<TurnOutcome, RunError> {
        let state = runner.invoke(&self.history, utterance).await?;
        let reply = state.last_assistant_reply().unwrap_or_default().to_string();
        self.history.push(Message::user(utterance));
        self.history.push(Message::assistant(reply.clone()));
        Ok(TurnOutcome {
            reply,
            tool_invocations: state.tool_log,
        })
    }
}

/// Whether the utterance asks for the evaluation run instead of a chat turn.
pub fn requests_evaluation(utterance: &str) -> bool {
    utterance.to_lowercase().contains("evaluation")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::handoff::KeywordClassifier;
    use crate::llm::MockLlm;
    use crate::tool_source::MockToolSource;

    #[test]
    fn new_session_has_empty_history_and_fixed_settings() {
        let s = Session::new(SessionSettings::default());
        assert!(s.history().is_empty());
        assert!(s.settings().show_tool_execution);
        assert!(s.settings().show_reasoning_summary);
    }

    /// **Scenario**: each turn appends the utterance and reply; the next turn sees them.
    #[tokio::test]
    async fn process_turn_records_history() {
        let triage = Arc::new(MockLlm::with_no_tool_calls("Hi there"));
        let runner = HandoffRunner::new(
            triage.clone(),
            Arc::new(MockLlm::with_no_tool_calls("unused")),
            Arc::new(KeywordClassifier::default()),
            Arc::new(MockToolSource::default()),
        )
        .unwrap();
        let mut session = Session::new(SessionSettings::default());
        let out = session.process_turn(&runner, "hello").await.unwrap();
        assert_eq!(out.reply, "Hi there");
        assert!(out.tool_invocations.is_empty());
        session.process_turn(&runner, "hello again").await.unwrap();
        assert_eq!(session.history().len(), 4);
        let second_call = &triage.seen()[1];
        assert!(second_call.contains(&Message::assistant("Hi there")));
    }

    #[test]
    fn evaluation_keyword_is_case_insensitive() {
        assert!(requests_evaluation("Run Evaluation"));
        assert!(!requests_evaluation("evaluate this"));
    }
}
