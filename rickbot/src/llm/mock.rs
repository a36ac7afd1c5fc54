//! Scripted LLM for tests and offline runs.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::AgentError;
use crate::message::Message;
use crate::state::ToolCall;

use super::{LlmClient, LlmResponse};

/// Mock LLM: returns scripted responses in order, repeating the last one when exhausted.
///
/// Records every message list it receives so tests can assert on prompts.
pub struct MockLlm {
    responses: Mutex<VecDeque<LlmResponse>>,
    last: Mutex<Option<LlmResponse>>,
    seen: Mutex<Vec<Vec<Message>>>,
}

impl MockLlm {
    /// Creates a mock that plays `responses` in order.
    pub fn new(responses: Vec<LlmResponse>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            last: Mutex::new(None),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// A mock that always answers with `content` and never calls tools.
    pub fn with_no_tool_calls(content: impl Into<String>) -> Self {
        Self::new(vec![LlmResponse {
            content: content.into(),
            tool_calls: vec![],
        }])
    }

    /// A mock that first calls `tool` with `arguments`, then answers with `final_answer`.
    pub fn with_tool_call(tool: &str, arguments: Value, final_answer: impl Into<String>) -> Self {
        Self::new(vec![
            Self::tool_call_response(tool, arguments),
            LlmResponse {
                content: final_answer.into(),
                tool_calls: vec![],
            },
        ])
    }

    /// Builds a response with one tool call and no text.
    pub fn tool_call_response(tool: &str, arguments: Value) -> LlmResponse {
        LlmResponse {
            content: String::new(),
            tool_calls: vec![ToolCall {
                name: tool.to_string(),
                arguments: arguments.to_string(),
                id: Some(format!("call_{}", tool)),
            }],
        }
    }

    /// Message lists passed to `invoke`, oldest first.
    pub fn seen(&self) -> Vec<Vec<Message>> {
        self.seen.lock().map(|g| g.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn invoke(&self, messages: &[Message]) -> Result<LlmResponse, AgentError> {
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(messages.to_vec());
        }
        let mut queue = self
            .responses
            .lock()
            .map_err(|e| AgentError::ExecutionFailed(e.to_string()))?;
        let mut last = self
            .last
            .lock()
            .map_err(|e| AgentError::ExecutionFailed(e.to_string()))?;
        match queue.pop_front() {
            Some(next) => {
                *last = Some(next.clone());
                Ok(next)
            }
            None => last
                .clone()
                .ok_or_else(|| AgentError::ExecutionFailed("mock llm has no responses".into())),
        }
    }
}
