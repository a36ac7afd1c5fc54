//! Mock ToolSource for graph tests: fixed tool list, canned results per tool name.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{ToolCallContent, ToolSource, ToolSourceError, ToolSpec};

/// Mock tool source: lists the configured tools and answers every call with a
/// canned text (per tool name, or a default). Records each call for assertions.
pub struct MockToolSource {
    tools: Vec<ToolSpec>,
    results: HashMap<String, String>,
    default_result: String,
    calls: Mutex<Vec<(String, Value)>>,
}

impl MockToolSource {
    /// Creates a mock with custom tool list and a default call result.
    pub fn new(tools: Vec<ToolSpec>, default_result: impl Into<String>) -> Self {
        Self {
            tools,
            results: HashMap::new(),
            default_result: default_result.into(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// A mock listing `read_from_storage` and `write_to_storage` that returns `[]`.
    pub fn storage_example() -> Self {
        let spec = |name: &str| ToolSpec {
            name: name.to_string(),
            description: None,
            input_schema: json!({ "type": "object", "properties": {} }),
        };
        Self::new(
            vec![spec(super::TOOL_READ_FROM_STORAGE), spec(super::TOOL_WRITE_TO_STORAGE)],
            "[]",
        )
    }

    /// Canned text returned for `name` (builder style).
    pub fn with_result(mut self, name: &str, text: impl Into<String>) -> Self {
        self.results.insert(name.to_string(), text.into());
        self
    }

    /// `(name, arguments)` of every call so far.
    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl Default for MockToolSource {
    fn default() -> Self {
        Self::storage_example()
    }
}

#[async_trait]
impl ToolSource for MockToolSource {
    async fn list_tools(&self) -> Result<Vec<ToolSpec>, ToolSourceError> {
        Ok(self.tools.clone())
    }

    async fn call_tool(&self, name: &str, arguments: Value) -> Result<ToolCallContent, ToolSourceError> {
        if !self.tools.iter().any(|t| t.name == name) {
            return Err(ToolSourceError::NotFound(name.to_string()));
        }
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((name.to_string(), arguments));
        }
        Ok(ToolCallContent {
            text: self
                .results
                .get(name)
                .cloned()
                .unwrap_or_else(|| self.default_result.clone()),
        })
    }
}
