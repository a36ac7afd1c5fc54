//! Tool sources: named, structured-argument operations the agent runtime can call.
//!
//! A [`ToolSource`] lists [`ToolSpec`]s (handed to the LLM) and executes calls by
//! name. [`StorageToolSource`] exposes the Entity Store as `read_from_storage`
//! and `write_to_storage`; [`MockToolSource`] returns canned text for tests.

mod mock;
mod storage_tool_source;

pub use mock::MockToolSource;
pub use storage_tool_source::{StorageToolSource, TOOL_READ_FROM_STORAGE, TOOL_WRITE_TO_STORAGE};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::store::StoreError;

/// Tool description handed to the LLM: name, prose description, JSON schema for arguments.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: Option<String>,
    pub input_schema: Value,
}

/// Text result of one tool call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolCallContent {
    pub text: String,
}

/// Tool execution error.
#[derive(Debug, Error)]
pub enum ToolSourceError {
    /// No tool with this name.
    #[error("tool not found: {0}")]
    NotFound(String),
    /// Arguments missing or malformed.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Remote call failed.
    #[error("transport error: {0}")]
    Transport(String),
    /// The Entity Store rejected the operation.
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}

/// A set of tools the agent runtime can list and call by name.
///
/// **Interaction**: `ActNode` calls `call_tool` for each LLM tool call; the
/// runner builder passes `list_tools()` to the storage role's LLM.
#[async_trait]
pub trait ToolSource: Send + Sync {
    async fn list_tools(&self) -> Result<Vec<ToolSpec>, ToolSourceError>;

    async fn call_tool(&self, name: &str, arguments: Value) -> Result<ToolCallContent, ToolSourceError>;
}
