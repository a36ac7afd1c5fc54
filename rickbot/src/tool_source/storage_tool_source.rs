//! Entity-store-backed tool source: `read_from_storage` and `write_to_storage`.
//!
//! Wraps an [`EntityStore`] and exposes its read and annotate operations as tools
//! for the storage role. Arguments are `type` (entity type, singular or plural),
//! `entity` (lookup key) and, for writes, `details`.

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{debug, trace};

use crate::entity::EntityType;
use crate::store::EntityStore;
use crate::tool_source::{ToolCallContent, ToolSource, ToolSourceError, ToolSpec};

/// Tool name: look up entity records in the local store.
pub const TOOL_READ_FROM_STORAGE: &str = "read_from_storage";
/// Tool name: attach a user-supplied detail to one stored entity.
pub const TOOL_WRITE_TO_STORAGE: &str = "write_to_storage";

fn read_from_storage_spec() -> ToolSpec {
    ToolSpec {
        name: TOOL_READ_FROM_STORAGE.to_string(),
        description: Some(
            "Read stored data about a character, episode or location. Call when the user asks \
             about a specific entity. Returns a JSON array of matching records (empty if none)."
                .to_string(),
        ),
        input_schema: json!({
            "type": "object",
            "properties": {
                "type": {
                    "type": "string",
                    "enum": ["character", "episode", "location"],
                    "description": "Entity type"
                },
                "entity": {
                    "type": "string",
                    "description": "Exact name (episodes also accept air date or episode code)"
                }
            },
            "required": ["type", "entity"]
        }),
    }
}

fn write_to_storage_spec() -> ToolSpec {
    ToolSpec {
        name: TOOL_WRITE_TO_STORAGE.to_string(),
        description: Some(
            "Store an extra detail about a character, episode or location. Call when the user \
             asks to save, note or remember something about a specific entity."
                .to_string(),
        ),
        input_schema: json!({
            "type": "object",
            "properties": {
                "type": {
                    "type": "string",
                    "enum": ["character", "episode", "location"],
                    "description": "Entity type"
                },
                "entity": { "type": "string", "description": "Exact entity name" },
                "details": { "type": "string", "description": "Detail to store" }
            },
            "required": ["type", "entity", "details"]
        }),
    }
}

fn str_arg<'a>(arguments: &'a Value, key: &str) -> Result<&'a str, ToolSourceError> {
    arguments
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| ToolSourceError::InvalidInput(format!("missing {}", key)))
}

fn entity_type_arg(arguments: &Value) -> Result<EntityType, ToolSourceError> {
    str_arg(arguments, "type")?
        .parse()
        .map_err(|e: crate::entity::ParseEntityTypeError| ToolSourceError::InvalidInput(e.to_string()))
}

/// Tool source over the local entity files.
///
/// Cheap to clone; holds only the store directory. Use with `ActNode` for the
/// storage role.
#[derive(Clone, Debug)]
pub struct StorageToolSource {
    store: EntityStore,
}

impl StorageToolSource {
    pub fn new(store: EntityStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    async fn do_read(&self, arguments: &Value) -> Result<ToolCallContent, ToolSourceError> {
        let entity_type = entity_type_arg(arguments)?;
        let entity = str_arg(arguments, "entity")?;
        let records = self.store.read(entity_type, entity).await?;
        let text = serde_json::to_string(&records)
            .map_err(|e| ToolSourceError::InvalidInput(e.to_string()))?;
        Ok(ToolCallContent { text })
    }

    async fn do_write(&self, arguments: &Value) -> Result<ToolCallContent, ToolSourceError> {
        let entity_type = entity_type_arg(arguments)?;
        let entity = str_arg(arguments, "entity")?;
        let details = str_arg(arguments, "details")?;
        let text = self.store.write(entity_type, entity, details).await?;
        Ok(ToolCallContent { text })
    }
}

#[async_trait]
impl ToolSource for StorageToolSource {
    async fn list_tools(&self) -> Result<Vec<ToolSpec>, ToolSourceError> {
        Ok(vec![read_from_storage_spec(), write_to_storage_spec()])
    }

    async fn call_tool(&self, name: &str, arguments: Value) -> Result<ToolCallContent, ToolSourceError> {
        debug!(tool = %name, args = %arguments, "storage tool call");
        let result = match name {
            TOOL_READ_FROM_STORAGE => self.do_read(&arguments).await,
            TOOL_WRITE_TO_STORAGE => self.do_write(&arguments).await,
            _ => Err(ToolSourceError::NotFound(name.to_string())),
        };
        if let Ok(content) = &result {
            trace!(tool = %name, result = %content.text, "storage tool result");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: list_tools returns both storage tools with required arguments.
    #[tokio::test]
    async fn list_tools_returns_read_and_write() {
        let dir = tempfile::tempdir().unwrap();
        let source = StorageToolSource::new(EntityStore::new(dir.path()));
        let tools = source.list_tools().await.unwrap();
        let names: Vec<_> = tools.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec![TOOL_READ_FROM_STORAGE, TOOL_WRITE_TO_STORAGE]);
        assert_eq!(tools[1].input_schema["required"], json!(["type", "entity", "details"]));
    }

    /// **Scenario**: reading with no local file returns an empty JSON array.
    #[tokio::test]
    async fn read_without_file_returns_empty_array() {
        let dir = tempfile::tempdir().unwrap();
        let source = StorageToolSource::new(EntityStore::new(dir.path()));
        let out = source
            .call_tool(TOOL_READ_FROM_STORAGE, json!({ "type": "location", "entity": "Earth" }))
            .await
            .unwrap();
        assert_eq!(out.text, "[]");
    }

    /// **Scenario**: missing arguments and unknown types are InvalidInput.
    #[tokio::test]
    async fn bad_arguments_are_invalid_input() {
        let dir = tempfile::tempdir().unwrap();
        let source = StorageToolSource::new(EntityStore::new(dir.path()));
        let missing = source
            .call_tool(TOOL_READ_FROM_STORAGE, json!({ "type": "location" }))
            .await;
        assert!(matches!(missing, Err(ToolSourceError::InvalidInput(_))));
        let unknown = source
            .call_tool(TOOL_READ_FROM_STORAGE, json!({ "type": "planet", "entity": "x" }))
            .await;
        assert!(matches!(unknown, Err(ToolSourceError::InvalidInput(_))));
    }

    /// **Scenario**: an unknown tool name is NotFound.
    #[tokio::test]
    async fn unknown_tool_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let source = StorageToolSource::new(EntityStore::new(dir.path()));
        let err = source.call_tool("delete_everything", json!({})).await;
        assert!(matches!(err, Err(ToolSourceError::NotFound(n)) if n == "delete_everything"));
    }

    /// **Scenario**: writing before any fetch surfaces the store's CacheMiss.
    #[tokio::test]
    async fn write_without_file_is_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = StorageToolSource::new(EntityStore::new(dir.path()));
        let err = source
            .call_tool(
                TOOL_WRITE_TO_STORAGE,
                json!({ "type": "location", "entity": "Earth", "details": "home" }),
            )
            .await;
        assert!(matches!(
            err,
            Err(ToolSourceError::Storage(crate::store::StoreError::CacheMiss { .. }))
        ));
    }
}
