//! Entity Store error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::entity::EntityType;

/// Failure of a store operation.
///
/// Reads never return `CacheMiss`: an absent file reads as an empty result.
/// Writes have no empty default and surface it.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The local store file for this entity type does not exist yet.
    #[error("no local store file for {entity_type} at {}", path.display())]
    CacheMiss {
        entity_type: EntityType,
        path: PathBuf,
    },

    /// A write named an entity with no matching record.
    #[error("no {entity_type} record named {key:?}")]
    Lookup { entity_type: EntityType, key: String },

    /// The file (or a payload being saved) does not match the typed schema.
    #[error("cannot decode {}: {message}", path.display())]
    Decode { path: PathBuf, message: String },

    /// Encoding the result set back to JSON failed.
    #[error("serialization failed: {0}")]
    Serialization(String),

    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),
}
