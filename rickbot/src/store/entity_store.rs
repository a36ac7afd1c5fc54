//! File-backed entity store.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::entity::{Character, EntityRecord, EntityType, Episode, Location, Record, ResultSet};

use super::StoreError;

/// Reads and writes the per-entity-type JSON files under one directory.
///
/// File format is the GraphQL `data` payload for that type, pretty-printed:
/// `{"locations": {"info": {...}, "results": [...]}}`.
#[derive(Clone, Debug)]
pub struct EntityStore {
    dir: PathBuf,
}

impl EntityStore {
    /// Creates a store rooted at `dir` (use `"."` for the working directory).
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the local store file for `entity_type`.
    pub fn path_for(&self, entity_type: EntityType) -> PathBuf {
        self.dir.join(entity_type.file_name())
    }

    /// Whether the local store file for `entity_type` exists.
    pub async fn exists(&self, entity_type: EntityType) -> bool {
        tokio::fs::try_exists(self.path_for(entity_type))
            .await
            .unwrap_or(false)
    }

    /// Returns the records of `entity_type` matching `key`.
    ///
    /// Characters and locations match on `name`; episodes on `name`, `air_date`
    /// or the episode code. An absent file yields an empty vec.
    pub async fn read(
        &self,
        entity_type: EntityType,
        key: &str,
    ) -> Result<Vec<EntityRecord>, StoreError> {
        match entity_type {
            EntityType::Characters => self.read_typed::<Character>(key).await,
            EntityType::Episodes => self.read_typed::<Episode>(key).await,
            EntityType::Locations => self.read_typed::<Location>(key).await,
        }
    }

    /// Sets `detail` on the first record of `entity_type` whose name equals `key`
    /// and rewrites the whole file. Every other record and field is kept as stored.
    ///
    /// Fails with `CacheMiss` when the file is absent and `Lookup` when no record
    /// has that name. Returns the confirmation text shown to the agent.
    pub async fn write(
        &self,
        entity_type: EntityType,
        key: &str,
        detail: &str,
    ) -> Result<String, StoreError> {
        match entity_type {
            EntityType::Characters => self.write_typed::<Character>(key, detail).await?,
            EntityType::Episodes => self.write_typed::<Episode>(key, detail).await?,
            EntityType::Locations => self.write_typed::<Location>(key, detail).await?,
        }
        Ok(format!(
            "Successfully stored detail {} for {} in {}.",
            detail, key, entity_type
        ))
    }

    /// Replaces the file for `entity_type` with `data`, the GraphQL payload
    /// `{"<plural>": {"info": ..., "results": [...]}}`.
    ///
    /// The payload is decoded against the typed schema first, so nothing is
    /// written when it does not fit.
    pub async fn save(&self, entity_type: EntityType, data: &Value) -> Result<(), StoreError> {
        match entity_type {
            EntityType::Characters => self.save_typed::<Character>(data).await,
            EntityType::Episodes => self.save_typed::<Episode>(data).await,
            EntityType::Locations => self.save_typed::<Location>(data).await,
        }
    }

    /// Loads the full result set of `R`'s entity type; `None` when the file is absent.
    pub async fn load<R: Record>(&self) -> Result<Option<ResultSet<R>>, StoreError> {
        let path = self.path_for(R::ENTITY_TYPE);
        match self.load_raw(&path).await? {
            Some(value) => decode_envelope::<R>(&path, &value).map(Some),
            None => Ok(None),
        }
    }

    async fn read_typed<R: Record>(&self, key: &str) -> Result<Vec<EntityRecord>, StoreError> {
        let Some(set) = self.load::<R>().await? else {
            debug!(entity_type = %R::ENTITY_TYPE, "store file absent, empty read");
            return Ok(Vec::new());
        };
        Ok(set
            .results
            .into_iter()
            .filter(|r| r.matches_key(key))
            .map(Record::into_entity_record)
            .collect())
    }

    async fn write_typed<R: Record>(&self, key: &str, detail: &str) -> Result<(), StoreError> {
        let path = self.path_for(R::ENTITY_TYPE);
        let mut value = self
            .load_raw(&path)
            .await?
            .ok_or_else(|| StoreError::CacheMiss {
                entity_type: R::ENTITY_TYPE,
                path: path.clone(),
            })?;
        decode_envelope::<R>(&path, &value)?;

        // Edit the raw document so fields outside the typed schema survive.
        let record = value
            .get_mut(R::ENTITY_TYPE.plural())
            .and_then(|set| set.get_mut("results"))
            .and_then(Value::as_array_mut)
            .and_then(|results| {
                results
                    .iter_mut()
                    .find(|r| r.get("name").and_then(Value::as_str) == Some(key))
            })
            .and_then(Value::as_object_mut)
            .ok_or_else(|| StoreError::Lookup {
                entity_type: R::ENTITY_TYPE,
                key: key.to_string(),
            })?;
        record.insert("detail".to_string(), Value::String(detail.to_string()));

        self.persist(&path, &value).await?;
        info!(entity_type = %R::ENTITY_TYPE, key, "stored detail");
        Ok(())
    }

    async fn save_typed<R: Record>(&self, data: &Value) -> Result<(), StoreError> {
        let path = self.path_for(R::ENTITY_TYPE);
        let plural = R::ENTITY_TYPE.plural();
        let set = decode_envelope::<R>(&path, data)?;

        let mut envelope = Map::new();
        if let Some(inner) = data.get(plural) {
            envelope.insert(plural.to_string(), inner.clone());
        }
        self.persist(&path, &Value::Object(envelope)).await?;
        info!(
            entity_type = %R::ENTITY_TYPE,
            records = set.results.len(),
            path = %path.display(),
            "saved result set"
        );
        Ok(())
    }

    async fn load_raw(&self, path: &Path) -> Result<Option<Value>, StoreError> {
        let bytes = match tokio::fs::read(path).await {
            Ok(b) => b,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| StoreError::Decode {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
    }

    async fn persist(&self, path: &Path, value: &Value) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(value)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        tokio::fs::write(path, bytes).await?;
        Ok(())
    }
}

/// Extracts and decodes `{"<plural>": ResultSet}` from `value`.
fn decode_envelope<R: Record>(path: &Path, value: &Value) -> Result<ResultSet<R>, StoreError> {
    let plural = R::ENTITY_TYPE.plural();
    let inner = value.get(plural).ok_or_else(|| StoreError::Decode {
        path: path.to_path_buf(),
        message: format!("missing top-level key {:?}", plural),
    })?;
    ResultSet::<R>::deserialize(inner).map_err(|e| StoreError::Decode {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
