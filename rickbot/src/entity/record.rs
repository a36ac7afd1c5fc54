//! Typed record schemas per entity type.
//!
//! Store files are decoded into these structs, so a malformed file fails with a
//! typed decode error instead of a missing-key fault deep in a tool call.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::EntityType;

/// Pagination block of a result envelope. Only page 1 is ever requested.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub count: Option<u32>,
    pub pages: Option<u32>,
    pub next: Option<u32>,
    pub prev: Option<u32>,
}

/// `{info, results}` envelope for one entity type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "R: DeserializeOwned"))]
pub struct ResultSet<R> {
    #[serde(default)]
    pub info: PageInfo,
    pub results: Vec<R>,
}

/// `{id, name}` reference to another entity (location residents, episode cast).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRef {
    pub id: String,
    pub name: String,
}

/// `{name}` reference used by a character's origin and last known location.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceRef {
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Character {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub species: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub image: String,
    pub origin: Option<PlaceRef>,
    pub location: Option<PlaceRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub dimension: String,
    #[serde(default)]
    pub residents: Vec<NamedRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub air_date: String,
    /// Episode code, e.g. `S01E05`.
    #[serde(default)]
    pub episode: String,
    #[serde(default)]
    pub characters: Vec<NamedRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Behaviour shared by the three record schemas.
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    const ENTITY_TYPE: EntityType;

    fn name(&self) -> &str;

    /// Lookup rule for reads. Defaults to an exact match on `name`.
    fn matches_key(&self, key: &str) -> bool {
        self.name() == key
    }

    fn into_entity_record(self) -> EntityRecord;
}

impl Record for Character {
    const ENTITY_TYPE: EntityType = EntityType::Characters;

    fn name(&self) -> &str {
        &self.name
    }

    fn into_entity_record(self) -> EntityRecord {
        EntityRecord::Character(self)
    }
}

impl Record for Location {
    const ENTITY_TYPE: EntityType = EntityType::Locations;

    fn name(&self) -> &str {
        &self.name
    }

    fn into_entity_record(self) -> EntityRecord {
        EntityRecord::Location(self)
    }
}

impl Record for Episode {
    const ENTITY_TYPE: EntityType = EntityType::Episodes;

    fn name(&self) -> &str {
        &self.name
    }

    /// Episodes also match on air date (`December 2, 2013`) or code (`S01E01`).
    fn matches_key(&self, key: &str) -> bool {
        self.name == key || self.air_date == key || self.episode == key
    }

    fn into_entity_record(self) -> EntityRecord {
        EntityRecord::Episode(self)
    }
}

/// A record of any entity type. Serializes as the bare record object.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EntityRecord {
    Character(Character),
    Location(Location),
    Episode(Episode),
}

impl EntityRecord {
    pub fn name(&self) -> &str {
        match self {
            EntityRecord::Character(r) => &r.name,
            EntityRecord::Location(r) => &r.name,
            EntityRecord::Episode(r) => &r.name,
        }
    }

    pub fn detail(&self) -> Option<&str> {
        match self {
            EntityRecord::Character(r) => r.detail.as_deref(),
            EntityRecord::Location(r) => r.detail.as_deref(),
            EntityRecord::Episode(r) => r.detail.as_deref(),
        }
    }

    pub fn entity_type(&self) -> EntityType {
        match self {
            EntityRecord::Character(_) => EntityType::Characters,
            EntityRecord::Location(_) => EntityType::Locations,
            EntityRecord::Episode(_) => EntityType::Episodes,
        }
    }
}
