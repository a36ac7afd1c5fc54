//! Entity type tag: selects the backing file, the envelope key and the lookup rule.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One of the three top-level categories of fetched and stored data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Characters,
    Episodes,
    Locations,
}

/// Returned when a tool argument does not name a known entity type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown entity type: {0} (use character, episode, or location)")]
pub struct ParseEntityTypeError(pub String);

impl EntityType {
    /// All entity types, in bulk-fetch order. Locations come last: its file marks a
    /// completed bootstrap.
    pub const ALL: [EntityType; 3] = [
        EntityType::Characters,
        EntityType::Episodes,
        EntityType::Locations,
    ];

    /// Plural name: file stem, GraphQL root field and envelope key.
    pub fn plural(self) -> &'static str {
        match self {
            EntityType::Characters => "characters",
            EntityType::Episodes => "episodes",
            EntityType::Locations => "locations",
        }
    }

    /// Local store file name, e.g. `locations.json`.
    pub fn file_name(self) -> String {
        format!("{}.json", self.plural())
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.plural())
    }
}

impl FromStr for EntityType {
    type Err = ParseEntityTypeError;

    /// Accepts singular or plural, any case: `character`, `Episodes`, `LOCATION`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "character" | "characters" => Ok(EntityType::Characters),
            "episode" | "episodes" => Ok(EntityType::Episodes),
            "location" | "locations" => Ok(EntityType::Locations),
            _ => Err(ParseEntityTypeError(s.to_string())),
        }
    }
}
