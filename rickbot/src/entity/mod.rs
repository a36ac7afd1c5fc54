//! Entity types and their typed record schemas.
//!
//! Mirrors the result shapes requested by the three GraphQL query documents.

mod entity_type;
mod record;

pub use entity_type::{EntityType, ParseEntityTypeError};
pub use record::{
    Character, EntityRecord, Episode, Location, NamedRef, PageInfo, PlaceRef, Record, ResultSet,
};
