//! Entity Store: the JSON files that cache fetched result sets and hold user annotations.
//!
//! One file per entity type (`characters.json`, `episodes.json`, `locations.json`)
//! under a data directory. The store is the only component that touches these
//! files; there is no in-memory layer, every call re-reads from disk. Concurrent
//! writers are not coordinated: the last write wins.

mod entity_store;
mod error;

pub use entity_store::EntityStore;
pub use error::StoreError;
