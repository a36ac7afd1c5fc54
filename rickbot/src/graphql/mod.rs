//! GraphQL client for the Rick & Morty API.
//!
//! Sends one POST per call (no retries, page 1 only) and hands fetched result
//! sets to the [`EntityStore`](crate::store::EntityStore) for persistence.

mod client;
mod error;
mod queries;

pub use client::{GraphqlClient, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS};
pub use error::GraphqlError;
pub use queries::{query_document, CHARACTERS, EPISODES, LOCATIONS};
