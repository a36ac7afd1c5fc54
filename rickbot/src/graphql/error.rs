//! GraphQL client errors.

use serde_json::Value;
use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum GraphqlError {
    /// The request never produced a response body (connect, timeout, TLS, read).
    #[error("graphql transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a top-level `errors` field.
    #[error("GraphQL returned: {0}")]
    Query(Value),

    /// The response body is not JSON.
    #[error("cannot decode graphql response: {0}")]
    Decode(String),

    /// The fetched payload could not be persisted.
    #[error(transparent)]
    Store(#[from] StoreError),
}
