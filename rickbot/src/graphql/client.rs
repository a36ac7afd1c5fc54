//! HTTP transport: POST `{query, variables}` and check the response for `errors`.

use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::entity::EntityType;
use crate::store::EntityStore;

use super::{query_document, GraphqlError};

/// Public Rick & Morty GraphQL endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://rickandmortyapi.com/graphql";

/// Request timeout used by [`GraphqlClient::new`].
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Serialize)]
struct GraphqlRequest<'a> {
    query: &'a str,
    variables: Variables<'a>,
}

#[derive(Serialize)]
struct Variables<'a> {
    filter: NameFilter<'a>,
}

#[derive(Serialize)]
struct NameFilter<'a> {
    name: &'a str,
}

/// Client for a single GraphQL endpoint.
#[derive(Clone, Debug)]
pub struct GraphqlClient {
    client: Client,
    endpoint: String,
}

impl GraphqlClient {
    /// Creates a client for `endpoint` with the default request timeout.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, GraphqlError> {
        Self::with_timeout(endpoint, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, GraphqlError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, endpoint))
    }

    /// Creates a client with a preconfigured `reqwest::Client` (proxies, headers).
    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends `document` with `variables.filter.name = filter` (empty when `None`)
    /// and returns the `data` payload, or an empty object when there is none.
    ///
    /// The HTTP status is not checked: any body is parsed as JSON and a
    /// top-level `errors` field becomes [`GraphqlError::Query`].
    pub async fn query(&self, document: &str, filter: Option<&str>) -> Result<Value, GraphqlError> {
        let body = GraphqlRequest {
            query: document,
            variables: Variables {
                filter: NameFilter {
                    name: filter.unwrap_or(""),
                },
            },
        };
        let response = self.client.post(&self.endpoint).json(&body).send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        debug!(endpoint = %self.endpoint, %status, len = bytes.len(), "graphql response");

        let mut payload: Value =
            serde_json::from_slice(&bytes).map_err(|e| GraphqlError::Decode(e.to_string()))?;
        if let Some(errors) = payload.get("errors").filter(|e| !e.is_null()) {
            warn!(endpoint = %self.endpoint, %status, "graphql returned errors");
            return Err(GraphqlError::Query(errors.clone()));
        }
        Ok(payload
            .get_mut("data")
            .filter(|d| !d.is_null())
            .map(Value::take)
            .unwrap_or_else(|| Value::Object(Map::new())))
    }

    /// Runs the fixed query document for `entity_type`.
    pub async fn fetch(&self, entity_type: EntityType, filter: Option<&str>) -> Result<Value, GraphqlError> {
        self.query(query_document(entity_type), filter).await
    }

    /// Fetches page 1 of `entity_type` without a filter and overwrites its store file.
    pub async fn fetch_and_persist(
        &self,
        entity_type: EntityType,
        store: &EntityStore,
    ) -> Result<(), GraphqlError> {
        let data = self.fetch(entity_type, None).await?;
        store.save(entity_type, &data).await?;
        info!(%entity_type, "fetched and persisted");
        Ok(())
    }

    /// Fetches and persists every entity type.
    pub async fn fetch_all(&self, store: &EntityStore) -> Result<(), GraphqlError> {
        for entity_type in EntityType::ALL {
            self.fetch_and_persist(entity_type, store).await?;
        }
        Ok(())
    }

    /// Bulk-fetches all entity types when the locations file is absent.
    ///
    /// Returns `true` when a fetch happened.
    pub async fn ensure_local_data(&self, store: &EntityStore) -> Result<bool, GraphqlError> {
        if store.exists(EntityType::Locations).await {
            return Ok(false);
        }
        info!(dir = %store.dir().display(), "local data missing, fetching all entity types");
        self.fetch_all(store).await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// **Scenario**: The request body nests the filter under variables.filter.name.
    #[test]
    fn request_body_shape() {
        let body = GraphqlRequest {
            query: "query { x }",
            variables: Variables {
                filter: NameFilter { name: "" },
            },
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"query": "query { x }", "variables": {"filter": {"name": ""}}})
        );
    }

    #[test]
    fn new_keeps_endpoint() {
        let client = GraphqlClient::new(DEFAULT_ENDPOINT).unwrap();
        assert_eq!(client.endpoint(), "https://rickandmortyapi.com/graphql");
    }
}
