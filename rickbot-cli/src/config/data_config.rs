//! Data config: GraphQL endpoint, request timeout and the directory holding the store files.
//!
//! Needs no API key, so `rickbot fetch` works without LLM credentials.

use std::path::PathBuf;

use rickbot::graphql::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS};

/// Where entity data comes from and where it is kept.
#[derive(Clone, Debug, PartialEq)]
pub struct DataConfig {
    /// GraphQL endpoint. Default: the public Rick & Morty API.
    pub graphql_endpoint: String,
    /// HTTP request timeout in seconds. Default: 30.
    pub graphql_timeout_secs: u64,
    /// Directory of `characters.json`, `episodes.json`, `locations.json`. Default: `.`.
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            graphql_endpoint: DEFAULT_ENDPOINT.to_string(),
            graphql_timeout_secs: DEFAULT_TIMEOUT_SECS,
            data_dir: PathBuf::from("."),
        }
    }
}

impl DataConfig {
    /// Fill from `GRAPHQL_ENDPOINT`, `GRAPHQL_TIMEOUT_SECS`, `DATA_DIR`; unset or
    /// unparsable values keep their defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            graphql_endpoint: std::env::var("GRAPHQL_ENDPOINT")
                .unwrap_or(defaults.graphql_endpoint),
            graphql_timeout_secs: std::env::var("GRAPHQL_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.graphql_timeout_secs),
            data_dir: std::env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
        }
    }

    /// Apply the data-related overrides from `options`.
    pub fn apply_options(&mut self, options: &super::RunOptions) {
        if let Some(endpoint) = &options.graphql_endpoint {
            self.graphql_endpoint = endpoint.clone();
        }
        if let Some(dir) = &options.data_dir {
            self.data_dir = dir.clone();
        }
    }
}
