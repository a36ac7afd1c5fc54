//! Configuration for the chat shell: LLM settings, data source and storage location.
//!
//! Re-exports [`RunConfig`], [`DataConfig`], [`RunOptions`], [`ClassifierKind`] and config [`Error`].

mod data_config;
mod run_config;
mod run_options;

pub use data_config::DataConfig;
pub use run_config::{ClassifierKind, Error, RunConfig};
pub use run_options::RunOptions;
