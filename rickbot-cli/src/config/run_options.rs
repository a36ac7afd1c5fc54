//! Optional overrides for a run (CLI flags or programmatic).
//!
//! Used by [`RunConfig::apply_options`](super::RunConfig::apply_options) and
//! [`DataConfig::apply_options`](super::DataConfig::apply_options). Only set
//! fields override the env-based config.

use std::path::PathBuf;

use rickbot::ToolChoiceMode;

use super::ClassifierKind;

#[derive(Clone, Debug, Default)]
pub struct RunOptions {
    /// Override model name.
    pub model: Option<String>,
    /// Override sampling temperature (0-2).
    pub temperature: Option<f32>,
    /// Override tool choice mode for the storage role (auto, none, required).
    pub tool_choice: Option<ToolChoiceMode>,
    pub classifier: Option<ClassifierKind>,
    pub data_dir: Option<PathBuf>,
    pub graphql_endpoint: Option<String>,
    /// Log node enter/exit and raise the default log level to debug.
    pub verbose: bool,
}
