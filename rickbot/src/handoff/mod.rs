//! Two-role hand-off: Triage classifies and replies, Storage owns the storage tools.
//!
//! [`HandoffRunner`] compiles the graph once and runs it per turn. The routing
//! decision sits behind [`IntentClassifier`] so the model-backed classifier can
//! be swapped for [`KeywordClassifier`] in tests and offline runs.

mod classifier;
mod nodes;
mod prompts;
mod runner;

pub use classifier::{
    handoff_tool_spec, IntentClassifier, KeywordClassifier, LlmClassifier, Route,
    DEFAULT_KEYWORDS, HANDOFF_TOOL_NAME,
};
pub use nodes::{ComposeNode, TriageNode};
pub use prompts::{STORAGE_HANDOFF_DESCRIPTION, STORAGE_INSTRUCTIONS, TRIAGE_INSTRUCTIONS};
pub use runner::{
    HandoffOptions, HandoffRunner, RunError, NODE_COMPOSE, NODE_STORAGE_ACT, NODE_STORAGE_OBSERVE,
    NODE_STORAGE_THINK, NODE_TRIAGE,
};
