//! # rickbot
//!
//! A conversational assistant over the Rick & Morty GraphQL API. Characters,
//! episodes and locations are fetched into local JSON files, read and annotated
//! through two tools, and served by a two-role agent graph: a triage role that
//! answers or hands off, and a storage role that calls the tools.
//!
//! ## Main Modules
//!
//! - [`graphql`]: `GraphqlClient`, the three query documents, bootstrap fetch.
//! - [`store`]: `EntityStore`, the file-backed entity cache.
//! - [`entity`]: `EntityType` and the typed record schemas.
//! - [`tool_source`]: `ToolSource` trait, `StorageToolSource` (`read_from_storage`,
//!   `write_to_storage`), `MockToolSource`.
//! - [`graph`]: `StateGraph`, `CompiledStateGraph`, `Node`, `Next`, `NodeMiddleware`.
//! - [`react`]: `ThinkNode`, `ActNode`, `ObserveNode` for the storage tool loop.
//! - [`handoff`]: `HandoffRunner`, `IntentClassifier` and the role prompts.
//! - [`session`]: explicit per-conversation state and `TurnOutcome`.
//! - [`evaluation`]: goldens and tool-call scoring.
//! - [`llm`]: `LlmClient` trait, `MockLlm`, and `ChatOpenAI` (feature `openai`).
//!
//! ## Features
//!
//! - `openai` (default): `ChatOpenAI` via `async-openai`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use rickbot::{
//!     EntityStore, HandoffRunner, KeywordClassifier, MockLlm, Session, SessionSettings,
//!     StorageToolSource,
//! };
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let tools = StorageToolSource::new(EntityStore::new("."));
//! let runner = HandoffRunner::new(
//!     Arc::new(MockLlm::with_no_tool_calls("Hello!")),
//!     Arc::new(MockLlm::with_no_tool_calls("Nothing stored.")),
//!     Arc::new(KeywordClassifier::default()),
//!     Arc::new(tools),
//! )?;
//! let mut session = Session::new(SessionSettings::default());
//! let outcome = session.process_turn(&runner, "hi").await?;
//! println!("{}", outcome.reply);
//! # Ok(())
//! # }
//! ```

pub mod entity;
pub mod error;
pub mod evaluation;
pub mod graph;
pub mod graphql;
pub mod handoff;
pub mod llm;
pub mod message;
pub mod react;
pub mod session;
pub mod state;
pub mod store;
pub mod tool_source;

pub use entity::{EntityRecord, EntityType};
pub use error::AgentError;
pub use evaluation::{default_goldens, run_goldens, tool_call_score, EvalCase, Golden};
pub use graph::{
    CompilationError, CompiledStateGraph, Next, Node, NodeFuture, NodeMiddleware, StateGraph, END,
    START,
};
pub use graphql::{GraphqlClient, GraphqlError};
pub use handoff::{
    handoff_tool_spec, HandoffOptions, HandoffRunner, IntentClassifier, KeywordClassifier,
    LlmClassifier, Route, RunError,
};
#[cfg(feature = "openai")]
pub use llm::ChatOpenAI;
pub use llm::{LlmClient, LlmResponse, MockLlm, ToolChoiceMode};
pub use message::Message;
pub use react::{ActNode, HandleToolErrors, ObserveNode, ThinkNode};
pub use session::{requests_evaluation, Session, SessionSettings, TurnOutcome};
pub use state::{Role, ToolCall, ToolInvocation, ToolResult, TurnState};
pub use store::{EntityStore, StoreError};
pub use tool_source::{
    MockToolSource, StorageToolSource, ToolCallContent, ToolSource, ToolSourceError, ToolSpec,
    TOOL_READ_FROM_STORAGE, TOOL_WRITE_TO_STORAGE,
};
