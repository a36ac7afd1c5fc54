//! Act node: execute the pending tool_calls against a ToolSource, write tool_results.
//!
//! ActNode holds a ToolSource, implements `Node<TurnState>`; run calls
//! `call_tool(name, args)` for each pending call, appends one `ToolResult` per
//! call and records a `ToolInvocation` in `state.tool_log`.
//!
//! # Error Handling
//!
//! By default, tool errors propagate and short-circuit the graph. Use
//! `with_handle_tool_errors` to turn them into tool results instead:
//!
//! - `HandleToolErrors::Never` - Errors propagate (default)
//! - `HandleToolErrors::Always` - Errors are caught and returned as error messages
//! - `HandleToolErrors::Custom(handler)` - Custom error handler function

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{debug, trace, warn};

use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::state::{ToolInvocation, ToolResult, TurnState};
use crate::tool_source::{ToolSource, ToolSourceError};

/// Truncates a string for logging, appending "..." if longer than max_len.
fn truncate_for_log(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        format!("{}...", s.chars().take(max_len).collect::<String>())
    }
}

/// Default execution error message template with tool name and kwargs.
pub const DEFAULT_EXECUTION_ERROR_TEMPLATE: &str =
    "Error executing tool '{tool_name}' with kwargs {tool_kwargs} with error:\n {error}\n Please fix the error and try again.";

/// Error handler function type.
///
/// Takes the error, tool name, and tool arguments, returns an error message string.
pub type ErrorHandlerFn =
    Arc<dyn Fn(&ToolSourceError, &str, &Value) -> String + Send + Sync + 'static>;

/// Configuration for how ActNode handles tool errors.
#[derive(Clone, Default)]
pub enum HandleToolErrors {
    /// Errors propagate and short-circuit the graph.
    #[default]
    Never,
    /// Errors are caught and returned as a ToolResult; `None` uses the default template.
    Always(Option<String>),
    Custom(ErrorHandlerFn),
}

impl std::fmt::Debug for HandleToolErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Never => write!(f, "HandleToolErrors::Never"),
            Self::Always(msg) => write!(f, "HandleToolErrors::Always({:?})", msg),
            Self::Custom(_) => write!(f, "HandleToolErrors::Custom(<fn>)"),
        }
    }
}

/// Act node: executes tool_calls and produces tool_results.
///
/// Arguments arrive as a JSON string from the LLM; an empty or malformed string
/// is passed on as `{}` so the tool reports the missing fields itself.
///
/// **Interaction**: Implements `Node<TurnState>`; used by `HandoffRunner` as
/// `storage_act`. Consumes `ToolSource` (e.g. `StorageToolSource`).
pub struct ActNode {
    id: String,
    tools: Arc<dyn ToolSource>,
    handle_tool_errors: HandleToolErrors,
}

impl ActNode {
    /// Creates an Act node with id `"act"`; tool errors propagate.
    pub fn new(tools: Arc<dyn ToolSource>) -> Self {
        Self {
            id: "act".to_string(),
            tools,
            handle_tool_errors: HandleToolErrors::Never,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_handle_tool_errors(mut self, handle_tool_errors: HandleToolErrors) -> Self {
        self.handle_tool_errors = handle_tool_errors;
        self
    }

    /// Some(message) when the error is converted into a tool result, None when it propagates.
    fn handle_error(
        &self,
        error: &ToolSourceError,
        tool_name: &str,
        tool_args: &Value,
    ) -> Option<String> {
        match &self.handle_tool_errors {
            HandleToolErrors::Never => None,
            HandleToolErrors::Always(custom_msg) => {
                let msg = custom_msg.clone().unwrap_or_else(|| {
                    DEFAULT_EXECUTION_ERROR_TEMPLATE
                        .replace("{tool_name}", tool_name)
                        .replace("{tool_kwargs}", &tool_args.to_string())
                        .replace("{error}", &error.to_string())
                });
                Some(msg)
            }
            HandleToolErrors::Custom(handler) => Some(handler(error, tool_name, tool_args)),
        }
    }
}

#[async_trait]
impl Node<TurnState> for ActNode {
    fn id(&self) -> &str {
        &self.id
    }

    async fn run(&self, state: TurnState) -> Result<(TurnState, Next), AgentError> {
        let mut tool_results = Vec::with_capacity(state.tool_calls.len());
        let mut tool_log = state.tool_log;

        for tc in &state.tool_calls {
            let args: Value = if tc.arguments.trim().is_empty() {
                json!({})
            } else {
                serde_json::from_str(&tc.arguments).unwrap_or_else(|_| json!({}))
            };

            debug!(tool = %tc.name, role = %state.active_role, args = ?args, "Calling tool");
            tool_log.push(ToolInvocation {
                role: state.active_role,
                name: tc.name.clone(),
                arguments: args.clone(),
            });

            match self.tools.call_tool(&tc.name, args.clone()).await {
                Ok(content) => {
                    trace!(
                        tool = %tc.name,
                        result_len = content.text.len(),
                        result_preview = %truncate_for_log(&content.text, 200),
                        "Tool returned"
                    );
                    tool_results.push(ToolResult {
                        call_id: tc.id.clone(),
                        name: Some(tc.name.clone()),
                        content: content.text,
                    });
                }
                Err(e) => {
                    warn!(tool = %tc.name, error = %e, "Tool call failed");
                    match self.handle_error(&e, &tc.name, &args) {
                        Some(error_msg) => tool_results.push(ToolResult {
                            call_id: tc.id.clone(),
                            name: Some(tc.name.clone()),
                            content: error_msg,
                        }),
                        None => return Err(AgentError::ExecutionFailed(e.to_string())),
                    }
                }
            }
        }

        let new_state = TurnState {
            tool_results,
            tool_log,
            ..state
        };
        Ok((new_state, Next::Continue))
    }
}
