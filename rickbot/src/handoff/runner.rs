//! Hand-off graph runner: builds triage → storage loop → compose once, invokes per turn.
//!
//! Graph: `START → triage → storage_think → storage_act → storage_observe → compose → END`.
//! `triage` ends the run on a direct answer; `storage_observe` jumps back to
//! `storage_think` while the storage role keeps calling tools.

use std::sync::Arc;

use tracing::info;

use crate::error::AgentError;
use crate::graph::{CompilationError, CompiledStateGraph, NodeMiddleware, StateGraph, END, START};
use crate::llm::LlmClient;
use crate::message::Message;
use crate::react::{ActNode, HandleToolErrors, ObserveNode, ThinkNode, DEFAULT_MAX_TURNS};
use crate::state::{Role, TurnState};
use crate::tool_source::ToolSource;

use super::classifier::IntentClassifier;
use super::nodes::{ComposeNode, TriageNode};
use super::prompts::STORAGE_INSTRUCTIONS;

/// Node ids of the hand-off graph, in chain order.
pub const NODE_TRIAGE: &str = "triage";
pub const NODE_STORAGE_THINK: &str = "storage_think";
pub const NODE_STORAGE_ACT: &str = "storage_act";
pub const NODE_STORAGE_OBSERVE: &str = "storage_observe";
pub const NODE_COMPOSE: &str = "compose";

/// Error type for HandoffRunner build and invoke.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("compilation failed: {0}")]
    Compilation(#[from] CompilationError),
    #[error("execution failed: {0}")]
    Execution(#[from] AgentError),
}

/// Knobs for the storage loop and graph instrumentation.
#[derive(Clone, Default)]
pub struct HandoffOptions {
    /// Storage think/act/observe rounds per turn; `None` uses `DEFAULT_MAX_TURNS`.
    pub max_turns: Option<u32>,
    pub handle_tool_errors: HandleToolErrors,
    /// Wraps every node run (e.g. enter/exit logging).
    pub middleware: Option<Arc<dyn NodeMiddleware<TurnState>>>,
}

/// Hand-off graph runner: owns the compiled graph.
///
/// # Example
///
/// ```ignore
/// let runner = HandoffRunner::new(triage_llm, storage_llm, classifier, tools)?;
/// let state = runner.invoke(&history, "Who lives on Purge Planet?").await?;
/// ```
pub struct HandoffRunner {
    compiled: CompiledStateGraph<TurnState>,
}

impl HandoffRunner {
    /// Builds the graph with default options.
    ///
    /// `triage_llm` answers small talk and composes final replies; `storage_llm`
    /// must have the tool source's specs bound.
    pub fn new(
        triage_llm: Arc<dyn LlmClient>,
        storage_llm: Arc<dyn LlmClient>,
        classifier: Arc<dyn IntentClassifier>,
        tools: Arc<dyn ToolSource>,
    ) -> Result<Self, CompilationError> {
        Self::with_options(
            triage_llm,
            storage_llm,
            classifier,
            tools,
            HandoffOptions::default(),
        )
    }

    pub fn with_options(
        triage_llm: Arc<dyn LlmClient>,
        storage_llm: Arc<dyn LlmClient>,
        classifier: Arc<dyn IntentClassifier>,
        tools: Arc<dyn ToolSource>,
        options: HandoffOptions,
    ) -> Result<Self, CompilationError> {
        let triage = TriageNode::new(classifier, Arc::clone(&triage_llm));
        let think = ThinkNode::new(storage_llm)
            .with_id(NODE_STORAGE_THINK)
            .with_system_prompt(STORAGE_INSTRUCTIONS)
            .with_role(Role::Storage);
        let act = ActNode::new(tools)
            .with_id(NODE_STORAGE_ACT)
            .with_handle_tool_errors(options.handle_tool_errors);
        let observe = ObserveNode::new(NODE_STORAGE_THINK)
            .with_id(NODE_STORAGE_OBSERVE)
            .with_max_turns(options.max_turns.unwrap_or(DEFAULT_MAX_TURNS));
        let compose = ComposeNode::new(triage_llm);

        let mut graph = StateGraph::<TurnState>::new();
        graph
            .add_node(NODE_TRIAGE, Arc::new(triage))
            .add_node(NODE_STORAGE_THINK, Arc::new(think))
            .add_node(NODE_STORAGE_ACT, Arc::new(act))
            .add_node(NODE_STORAGE_OBSERVE, Arc::new(observe))
            .add_node(NODE_COMPOSE, Arc::new(compose))
            .add_edge(START, NODE_TRIAGE)
            .add_edge(NODE_TRIAGE, NODE_STORAGE_THINK)
            .add_edge(NODE_STORAGE_THINK, NODE_STORAGE_ACT)
            .add_edge(NODE_STORAGE_ACT, NODE_STORAGE_OBSERVE)
            .add_edge(NODE_STORAGE_OBSERVE, NODE_COMPOSE)
            .add_edge(NODE_COMPOSE, END);

        let graph = match options.middleware {
            Some(mw) => graph.with_middleware(mw),
            None => graph,
        };

        Ok(Self {
            compiled: graph.compile()?,
        })
    }

    /// Runs one turn: `history` plus the new user utterance through the graph.
    ///
    /// Returns the final state; its last assistant message is the reply and
    /// `tool_log` lists every tool invoked during the turn.
    pub async fn invoke(&self, history: &[Message], utterance: &str) -> Result<TurnState, RunError> {
        let mut messages = history.to_vec();
        messages.push(Message::user(utterance));
        let state = TurnState {
            messages,
            ..Default::default()
        };
        info!(history = history.len(), "running turn");
        Ok(self.compiled.invoke(state).await?)
    }

    pub fn graph(&self) -> &CompiledStateGraph<TurnState> {
        &self.compiled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handoff::KeywordClassifier;
    use crate::llm::MockLlm;
    use crate::tool_source::MockToolSource;
    use serde_json::json;

    fn runner(storage_llm: MockLlm, tools: Arc<MockToolSource>) -> HandoffRunner {
        HandoffRunner::new(
            Arc::new(MockLlm::with_no_tool_calls("composed")),
            Arc::new(storage_llm),
            Arc::new(KeywordClassifier::default()),
            tools,
        )
        .unwrap()
    }

    #[test]
    fn graph_chain_order() {
        let r = runner(MockLlm::with_no_tool_calls("x"), Arc::new(MockToolSource::default()));
        assert_eq!(
            r.graph().edge_order(),
            &[
                NODE_TRIAGE,
                NODE_STORAGE_THINK,
                NODE_STORAGE_ACT,
                NODE_STORAGE_OBSERVE,
                NODE_COMPOSE
            ]
        );
    }

    /// **Scenario**: a storage question runs one tool round then composes the reply.
    #[tokio::test]
    async fn storage_question_calls_tool_and_composes() {
        let tools = Arc::new(MockToolSource::storage_example());
        let storage = MockLlm::with_tool_call(
            "read_from_storage",
            json!({ "type": "location", "entity": "Purge Planet" }),
            "Found residents.",
        );
        let r = runner(storage, tools.clone());
        let state = r
            .invoke(&[], "Who lives on the location 'Purge Planet'?")
            .await
            .unwrap();
        assert_eq!(state.last_assistant_reply(), Some("composed"));
        assert_eq!(state.tool_log.len(), 1);
        assert_eq!(state.tool_log[0].name, "read_from_storage");
        assert_eq!(state.tool_log[0].role, Role::Storage);
        assert_eq!(tools.calls().len(), 1);
        assert_eq!(state.active_role, Role::Triage);
    }

    /// **Scenario**: a storage model that never stops calling tools is cut at the turn cap.
    #[tokio::test]
    async fn tool_loop_is_capped() {
        let tools = Arc::new(MockToolSource::storage_example());
        let storage = MockLlm::new(vec![MockLlm::tool_call_response(
            "read_from_storage",
            json!({ "type": "location", "entity": "Earth" }),
        )]);
        let r = HandoffRunner::with_options(
            Arc::new(MockLlm::with_no_tool_calls("done")),
            Arc::new(storage),
            Arc::new(KeywordClassifier::default()),
            tools.clone(),
            HandoffOptions {
                max_turns: Some(3),
                ..Default::default()
            },
        )
        .unwrap();
        let state = r.invoke(&[], "which location is Earth?").await.unwrap();
        assert_eq!(state.turn_count, 3);
        assert_eq!(tools.calls().len(), 3);
        assert_eq!(state.last_assistant_reply(), Some("done"));
    }
}
