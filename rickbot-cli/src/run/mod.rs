//! Run entry points: build the hand-off runner from config, one-shot ask, data refresh.
//!
//! Re-exports [`run_chat`], [`chat_loop`], [`run_eval`] and [`format_eval_report`].

mod chat;
mod eval;

use std::sync::Arc;
use std::time::Duration;

use rickbot::{
    EntityStore, GraphqlClient, HandoffOptions, HandoffRunner, IntentClassifier, LlmClient,
    Session, SessionSettings, StorageToolSource, ToolSource, TurnOutcome,
};
use tracing::info;

use crate::config::{DataConfig, Error, RunConfig};
use crate::middleware::WithNodeLogging;

pub use chat::{chat_loop, run_chat, EVALUATION_HINT};
pub use eval::{format_eval_report, run_eval, run_eval_with};

/// Builds the runner from already constructed parts. Used by [`build_runner`] and by
/// tests that inject `MockLlm`.
pub fn build_runner_with(
    triage_llm: Arc<dyn LlmClient>,
    storage_llm: Arc<dyn LlmClient>,
    classifier: Arc<dyn IntentClassifier>,
    tools: Arc<dyn ToolSource>,
    verbose: bool,
) -> Result<HandoffRunner, Error> {
    let options = if verbose {
        HandoffOptions::default().with_node_logging()
    } else {
        HandoffOptions::default()
    };
    Ok(HandoffRunner::with_options(
        triage_llm,
        storage_llm,
        classifier,
        tools,
        options,
    )?)
}

/// Builds OpenAI-backed triage and storage roles over the store in `config.data.data_dir`.
#[cfg(feature = "openai")]
pub async fn build_runner(config: &RunConfig) -> Result<HandoffRunner, Error> {
    use async_openai::config::OpenAIConfig;
    use rickbot::{handoff_tool_spec, ChatOpenAI, KeywordClassifier, LlmClassifier};

    use crate::config::ClassifierKind;

    let openai_config = OpenAIConfig::new()
        .with_api_key(&config.api_key)
        .with_api_base(&config.api_base);
    let chat = |tools: Option<Vec<rickbot::ToolSpec>>| {
        let mut llm = ChatOpenAI::with_config(openai_config.clone(), config.model.clone());
        if let Some(tools) = tools {
            llm = llm.with_tools(tools);
        }
        if let Some(t) = config.temperature {
            llm = llm.with_temperature(t);
        }
        llm
    };

    let tools = StorageToolSource::new(EntityStore::new(&config.data.data_dir));
    let mut storage_llm = chat(Some(tools.list_tools().await?));
    if let Some(mode) = config.tool_choice {
        storage_llm = storage_llm.with_tool_choice(mode);
    }
    let classifier: Arc<dyn IntentClassifier> = match config.classifier {
        ClassifierKind::Llm => Arc::new(LlmClassifier::new(Arc::new(chat(Some(vec![
            handoff_tool_spec(),
        ]))))),
        ClassifierKind::Keyword => Arc::new(KeywordClassifier::default()),
    };
    info!(model = %config.model, classifier = %config.classifier, "building runner");

    build_runner_with(
        Arc::new(chat(None)),
        Arc::new(storage_llm),
        classifier,
        Arc::new(tools),
        config.verbose,
    )
}

#[cfg(not(feature = "openai"))]
pub async fn build_runner(_config: &RunConfig) -> Result<HandoffRunner, Error> {
    Err("rickbot-cli was built without the openai feature".into())
}

/// GraphQL client for `data` with its configured timeout.
pub fn graphql_client(data: &DataConfig) -> Result<GraphqlClient, Error> {
    Ok(GraphqlClient::with_timeout(
        data.graphql_endpoint.clone(),
        Duration::from_secs(data.graphql_timeout_secs),
    )?)
}

/// Fetches all entity types when `locations.json` is missing. Returns whether it fetched.
pub async fn ensure_local_data(data: &DataConfig) -> Result<bool, Error> {
    let store = EntityStore::new(&data.data_dir);
    Ok(graphql_client(data)?.ensure_local_data(&store).await?)
}

/// Refreshes all three store files, overwriting them.
pub async fn run_fetch(data: &DataConfig) -> Result<(), Error> {
    let store = EntityStore::new(&data.data_dir);
    graphql_client(data)?.fetch_all(&store).await?;
    info!(dir = %data.data_dir.display(), "refreshed characters, locations and episodes");
    Ok(())
}

/// Answers one message in a fresh session, bootstrapping data first.
pub async fn run_ask(config: &RunConfig, message: &str) -> Result<TurnOutcome, Error> {
    ensure_local_data(&config.data).await?;
    let runner = build_runner(config).await?;
    let mut session = Session::new(SessionSettings::default());
    Ok(session.process_turn(&runner, message).await?)
}
