//! rickbot-cli library: config, logging and run logic behind the `rickbot` binary.
//!
//! Reads OpenAI and data settings from .env, builds the triage/storage hand-off
//! runner and drives it from a terminal chat loop, a one-shot ask, or the
//! offline evaluation.
//!
//! ## Usage
//!
//! ```rust,no_run,ignore
//! dotenv::dotenv().ok();
//! let config = rickbot_cli::RunConfig::from_env()?;
//! let outcome = rickbot_cli::run_ask(&config, "Who lives on Purge Planet?").await?;
//! println!("{}", outcome.reply);
//! ```

mod config;
mod logging;
mod middleware;
mod run;

pub use config::{ClassifierKind, DataConfig, Error, RunConfig, RunOptions};
pub use logging::{default_filter, init_logging};
pub use middleware::{LoggingMiddleware, WithNodeLogging};
pub use rickbot::{Message, TurnOutcome};
pub use run::{
    build_runner, build_runner_with, chat_loop, ensure_local_data, format_eval_report,
    graphql_client, run_ask, run_chat, run_eval, run_eval_with, run_fetch,
    EVALUATION_HINT,
};

#[cfg(test)]
mod tests;
