//! Run config: API base, key, model, temperature, tool_choice, classifier. Filled from env / .env.
//!
//! Interacts with [`DataConfig`](super::DataConfig) and [`build_runner`](crate::build_runner).

use std::fmt;
use std::str::FromStr;

use rickbot::ToolChoiceMode;

use super::{DataConfig, RunOptions};

/// Error type used for config loading and runs.
pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// Which intent classifier decides the triage hand-off.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ClassifierKind {
    /// The triage model calls `transfer_to_storage_agent`.
    #[default]
    Llm,
    /// Deterministic keyword match; no extra model call.
    Keyword,
}

impl FromStr for ClassifierKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "llm" => Ok(Self::Llm),
            "keyword" => Ok(Self::Keyword),
            _ => Err(format!("unknown classifier: {} (use llm or keyword)", s)),
        }
    }
}

impl fmt::Display for ClassifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Llm => f.write_str("llm"),
            Self::Keyword => f.write_str("keyword"),
        }
    }
}

/// Everything needed to build the hand-off runner.
#[derive(Clone, Debug)]
pub struct RunConfig {
    /// OpenAI API base URL, e.g. `https://api.openai.com/v1`.
    pub api_base: String,
    pub api_key: String,
    /// Model name for both roles. Default: `gpt-5`.
    pub model: String,
    /// Sampling temperature 0-2. Default: unset (use API default).
    pub temperature: Option<f32>,
    /// Tool choice for the storage role.
    pub tool_choice: Option<ToolChoiceMode>,
    pub classifier: ClassifierKind,
    pub data: DataConfig,
    /// When true, log node enter/exit.
    pub verbose: bool,
}

impl RunConfig {
    /// Fill config from env vars (and .env). Call `dotenv::dotenv().ok()` first.
    ///
    /// `OPENAI_API_KEY` required; `OPENAI_API_BASE`, `OPENAI_MODEL`, `CLASSIFIER` have defaults.
    /// `OPENAI_TEMPERATURE`, `OPENAI_TOOL_CHOICE` (auto|none|required) optional.
    /// Data settings come from [`DataConfig::from_env`].
    pub fn from_env() -> Result<Self, Error> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "OPENAI_API_KEY is not set; please configure it in .env",
            )
        })?;
        let api_base = std::env::var("OPENAI_API_BASE")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());
        let model = std::env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-5".to_string());
        let temperature = std::env::var("OPENAI_TEMPERATURE")
            .ok()
            .and_then(|s| s.parse().ok());
        let tool_choice = std::env::var("OPENAI_TOOL_CHOICE")
            .ok()
            .and_then(|s| s.parse().ok());
        let classifier = std::env::var("CLASSIFIER")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default();
        Ok(Self {
            api_base,
            api_key,
            model,
            temperature,
            tool_choice,
            classifier,
            data: DataConfig::from_env(),
            verbose: false,
        })
    }

    /// Apply optional overrides from `RunOptions` to this config.
    pub fn apply_options(&mut self, options: &RunOptions) {
        if let Some(m) = &options.model {
            self.model = m.clone();
        }
        if let Some(t) = options.temperature {
            self.temperature = Some(t);
        }
        if let Some(tc) = options.tool_choice {
            self.tool_choice = Some(tc);
        }
        if let Some(c) = options.classifier {
            self.classifier = c;
        }
        self.data.apply_options(options);
        self.verbose = options.verbose;
    }
}
