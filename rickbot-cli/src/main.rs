//! rickbot binary: chat shell, one-shot ask, data refresh and offline evaluation.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rickbot::ToolChoiceMode;
use rickbot_cli::{
    format_eval_report, init_logging, run_ask, run_chat, run_eval, run_fetch, ClassifierKind,
    DataConfig, Error, RunConfig, RunOptions,
};

#[derive(Parser, Debug)]
#[command(name = "rickbot")]
#[command(about = "Chat about Rick & Morty characters, episodes and locations")]
struct Cli {
    /// Log node enter/exit and library debug events to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Model for both roles (overrides OPENAI_MODEL)
    #[arg(long, global = true)]
    model: Option<String>,

    /// Sampling temperature 0-2 (overrides OPENAI_TEMPERATURE)
    #[arg(long, global = true)]
    temperature: Option<f32>,

    /// Storage role tool choice: auto, none or required
    #[arg(long, global = true)]
    tool_choice: Option<ToolChoiceMode>,

    /// Hand-off classifier: llm or keyword
    #[arg(long, global = true)]
    classifier: Option<ClassifierKind>,

    /// Directory holding characters.json, episodes.json, locations.json
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// GraphQL endpoint (overrides GRAPHQL_ENDPOINT)
    #[arg(long, global = true, value_name = "URL")]
    graphql_endpoint: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive chat (default)
    Chat,
    /// Answer one message and exit
    Ask {
        #[arg(trailing_var_arg = true, required = true)]
        message: Vec<String>,
    },
    /// Re-fetch all entity files from the GraphQL endpoint
    Fetch,
    /// Run the built-in goldens and print a report
    Eval,
}

impl Cli {
    fn options(&self) -> RunOptions {
        RunOptions {
            model: self.model.clone(),
            temperature: self.temperature,
            tool_choice: self.tool_choice,
            classifier: self.classifier,
            data_dir: self.data_dir.clone(),
            graphql_endpoint: self.graphql_endpoint.clone(),
            verbose: self.verbose,
        }
    }
}

fn run_config(options: &RunOptions) -> Result<RunConfig, Error> {
    let mut config = RunConfig::from_env()?;
    config.apply_options(options);
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let options = cli.options();

    match cli.command.unwrap_or(Command::Chat) {
        Command::Chat => run_chat(&run_config(&options)?).await?,
        Command::Ask { message } => {
            let message = message.join(" ").trim().to_string();
            let outcome = run_ask(&run_config(&options)?, &message).await?;
            for call in &outcome.tool_invocations {
                eprintln!("[tool] {} {} {}", call.role, call.name, call.arguments);
            }
            println!("{}", outcome.reply);
        }
        Command::Fetch => {
            let mut data = DataConfig::from_env();
            data.apply_options(&options);
            run_fetch(&data).await?;
            println!("Fetched characters, locations and episodes into {}", data.data_dir.display());
        }
        Command::Eval => {
            let cases = run_eval(&run_config(&options)?).await?;
            println!("{}", format_eval_report(&cases));
        }
    }
    Ok(())
}
