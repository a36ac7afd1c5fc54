//! Interactive chat shell: one session per process, one turn per input line.

use std::io::Write;

use rickbot::{requests_evaluation, HandoffRunner, Session, SessionSettings, TurnOutcome};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::warn;

use crate::config::{Error, RunConfig};

use super::{build_runner, ensure_local_data};

/// Printed instead of running a turn when the user mentions evaluation.
pub const EVALUATION_HINT: &str = "If you'd like to run the offline evaluation, run: rickbot eval";

fn print_outcome<W: Write>(
    out: &mut W,
    settings: SessionSettings,
    outcome: &TurnOutcome,
) -> std::io::Result<()> {
    if settings.show_tool_execution {
        for call in &outcome.tool_invocations {
            writeln!(out, "[tool] {} {} {}", call.role, call.name, call.arguments)?;
        }
    }
    if settings.show_reasoning_summary && !outcome.tool_invocations.is_empty() {
        writeln!(
            out,
            "[summary] handed off to storage, {} tool call(s)",
            outcome.tool_invocations.len()
        )?;
    }
    writeln!(out, "[Assistant] {}", outcome.reply)
}

/// Reads lines from `input` until EOF or `exit`/`quit`, running each through `session`.
///
/// Turn errors are printed and the session continues. Returns the number of turns run.
pub async fn chat_loop<R, W>(
    runner: &HandoffRunner,
    session: &mut Session,
    input: R,
    out: &mut W,
) -> Result<usize, Error>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    let mut turns = 0;
    loop {
        write!(out, "> ")?;
        out.flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }
        if requests_evaluation(line) {
            writeln!(out, "{}", EVALUATION_HINT)?;
            continue;
        }
        match session.process_turn(runner, line).await {
            Ok(outcome) => {
                turns += 1;
                print_outcome(out, session.settings(), &outcome)?;
            }
            Err(e) => {
                warn!(error = %e, "turn failed");
                writeln!(out, "error: {}", e)?;
            }
        }
    }
    Ok(turns)
}

/// Bootstraps data, builds the runner and chats over stdin/stdout.
pub async fn run_chat(config: &RunConfig) -> Result<(), Error> {
    if ensure_local_data(&config.data).await? {
        eprintln!("Fetched characters, locations and episodes into {}", config.data.data_dir.display());
    }
    let runner = build_runner(config).await?;
    let mut session = Session::new(SessionSettings::default());
    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    chat_loop(&runner, &mut session, stdin, &mut stdout).await?;
    Ok(())
}
