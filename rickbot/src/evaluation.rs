//! Offline evaluation: run golden questions through the hand-off graph and score tool use.
//!
//! Only the deterministic tool-call score is computed here; judging the
//! wording of a reply against `expected_output` is left to the reader of the report.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::handoff::{HandoffRunner, RunError};
use crate::tool_source::TOOL_READ_FROM_STORAGE;

/// A question with the tools it should trigger and the expected answer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Golden {
    pub input: String,
    pub expected_tools: Vec<String>,
    pub expected_output: String,
}

impl Golden {
    pub fn new(
        input: impl Into<String>,
        expected_tools: &[&str],
        expected_output: impl Into<String>,
    ) -> Self {
        Self {
            input: input.into(),
            expected_tools: expected_tools.iter().map(|t| t.to_string()).collect(),
            expected_output: expected_output.into(),
        }
    }
}

/// One evaluated golden: what the graph replied and which tools it called.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvalCase {
    pub golden: Golden,
    pub actual_output: String,
    pub tools_called: Vec<String>,
    pub tool_score: f64,
}

impl fmt::Display for EvalCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "input: {}", self.golden.input)?;
        writeln!(f, "expected output: {}", self.golden.expected_output)?;
        writeln!(f, "actual output: {}", self.actual_output)?;
        writeln!(
            f,
            "tools: expected [{}], called [{}]",
            self.golden.expected_tools.join(", "),
            self.tools_called.join(", ")
        )?;
        write!(f, "tool score: {:.2}", self.tool_score)
    }
}

/// Fraction of `expected` tool names present in `called`; 1.0 when nothing is expected.
pub fn tool_call_score<E, C>(expected: &[E], called: &[C]) -> f64
where
    E: AsRef<str>,
    C: AsRef<str>,
{
    if expected.is_empty() {
        return 1.0;
    }
    let hits = expected
        .iter()
        .filter(|e| called.iter().any(|c| c.as_ref() == e.as_ref()))
        .count();
    hits as f64 / expected.len() as f64
}

/// Runs every golden as a fresh single-turn conversation.
pub async fn run_goldens(
    runner: &HandoffRunner,
    goldens: &[Golden],
) -> Result<Vec<EvalCase>, RunError> {
    let mut cases = Vec::with_capacity(goldens.len());
    for golden in goldens {
        let state = runner.invoke(&[], &golden.input).await?;
        let tools_called: Vec<String> = state.tool_log.iter().map(|t| t.name.clone()).collect();
        let tool_score = tool_call_score(golden.expected_tools.as_slice(), tools_called.as_slice());
        info!(input = %golden.input, tool_score, "golden evaluated");
        cases.push(EvalCase {
            golden: golden.clone(),
            actual_output: state.last_assistant_reply().unwrap_or_default().to_string(),
            tools_called,
            tool_score,
        });
    }
    Ok(cases)
}

/// Built-in goldens for the Rick & Morty data set. Read-only, so an evaluation
/// run never annotates the store it is pointed at.
pub fn default_goldens() -> Vec<Golden> {
    vec![
        Golden::new(
            "Who lives on the location 'Purge Planet'?",
            &[TOOL_READ_FROM_STORAGE],
            "Arthricia, General Store Owner, Lighthouse Keeper, Purge Planet Ruler",
        ),
    ]
}
