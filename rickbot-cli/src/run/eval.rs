//! Offline evaluation run over the built-in goldens.

use rickbot::{default_goldens, run_goldens, EvalCase, HandoffRunner};

use crate::config::{DataConfig, Error, RunConfig};

use super::{build_runner, ensure_local_data};

/// Runs [`default_goldens`] against the configured runner.
pub async fn run_eval(config: &RunConfig) -> Result<Vec<EvalCase>, Error> {
    let runner = build_runner(config).await?;
    run_eval_with(&runner, &config.data).await
}

/// Bootstraps `data` if needed, then runs [`default_goldens`] through `runner`.
pub async fn run_eval_with(
    runner: &HandoffRunner,
    data: &DataConfig,
) -> Result<Vec<EvalCase>, Error> {
    ensure_local_data(data).await?;
    Ok(run_goldens(runner, &default_goldens()).await?)
}

/// Plain-text report: one block per case, then the mean tool score.
pub fn format_eval_report(cases: &[EvalCase]) -> String {
    let mut report = String::new();
    for (i, case) in cases.iter().enumerate() {
        report.push_str(&format!("case {}\n{}\n\n", i + 1, case));
    }
    let mean = if cases.is_empty() {
        0.0
    } else {
        cases.iter().map(|c| c.tool_score).sum::<f64>() / cases.len() as f64
    };
    report.push_str(&format!("mean tool score: {:.2} over {} case(s)", mean, cases.len()));
    report
}
