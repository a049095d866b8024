//! # Run Subcommand
//!
//! Executes the built-in scenario suite against the mock backend and
//! prints one line per scenario (or the full report as JSON). The command
//! fails if any scenario misses its expectation.

use clap::Args;

use zkcall_harness::{run_builtin, HarnessConfig, SuiteReport};

/// Arguments for the run subcommand.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Print the suite report as JSON.
    #[arg(long)]
    pub json: bool,

    /// Share one verifier per circuit instead of deploying per scenario.
    #[arg(long)]
    pub shared_verifier: bool,

    /// Verify each calldata once only.
    #[arg(long)]
    pub skip_idempotence: bool,
}

impl RunArgs {
    /// Apply command-line overrides on top of the environment config.
    pub fn apply(&self, mut config: HarnessConfig) -> HarnessConfig {
        if self.shared_verifier {
            config.fresh_verifier = false;
        }
        if self.skip_idempotence {
            config.idempotence_check = false;
        }
        config
    }
}

/// Render a suite report as text, one line per scenario.
pub fn render(report: &SuiteReport) -> String {
    let mut lines: Vec<String> = report
        .scenarios
        .iter()
        .map(|s| {
            let verdict = if s.passed() { "PASS" } else { "FAIL" };
            let outcome = s.outcome.map_or("no answer".to_string(), |o| o.to_string());
            match &s.failure {
                None => format!("{verdict} {} (expect {}, got {outcome})", s.name, s.expectation),
                Some(why) => format!("{verdict} {} (expect {}, got {outcome}): {why}", s.name, s.expectation),
            }
        })
        .collect();
    let failed = report.failures().count();
    lines.push(format!(
        "{} scenarios, {} passed, {failed} failed",
        report.scenarios.len(),
        report.scenarios.len() - failed
    ));
    lines.join("\n")
}

/// Execute the run subcommand.
///
/// Returns the printed output and whether every scenario passed.
pub async fn run_suite(args: &RunArgs, config: HarnessConfig) -> anyhow::Result<(String, bool)> {
    let report = run_builtin(args.apply(config)).await;
    let output = if args.json {
        serde_json::to_string_pretty(&report)?
    } else {
        render(&report)
    };
    Ok((output, report.passed()))
}
