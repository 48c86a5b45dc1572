//! Report rendering: colored text for humans, JSON for machines.

use colored::Colorize;
use lintmux_engine::{AnalysisStatus, Outcome, Verdict};

pub struct Printer {
    json: bool,
}

impl Printer {
    pub fn new(json: bool, no_color: bool) -> Self {
        if no_color {
            colored::control::set_override(false);
        }
        Self { json }
    }

    pub fn print(&self, verdict: &Verdict) -> anyhow::Result<()> {
        if self.json {
            println!("{}", verdict.to_json()?);
            return Ok(());
        }

        if verdict.findings.is_empty() {
            println!("{}", "no issues found".green());
            return Ok(());
        }

        for finding in &verdict.findings {
            // Column 0 means the analysis could not pin one down.
            let position = if finding.column > 0 {
                format!("{}:{}:{}", finding.file, finding.line, finding.column)
            } else {
                format!("{}:{}", finding.file, finding.line)
            };
            println!(
                "{}: {} ({})",
                position.bold(),
                finding.message.red(),
                finding.analysis
            );
        }
        Ok(())
    }
}

/// Verbose-mode status table, one line per scheduled analysis. Goes to
/// stderr so report output stays clean.
pub fn print_statuses(statuses: &[AnalysisStatus]) {
    for status in statuses {
        let state = match &status.outcome {
            Outcome::Completed { findings } => {
                format!("ok, {findings} raw findings").green()
            }
            Outcome::Failed { error } => format!("failed: {error}").red(),
            Outcome::SkippedAfterDeadline => "skipped, deadline exceeded".yellow(),
        };
        let elapsed = format!("{:?}", status.elapsed);
        eprintln!("{elapsed:>12}  {}  {state}", status.name.bold());
    }
}
