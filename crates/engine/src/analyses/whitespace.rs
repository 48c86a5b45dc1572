//! The whitespace group: three small checks that usually travel together
//! and are coalesced into one pack when two or more are active.

use crate::analyses::read_source;
use crate::core::{Analysis, Finding, RunContext};

/// Flags whitespace hanging off the end of a line.
pub struct TrailingSpace;

impl Analysis for TrailingSpace {
    fn id(&self) -> &str {
        "trailing-space"
    }

    fn description(&self) -> &'static str {
        "Reports trailing whitespace at line ends"
    }

    fn check(&self, ctx: &RunContext) -> anyhow::Result<Vec<Finding>> {
        let mut findings = Vec::new();
        for path in ctx.files() {
            let Some(content) = read_source(path) else {
                continue;
            };
            let file = path.display().to_string();
            for (number, line) in content.lines().enumerate() {
                let trimmed = line.trim_end();
                if trimmed.len() != line.len() {
                    findings.push(
                        Finding::new(
                            self.id().to_string(),
                            file.clone(),
                            number + 1,
                            "trailing whitespace".to_string(),
                        )
                        .with_column(trimmed.chars().count() + 1)
                        .with_severity("low"),
                    );
                }
            }
        }
        Ok(findings)
    }
}

/// Flags runs of blank lines longer than `max-blank-run`.
pub struct BlankRuns;

impl Analysis for BlankRuns {
    fn id(&self) -> &str {
        "blank-runs"
    }

    fn description(&self) -> &'static str {
        "Reports overly long runs of consecutive blank lines"
    }

    fn check(&self, ctx: &RunContext) -> anyhow::Result<Vec<Finding>> {
        let limit = ctx.settings().max_blank_run;
        let mut findings = Vec::new();

        for path in ctx.files() {
            let Some(content) = read_source(path) else {
                continue;
            };
            let file = path.display().to_string();

            let mut run_start = 0usize;
            let mut run_length = 0usize;
            for (number, line) in content.lines().enumerate() {
                if line.trim().is_empty() {
                    if run_length == 0 {
                        run_start = number + 1;
                    }
                    run_length += 1;
                } else {
                    if run_length > limit {
                        findings.push(blank_run_finding(&file, run_start, run_length, limit));
                    }
                    run_length = 0;
                }
            }
            if run_length > limit {
                findings.push(blank_run_finding(&file, run_start, run_length, limit));
            }
        }

        Ok(findings)
    }
}

fn blank_run_finding(file: &str, start: usize, length: usize, limit: usize) -> Finding {
    Finding::new(
        "blank-runs".to_string(),
        file.to_string(),
        start,
        format!("{length} consecutive blank lines (limit {limit})"),
    )
    .with_column(1)
    .with_severity("low")
}

/// Flags files whose last line has no terminating newline.
pub struct FinalNewline;

impl Analysis for FinalNewline {
    fn id(&self) -> &str {
        "final-newline"
    }

    fn description(&self) -> &'static str {
        "Reports files missing a final newline"
    }

    fn check(&self, ctx: &RunContext) -> anyhow::Result<Vec<Finding>> {
        let mut findings = Vec::new();
        for path in ctx.files() {
            let Some(content) = read_source(path) else {
                continue;
            };
            if !content.is_empty() && !content.ends_with('\n') {
                findings.push(
                    Finding::new(
                        self.id().to_string(),
                        path.display().to_string(),
                        content.lines().count(),
                        "no final newline at end of file".to_string(),
                    )
                    .with_severity("low"),
                );
            }
        }
        Ok(findings)
    }
}
