//! Concurrent execution of the active analysis set.
//!
//! The runner owns everything between "resolved set" and "raw findings":
//! worker-pool scheduling, the batch deadline, crash isolation, and the
//! silenced output window. Failure of one analysis never takes down the
//! batch; it is recorded in that analysis's status and the rest keep
//! running.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::{Duration, Instant};

use rayon::prelude::*;

use crate::core::{AnalysisDescriptor, Finding, RunContext};
use crate::run::silence::SilenceGuard;

/// Terminal state of one scheduled analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Completed { findings: usize },
    Failed { error: String },
    SkippedAfterDeadline,
}

/// Per-analysis execution record.
#[derive(Debug, Clone)]
pub struct AnalysisStatus {
    pub name: String,
    pub outcome: Outcome,
    pub elapsed: Duration,
}

/// Everything a batch produced: raw findings plus one status per analysis.
#[derive(Debug)]
pub struct RunReport {
    pub findings: Vec<Finding>,
    pub statuses: Vec<AnalysisStatus>,
    pub deadline_exceeded: bool,
}

/// Schedules analyses onto a dedicated worker pool.
pub struct Runner {
    workers: usize,
}

impl Runner {
    /// `workers == 0` sizes the pool to the number of available cores.
    pub fn new(workers: usize) -> Self {
        Self { workers }
    }

    /// Runs the whole active set against the context.
    ///
    /// Errors here are infrastructure failures (the pool could not be
    /// built); per-analysis failures are reported through statuses
    /// instead.
    pub fn run(&self, active: &[AnalysisDescriptor], ctx: &RunContext) -> anyhow::Result<RunReport> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .build()?;
        let deadline = Instant::now() + ctx.config().deadline;

        if active.iter().any(|entry| entry.needs_source_index()) {
            let index = ctx.source_index();
            tracing::debug!("prebuilt source index over {} files", index.files().len());
        }

        let _silence = if ctx.config().silence_output {
            match SilenceGuard::acquire() {
                Ok(guard) => Some(guard),
                Err(err) => {
                    tracing::warn!("output silencing unavailable: {err}");
                    None
                }
            }
        } else {
            None
        };

        let results: Vec<(Vec<Finding>, AnalysisStatus)> = pool.install(|| {
            active
                .par_iter()
                .map(|entry| run_one(entry, ctx, deadline))
                .collect()
        });

        let mut findings = Vec::new();
        let mut statuses = Vec::new();
        let mut any_skipped = false;
        for (batch, status) in results {
            if status.outcome == Outcome::SkippedAfterDeadline {
                any_skipped = true;
            }
            findings.extend(batch);
            statuses.push(status);
        }

        let deadline_exceeded = any_skipped || Instant::now() >= deadline;
        Ok(RunReport {
            findings,
            statuses,
            deadline_exceeded,
        })
    }
}

fn run_one(
    entry: &AnalysisDescriptor,
    ctx: &RunContext,
    deadline: Instant,
) -> (Vec<Finding>, AnalysisStatus) {
    let name = entry.name();

    if Instant::now() >= deadline {
        return (
            Vec::new(),
            AnalysisStatus {
                name,
                outcome: Outcome::SkippedAfterDeadline,
                elapsed: Duration::ZERO,
            },
        );
    }

    let started = Instant::now();
    let result = catch_unwind(AssertUnwindSafe(|| entry.analysis().check(ctx)));
    let elapsed = started.elapsed();
    tracing::debug!(
        "worker #{}: {} took {:?}",
        rayon::current_thread_index().unwrap_or(0),
        name,
        elapsed
    );

    let (findings, outcome) = match result {
        Ok(Ok(findings)) => {
            let count = findings.len();
            (findings, Outcome::Completed { findings: count })
        }
        Ok(Err(err)) => (
            Vec::new(),
            Outcome::Failed {
                error: err.to_string(),
            },
        ),
        Err(payload) => (
            Vec::new(),
            Outcome::Failed {
                error: panic_message(payload),
            },
        ),
    };

    (findings, AnalysisStatus { name, outcome, elapsed })
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("panic occurred: {message}")
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("panic occurred: {message}")
    } else {
        "panic occurred: unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_message_downcasts_common_payloads() {
        assert_eq!(
            panic_message(Box::new("boom")),
            "panic occurred: boom"
        );
        assert_eq!(
            panic_message(Box::new("boom".to_string())),
            "panic occurred: boom"
        );
        assert_eq!(panic_message(Box::new(17_u32)), "panic occurred: unknown panic");
    }
}
