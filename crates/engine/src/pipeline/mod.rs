//! Result pipeline
//!
//! Everything between raw runner output and the final report happens here,
//! in a fixed stage order: suppression filtering, pattern exclusion, path
//! normalization, de-duplication, incremental filtering, volume capping,
//! and the stable multi-key sort. Individual stages can be switched off by
//! configuration, but active stages never reorder because later ones
//! assume the invariants earlier ones establish. Findings themselves are
//! immutable in spirit: stages consume and return whole lists.
//!
//! The chain is idempotent: feeding a processed list through again changes
//! nothing, which keeps re-entry safe and makes the stages easy to reason
//! about in isolation.

pub mod cap;
pub mod dedup;
pub mod diff;
pub mod exclude;
pub mod paths;
pub mod sort;
pub mod suppress;

use serde::Serialize;

use crate::core::{Config, Finding, PipelineError, DEFAULT_EXCLUDE_PATTERNS};
use crate::registry::Registry;

pub use cap::VolumeCapper;
pub use dedup::Deduplicator;
pub use diff::{ChangeSet, ChangedLines, DiffFilter};
pub use exclude::PatternExcluder;
pub use paths::PathNormalizer;
pub use sort::{Sorter, SEVERITY_RANKING};
pub use suppress::SuppressionFilter;

/// One transformation stage over the finding list.
pub trait Processor: Send + Sync {
    fn name(&self) -> &'static str;

    fn process(&self, findings: Vec<Finding>) -> Result<Vec<Finding>, PipelineError>;
}

/// The final, processed report.
#[derive(Debug, Serialize)]
pub struct Verdict {
    pub findings: Vec<Finding>,
    pub any_findings: bool,
}

impl Verdict {
    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self).map_err(Into::into)
    }
}

/// Ordered processor chain assembled from configuration.
pub struct Pipeline {
    stages: Vec<Box<dyn Processor>>,
}

impl Pipeline {
    /// Builds the chain for a run. `changes` carries diff data when
    /// incremental filtering was requested; `None` leaves that stage out.
    pub fn from_config(
        config: &Config,
        registry: &Registry,
        changes: Option<ChangeSet>,
    ) -> Result<Self, PipelineError> {
        let mut stages: Vec<Box<dyn Processor>> = Vec::new();

        if config.respect_suppressions {
            stages.push(Box::new(SuppressionFilter::new(registry.alias_table())));
        }

        let mut patterns: Vec<String> = Vec::new();
        if config.use_default_excludes {
            patterns.extend(DEFAULT_EXCLUDE_PATTERNS.iter().map(|s| s.to_string()));
        }
        patterns.extend(config.exclude_patterns.iter().cloned());
        if !patterns.is_empty() {
            stages.push(Box::new(PatternExcluder::new(&patterns)?));
        }

        stages.push(Box::new(PathNormalizer::new(config.path_style)));
        stages.push(Box::new(Deduplicator::new(
            config.dedup_same_line,
            config.max_same_messages,
        )));

        if let Some(changes) = changes {
            stages.push(Box::new(DiffFilter::new(Box::new(changes))));
        }

        stages.push(Box::new(VolumeCapper::new(
            config.max_per_analysis,
            config.max_per_file,
        )));

        if config.sort_results {
            stages.push(Box::new(Sorter::new(config.sort_keys.clone())));
        }

        Ok(Self { stages })
    }

    /// Runs every stage in order. The first stage error aborts the run;
    /// later stages assume well-formed input, so no partial list is
    /// returned.
    pub fn run(&self, findings: Vec<Finding>) -> Result<Verdict, PipelineError> {
        let mut current = findings;
        for stage in &self.stages {
            let before = current.len();
            current = stage.process(current)?;
            if current.len() != before {
                tracing::debug!(
                    "processor {} kept {} of {} findings",
                    stage.name(),
                    current.len(),
                    before
                );
            }
        }

        let any_findings = !current.is_empty();
        Ok(Verdict {
            findings: current,
            any_findings,
        })
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }
}
