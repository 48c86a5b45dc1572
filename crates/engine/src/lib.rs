//! lintmux orchestration engine
//!
//! lintmux runs many small source analyses as one batch: a capability
//! registry describes what exists, the resolver turns configuration into
//! the exact active set, the runner executes that set concurrently with
//! crash isolation and a batch deadline, and the result pipeline distills
//! raw findings into a deterministic, de-duplicated, ordered report.
//!
//! The layers only meet through data: descriptors flow from the registry
//! through the resolver into the runner, findings flow from the runner
//! through the pipeline to the caller. Adding an analysis touches the
//! catalog in [`analyses`] and nothing else.

pub mod analyses;
pub mod core;
pub mod pipeline;
pub mod providers;
pub mod registry;
pub mod resolve;
pub mod run;

pub use self::core::{
    Analysis, AnalysisDescriptor, ChangeSource, Config, ConfigError, Finding, PathStyle,
    PipelineError, ProviderError, RunContext, Settings, SortKey, SourceIndex, Speed,
};
pub use analyses::builtin_registry;
pub use pipeline::{ChangeSet, ChangedLines, Pipeline, Processor, Verdict};
pub use providers::{collect_changes, FileResolver, ResolvedPaths};
pub use registry::{Registry, RegistryBuilder};
pub use resolve::resolve;
pub use run::{AnalysisStatus, Outcome, RunReport, Runner};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_wired() {
        assert!(!VERSION.is_empty());
    }
}
