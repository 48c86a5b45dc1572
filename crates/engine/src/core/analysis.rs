//! The analysis abstraction.
//!
//! An [`Analysis`] is a single diagnostic pass over the resolved file set.
//! Implementations stay oblivious to scheduling, deadlines, and result
//! processing; they read files (or the shared [`SourceIndex`]) and return
//! findings. Everything else is the engine's job.
//!
//! [`SourceIndex`]: crate::core::index::SourceIndex

use std::sync::Arc;

use crate::core::context::RunContext;
use crate::core::finding::Finding;

/// A single diagnostic pass.
///
/// Implementations must be thread-safe: the runner executes analyses on a
/// worker pool, and one instance may be checked concurrently with others
/// sharing the same [`RunContext`].
pub trait Analysis: Send + Sync {
    /// Canonical machine name, e.g. `"line-length"`.
    fn id(&self) -> &str;

    /// Human-readable summary shown in the catalog.
    fn description(&self) -> &'static str {
        "No description provided"
    }

    /// Runs the pass over the context's file set.
    ///
    /// Errors abort this analysis only; the runner records them and keeps
    /// the rest of the batch going.
    fn check(&self, ctx: &RunContext) -> anyhow::Result<Vec<Finding>>;
}

/// Relative execution cost, used by fast-only runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speed {
    Fast,
    Slow,
}

/// Catalog metadata wrapped around an [`Analysis`].
///
/// The descriptor owns everything the resolver needs to know without
/// running the pass: default state, cost class, aliases, and optional
/// group membership.
#[derive(Clone)]
pub struct AnalysisDescriptor {
    analysis: Arc<dyn Analysis>,
    enabled_by_default: bool,
    speed: Speed,
    needs_source_index: bool,
    aliases: Vec<String>,
    group: Option<String>,
}

impl AnalysisDescriptor {
    /// A descriptor for an analysis that runs unless disabled.
    pub fn enabled(analysis: Arc<dyn Analysis>) -> Self {
        Self {
            analysis,
            enabled_by_default: true,
            speed: Speed::Fast,
            needs_source_index: false,
            aliases: Vec::new(),
            group: None,
        }
    }

    /// A descriptor for an analysis that runs only when asked for.
    pub fn disabled(analysis: Arc<dyn Analysis>) -> Self {
        Self {
            enabled_by_default: false,
            ..Self::enabled(analysis)
        }
    }

    pub fn with_alias(mut self, alias: &str) -> Self {
        self.aliases.push(alias.to_string());
        self
    }

    pub fn with_group(mut self, group: &str) -> Self {
        self.group = Some(group.to_string());
        self
    }

    pub fn slow(mut self) -> Self {
        self.speed = Speed::Slow;
        self
    }

    pub fn with_source_index(mut self) -> Self {
        self.needs_source_index = true;
        self
    }

    pub fn name(&self) -> String {
        self.analysis.id().to_string()
    }

    pub fn description(&self) -> &'static str {
        self.analysis.description()
    }

    pub fn analysis(&self) -> &Arc<dyn Analysis> {
        &self.analysis
    }

    pub fn enabled_by_default(&self) -> bool {
        self.enabled_by_default
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    pub fn is_slow(&self) -> bool {
        self.speed == Speed::Slow
    }

    pub fn needs_source_index(&self) -> bool {
        self.needs_source_index
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }
}

impl std::fmt::Debug for AnalysisDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisDescriptor")
            .field("name", &self.analysis.id())
            .field("enabled_by_default", &self.enabled_by_default)
            .field("speed", &self.speed)
            .field("needs_source_index", &self.needs_source_index)
            .field("aliases", &self.aliases)
            .field("group", &self.group)
            .finish()
    }
}
