use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::error::PipelineError;

/// Message patterns excluded by default. Both belong to noisy checks that
/// stay useful once the chatter is filtered; pass `--no-default-excludes`
/// to see everything.
pub const DEFAULT_EXCLUDE_PATTERNS: &[&str] = &["TODO marker", "no final newline at end of file"];

/// Directory names skipped during file resolution unless overridden.
pub const DEFAULT_SKIP_DIRS: &[&str] = &["vendor", "node_modules", "third_party", "testdata"];

/// File extensions considered source code by default.
pub const DEFAULT_EXTENSIONS: &[&str] = &["rs", "go", "py", "js", "ts", "c", "h", "cpp", "java"];

/// Where change information for `--new`-style filtering comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeSource {
    /// Unstaged and staged edits relative to HEAD.
    WorkingTree,
    /// Edits relative to the given revision.
    Revision(String),
    /// A unified diff read from a file.
    PatchFile(PathBuf),
}

/// How finding paths are rendered in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathStyle {
    Relative,
    Absolute,
}

/// A single ordering criterion for the final report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    File,
    Line,
    Column,
    Analysis,
    Severity,
}

impl FromStr for SortKey {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "file" => Ok(SortKey::File),
            "line" => Ok(SortKey::Line),
            "column" => Ok(SortKey::Column),
            "analysis" => Ok(SortKey::Analysis),
            "severity" => Ok(SortKey::Severity),
            other => Err(PipelineError::UnknownSortKey(other.to_string())),
        }
    }
}

/// Tunables consumed by individual analyses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Settings {
    pub max_line_length: usize,
    pub max_blank_run: usize,
    pub max_file_lines: usize,
    pub dup_block_lines: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_line_length: 120,
            max_blank_run: 2,
            max_file_lines: 1000,
            dup_block_lines: 8,
        }
    }
}

/// Fully merged run configuration.
///
/// Defaults here are the engine's contract; file and flag layers override
/// individual fields before the config reaches the resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    // Enabled-set selection.
    pub enable: Vec<String>,
    pub disable: Vec<String>,
    pub enable_all: bool,
    pub disable_all: bool,
    pub presets: Vec<String>,
    pub fast_only: bool,

    // Execution.
    pub deadline: Duration,
    pub workers: usize,
    pub silence_output: bool,

    // Result pipeline.
    pub respect_suppressions: bool,
    pub exclude_patterns: Vec<String>,
    pub use_default_excludes: bool,
    pub dedup_same_line: bool,
    pub max_same_messages: usize,
    pub max_per_analysis: usize,
    pub max_per_file: usize,
    pub change_source: Option<ChangeSource>,
    pub sort_results: bool,
    pub sort_keys: Vec<SortKey>,
    pub path_style: PathStyle,

    // File resolution.
    pub roots: Vec<String>,
    pub skip_dirs: Vec<String>,
    pub extensions: Vec<String>,
    pub include_tests: bool,

    pub settings: Settings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enable: Vec::new(),
            disable: Vec::new(),
            enable_all: false,
            disable_all: false,
            presets: Vec::new(),
            fast_only: false,

            deadline: Duration::from_secs(60),
            workers: 0,
            silence_output: true,

            respect_suppressions: true,
            exclude_patterns: Vec::new(),
            use_default_excludes: true,
            dedup_same_line: true,
            max_same_messages: 3,
            max_per_analysis: 50,
            max_per_file: 0,
            change_source: None,
            sort_results: true,
            sort_keys: vec![SortKey::File, SortKey::Line, SortKey::Column],
            path_style: PathStyle::Relative,

            roots: vec!["./...".to_string()],
            skip_dirs: DEFAULT_SKIP_DIRS.iter().map(|s| s.to_string()).collect(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            include_tests: true,

            settings: Settings::default(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }
}
