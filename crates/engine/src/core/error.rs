use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Configuration problems that make the requested run unsatisfiable.
///
/// These are terminal: the run aborts before any analysis executes, so a
/// typo in an analysis name can never silently shrink the enabled set.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no such analysis {0:?}")]
    UnknownAnalysis(String),

    #[error("enable-all and disable-all must not be combined")]
    ConflictingOptions,

    #[error("all analyses were disabled, but none was enabled: must enable at least one")]
    NothingEnabled,

    #[error("analysis {0:?} can't be disabled and enabled at one moment")]
    ContradictoryToggle(String),

    #[error("no such preset {0:?}")]
    UnknownPreset(String),
}

/// Failures while constructing or executing the result pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid exclude pattern {pattern:?}: {source}")]
    BadExcludePattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("unknown sort key {0:?}")]
    UnknownSortKey(String),
}

/// Failures while resolving target files or collecting change data.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("no paths are set")]
    NoRoots,

    #[error("can't find path {path:?}: {source}")]
    Missing {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid skip-dirs pattern {pattern:?}: {source}")]
    BadSkipPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("can't walk directory {dir:?}: {source}")]
    Walk {
        dir: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("can't run {command:?}: {message}")]
    Vcs { command: String, message: String },

    #[error("can't read patch file {path:?}: {source}")]
    Patch {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed hunk header {0:?}")]
    BadHunk(String),
}
