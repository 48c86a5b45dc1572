use std::path::PathBuf;
use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::core::config::{Config, Settings};
use crate::core::index::SourceIndex;

/// Shared, read-only state handed to every analysis in a run.
///
/// The context is assembled once after file resolution and then frozen;
/// analyses on different workers borrow the same instance.
pub struct RunContext {
    files: Vec<PathBuf>,
    config: Arc<Config>,
    index: OnceCell<Arc<SourceIndex>>,
}

impl RunContext {
    pub fn new(files: Vec<PathBuf>, config: Arc<Config>) -> Self {
        Self {
            files,
            config,
            index: OnceCell::new(),
        }
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn settings(&self) -> &Settings {
        &self.config.settings
    }

    /// The cross-file index, built on first use.
    ///
    /// Concurrent callers block until the single construction finishes and
    /// then share one snapshot.
    pub fn source_index(&self) -> Arc<SourceIndex> {
        self.index
            .get_or_init(|| Arc::new(SourceIndex::build(&self.files)))
            .clone()
    }
}
