use std::collections::{BTreeSet, HashMap};

use crate::core::{Finding, PipelineError};
use crate::pipeline::Processor;

/// Source of per-file added-line sets for incremental filtering.
pub trait ChangedLines: Send + Sync {
    /// Added line numbers for the given file, or `None` when the file has
    /// no recorded changes.
    fn added_lines(&self, file: &str) -> Option<&BTreeSet<usize>>;
}

/// Concrete change data collected from a diff provider.
#[derive(Debug, Default, Clone)]
pub struct ChangeSet {
    files: HashMap<String, BTreeSet<usize>>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, file: &str, line: usize) {
        self.files.entry(file.to_string()).or_default().insert(line);
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}

impl ChangedLines for ChangeSet {
    fn added_lines(&self, file: &str) -> Option<&BTreeSet<usize>> {
        self.files.get(file)
    }
}

/// Keeps only findings on lines added in the current change.
pub struct DiffFilter {
    changes: Box<dyn ChangedLines>,
}

impl DiffFilter {
    pub fn new(changes: Box<dyn ChangedLines>) -> Self {
        Self { changes }
    }
}

impl Processor for DiffFilter {
    fn name(&self) -> &'static str {
        "diff"
    }

    fn process(&self, findings: Vec<Finding>) -> Result<Vec<Finding>, PipelineError> {
        Ok(findings
            .into_iter()
            .filter(|finding| {
                self.changes
                    .added_lines(&finding.file)
                    .map_or(false, |lines| lines.contains(&finding.line))
            })
            .collect())
    }
}
