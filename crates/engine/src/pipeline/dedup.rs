use std::collections::{HashMap, HashSet};

use crate::core::{Finding, PipelineError};
use crate::pipeline::Processor;

/// Collapses findings sharing (file, line) and caps repeats of identical
/// message text.
///
/// Line collapsing keeps the first finding seen for a position regardless
/// of which analysis produced it. The message cap keeps the first N
/// occurrences of each exact message; zero disables it.
pub struct Deduplicator {
    same_line: bool,
    max_same_messages: usize,
}

impl Deduplicator {
    pub fn new(same_line: bool, max_same_messages: usize) -> Self {
        Self {
            same_line,
            max_same_messages,
        }
    }
}

impl Processor for Deduplicator {
    fn name(&self) -> &'static str {
        "dedup"
    }

    fn process(&self, findings: Vec<Finding>) -> Result<Vec<Finding>, PipelineError> {
        let mut current = findings;

        if self.same_line {
            let mut seen: HashSet<(String, usize)> = HashSet::new();
            current.retain(|finding| seen.insert((finding.file.clone(), finding.line)));
        }

        if self.max_same_messages > 0 {
            let mut counts: HashMap<String, usize> = HashMap::new();
            current.retain(|finding| {
                let count = counts.entry(finding.message.clone()).or_insert(0);
                *count += 1;
                *count <= self.max_same_messages
            });
        }

        Ok(current)
    }
}
