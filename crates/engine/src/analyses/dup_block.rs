use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use crate::core::{Analysis, Finding, RunContext};

/// Cross-file duplicate detection over the shared source index.
///
/// Slides a window of `dup-block-lines` hashed lines over every indexed
/// file and reports later windows matching an earlier one. Windows made
/// up mostly of blank or trivial lines are skipped, and a window
/// overlapping its own first occurrence (a run of identical lines) is not
/// a duplicate.
pub struct DupBlock;

fn substantial(window: &[String]) -> bool {
    let solid = window.iter().filter(|line| line.trim().len() >= 3).count();
    solid * 2 >= window.len()
}

fn window_key(hashes: &[u64]) -> u64 {
    let mut hasher = DefaultHasher::new();
    hashes.hash(&mut hasher);
    hasher.finish()
}

impl Analysis for DupBlock {
    fn id(&self) -> &str {
        "dup-block"
    }

    fn description(&self) -> &'static str {
        "Reports blocks of lines duplicated elsewhere in the target set"
    }

    fn check(&self, ctx: &RunContext) -> anyhow::Result<Vec<Finding>> {
        let window = ctx.settings().dup_block_lines;
        let index = ctx.source_index();
        let mut findings = Vec::new();
        let mut seen: HashMap<u64, (usize, usize)> = HashMap::new();

        for (file_number, file) in index.files().iter().enumerate() {
            let lines = file.lines();
            let hashes = file.line_hashes();

            let mut at = 0usize;
            while at + window <= hashes.len() {
                if !substantial(&lines[at..at + window]) {
                    at += 1;
                    continue;
                }

                let key = window_key(&hashes[at..at + window]);
                match seen.get(&key) {
                    Some(&(first_file, first_at)) => {
                        if first_file == file_number && at < first_at + window {
                            // Overlapping repeat of itself.
                            at += 1;
                            continue;
                        }
                        let original = &index.files()[first_file];
                        let identical = original.lines()[first_at..first_at + window]
                            .iter()
                            .zip(&lines[at..at + window])
                            .all(|(a, b)| a.trim_end() == b.trim_end());
                        if !identical {
                            at += 1;
                            continue;
                        }
                        findings.push(
                            Finding::new(
                                self.id().to_string(),
                                file.path().display().to_string(),
                                at + 1,
                                format!(
                                    "duplicate of {} lines first seen at {}:{}",
                                    window,
                                    original.path().display(),
                                    first_at + 1
                                ),
                            )
                            .with_column(1)
                            .with_severity("medium"),
                        );
                        at += window;
                    }
                    None => {
                        seen.insert(key, (file_number, at));
                        at += 1;
                    }
                }
            }
        }

        Ok(findings)
    }
}
