//! In-code suppression directives.
//!
//! A comment containing `nolint` silences findings at its position. A bare
//! directive is a wildcard; `nolint:name,name` silences only the named
//! analyses (aliases are accepted). A directive sharing a line with code
//! covers that line alone. A directive on a line of its own covers the
//! following statement or block, resolved by indentation: the next line at
//! the same indent plus everything indented deeper beneath it.

use std::collections::HashMap;
use std::fs;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use regex::Regex;

use crate::core::{Finding, PipelineError};
use crate::pipeline::Processor;

static DIRECTIVE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(//|#|/\*|;|--)\s*nolint(:([A-Za-z0-9_\-,\s]+))?").unwrap()
});

/// One directive's resolved coverage, in 1-based inclusive lines.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SuppressionRange {
    start: usize,
    end: usize,
    /// Canonical analysis names; empty means wildcard.
    names: Vec<String>,
}

impl SuppressionRange {
    fn covers(&self, finding: &Finding) -> bool {
        if finding.line < self.start || finding.line > self.end {
            return false;
        }
        if self.names.is_empty() {
            return true;
        }
        self.names.iter().any(|name| {
            finding.analysis == *name || finding.analysis.starts_with(&format!("{name}.{{"))
        })
    }
}

/// Drops findings covered by a directive naming their analysis.
pub struct SuppressionFilter {
    aliases: HashMap<String, String>,
    cache: Mutex<HashMap<String, Arc<Vec<SuppressionRange>>>>,
}

impl SuppressionFilter {
    pub fn new(aliases: HashMap<String, String>) -> Self {
        Self {
            aliases,
            cache: Mutex::new(HashMap::new()),
        }
    }

    fn ranges_for(&self, file: &str) -> Arc<Vec<SuppressionRange>> {
        if let Some(ranges) = self.cache.lock().get(file) {
            return ranges.clone();
        }

        let ranges = match fs::read_to_string(file) {
            Ok(content) => Arc::new(parse_ranges(&content, &self.aliases)),
            Err(err) => {
                tracing::debug!("no suppression data for {file}: {err}");
                Arc::new(Vec::new())
            }
        };
        self.cache.lock().insert(file.to_string(), ranges.clone());
        ranges
    }

    fn suppressed(&self, finding: &Finding) -> bool {
        self.ranges_for(&finding.file)
            .iter()
            .any(|range| range.covers(finding))
    }
}

impl Processor for SuppressionFilter {
    fn name(&self) -> &'static str {
        "suppression"
    }

    fn process(&self, findings: Vec<Finding>) -> Result<Vec<Finding>, PipelineError> {
        Ok(findings
            .into_iter()
            .filter(|finding| !self.suppressed(finding))
            .collect())
    }
}

fn indent_of(line: &str) -> usize {
    line.chars().take_while(|c| *c == ' ' || *c == '\t').count()
}

fn is_closer(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|c| matches!(c, '}' | ')' | ']' | ';' | ','))
}

fn parse_ranges(content: &str, aliases: &HashMap<String, String>) -> Vec<SuppressionRange> {
    let lines: Vec<&str> = content.lines().collect();
    let mut ranges = Vec::new();

    for (number, line) in lines.iter().enumerate() {
        let Some(captures) = DIRECTIVE_RE.captures(line) else {
            continue;
        };

        let names: Vec<String> = captures
            .get(3)
            .map(|list| {
                list.as_str()
                    .split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(|name| {
                        aliases
                            .get(name)
                            .cloned()
                            .unwrap_or_else(|| name.to_string())
                    })
                    .collect()
            })
            .unwrap_or_default();

        let comment_start = captures.get(0).map(|m| m.start()).unwrap_or(0);
        let standalone = line[..comment_start].trim().is_empty();

        let mut end = number;
        if standalone {
            let indent = indent_of(line);
            let mut cursor = number + 1;
            let mut anchored = false;
            while cursor < lines.len() {
                let candidate = lines[cursor];
                if candidate.trim().is_empty() {
                    cursor += 1;
                    continue;
                }
                let candidate_indent = indent_of(candidate);
                if !anchored {
                    if candidate_indent >= indent {
                        anchored = true;
                        end = cursor;
                        cursor += 1;
                        continue;
                    }
                    break;
                }
                if candidate_indent > indent {
                    end = cursor;
                    cursor += 1;
                    continue;
                }
                // A lone closing bracket at the anchor's indent still
                // belongs to the covered block.
                if candidate_indent == indent && is_closer(candidate) {
                    end = cursor;
                }
                break;
            }
        }

        ranges.push(SuppressionRange {
            start: number + 1,
            end: end + 1,
            names,
        });
    }

    ranges
}
