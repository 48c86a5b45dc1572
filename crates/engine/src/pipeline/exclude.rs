use regex::{Regex, RegexSet};

use crate::core::{Finding, PipelineError};
use crate::pipeline::Processor;

/// Drops findings whose message matches any configured exclusion pattern.
///
/// Patterns are compiled into one combined matcher; a malformed pattern is
/// a terminal pipeline error reported with the offending pattern.
#[derive(Debug)]
pub struct PatternExcluder {
    set: RegexSet,
}

impl PatternExcluder {
    pub fn new(patterns: &[String]) -> Result<Self, PipelineError> {
        match RegexSet::new(patterns) {
            Ok(set) => Ok(Self { set }),
            Err(err) => {
                for pattern in patterns {
                    if let Err(source) = Regex::new(pattern) {
                        return Err(PipelineError::BadExcludePattern {
                            pattern: pattern.clone(),
                            source,
                        });
                    }
                }
                Err(PipelineError::BadExcludePattern {
                    pattern: patterns.join(" "),
                    source: err,
                })
            }
        }
    }
}

impl Processor for PatternExcluder {
    fn name(&self) -> &'static str {
        "exclude"
    }

    fn process(&self, findings: Vec<Finding>) -> Result<Vec<Finding>, PipelineError> {
        Ok(findings
            .into_iter()
            .filter(|finding| !self.set.is_match(&finding.message))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(text: &str) -> Finding {
        Finding::new(
            "line-length".to_string(),
            "lib.rs".to_string(),
            1,
            text.to_string(),
        )
    }

    #[test]
    fn test_matching_messages_are_dropped() {
        let excluder = PatternExcluder::new(&["TODO marker".to_string()]).unwrap();
        let kept = excluder
            .process(vec![
                message("TODO marker: fix later"),
                message("trailing whitespace"),
            ])
            .unwrap();

        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].message, "trailing whitespace");
    }

    #[test]
    fn test_bad_pattern_is_reported_with_its_text() {
        let err = PatternExcluder::new(&["ok".to_string(), "(unclosed".to_string()]).unwrap_err();
        match err {
            PipelineError::BadExcludePattern { pattern, .. } => {
                assert_eq!(pattern, "(unclosed");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
