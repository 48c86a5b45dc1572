use std::collections::HashMap;

use crate::core::{Finding, PipelineError};
use crate::pipeline::Processor;

/// Caps the number of findings kept per analysis and per file.
///
/// Both caps keep the first N findings in input order; zero disables the
/// corresponding cap.
pub struct VolumeCapper {
    max_per_analysis: usize,
    max_per_file: usize,
}

impl VolumeCapper {
    pub fn new(max_per_analysis: usize, max_per_file: usize) -> Self {
        Self {
            max_per_analysis,
            max_per_file,
        }
    }
}

impl Processor for VolumeCapper {
    fn name(&self) -> &'static str {
        "volume-cap"
    }

    fn process(&self, findings: Vec<Finding>) -> Result<Vec<Finding>, PipelineError> {
        let mut current = findings;

        if self.max_per_analysis > 0 {
            let mut counts: HashMap<String, usize> = HashMap::new();
            let cap = self.max_per_analysis;
            current.retain(|finding| {
                let count = counts.entry(finding.analysis.clone()).or_insert(0);
                *count += 1;
                *count <= cap
            });
        }

        if self.max_per_file > 0 {
            let mut counts: HashMap<String, usize> = HashMap::new();
            let cap = self.max_per_file;
            current.retain(|finding| {
                let count = counts.entry(finding.file.clone()).or_insert(0);
                *count += 1;
                *count <= cap
            });
        }

        Ok(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from(analysis: &str, file: &str, line: usize) -> Finding {
        Finding::new(
            analysis.to_string(),
            file.to_string(),
            line,
            "message".to_string(),
        )
    }

    #[test]
    fn test_per_analysis_cap_keeps_first_n() {
        let capper = VolumeCapper::new(2, 0);
        let input: Vec<Finding> = (1..=4).map(|line| from("line-length", "a.rs", line)).collect();
        let kept = capper.process(input).unwrap();

        let lines: Vec<usize> = kept.iter().map(|f| f.line).collect();
        assert_eq!(lines, [1, 2]);
    }

    #[test]
    fn test_per_file_cap_is_independent_of_analysis() {
        let capper = VolumeCapper::new(0, 1);
        let kept = capper
            .process(vec![
                from("line-length", "a.rs", 1),
                from("mixed-indent", "a.rs", 2),
                from("line-length", "b.rs", 1),
            ])
            .unwrap();

        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].file, "a.rs");
        assert_eq!(kept[1].file, "b.rs");
    }

    #[test]
    fn test_zero_disables_both_caps() {
        let capper = VolumeCapper::new(0, 0);
        let input: Vec<Finding> = (1..=10).map(|line| from("line-length", "a.rs", line)).collect();
        let kept = capper.process(input.clone()).unwrap();

        assert_eq!(kept, input);
    }
}
