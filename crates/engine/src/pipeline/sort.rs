//! Stable multi-key ordering of the final report.
//!
//! Comparisons are four-valued: a key comparator may answer Less, Equal,
//! Greater, or Incomparable. The chain falls through to the next key only
//! on the neutral outcomes (Equal, Incomparable), never on a decisive one,
//! so a finding with an unknown column or unranked severity is left where
//! the earlier keys and input order put it rather than being reordered
//! past a decisive comparison.

use std::cmp::Ordering;

use crate::core::{Finding, PipelineError, SortKey};
use crate::pipeline::Processor;

/// Severity vocabulary ordered from least to most severe. Values outside
/// this list compare lexically against everything.
pub const SEVERITY_RANKING: [&str; 5] = ["low", "medium", "high", "warning", "error"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cmp {
    Less,
    Equal,
    Greater,
    Incomparable,
}

impl Cmp {
    fn is_neutral(self) -> bool {
        matches!(self, Cmp::Equal | Cmp::Incomparable)
    }

    fn from_ordering(ordering: Ordering) -> Self {
        match ordering {
            Ordering::Less => Cmp::Less,
            Ordering::Equal => Cmp::Equal,
            Ordering::Greater => Cmp::Greater,
        }
    }
}

fn severity_rank(value: &str) -> Option<usize> {
    SEVERITY_RANKING.iter().position(|known| *known == value)
}

fn compare_severity(a: &Finding, b: &Finding) -> Cmp {
    let left = a.severity.as_deref().unwrap_or("");
    let right = b.severity.as_deref().unwrap_or("");
    match (severity_rank(left), severity_rank(right)) {
        (Some(left_rank), Some(right_rank)) => Cmp::from_ordering(left_rank.cmp(&right_rank)),
        _ => Cmp::from_ordering(left.cmp(right)),
    }
}

/// Zero means "position unknown"; such values compare as Incomparable so
/// the chain moves on instead of inventing an order.
fn compare_numbers(a: usize, b: usize) -> Cmp {
    if a == 0 || b == 0 {
        return Cmp::Incomparable;
    }
    Cmp::from_ordering(a.cmp(&b))
}

fn compare_by(key: SortKey, a: &Finding, b: &Finding) -> Cmp {
    match key {
        SortKey::File => Cmp::from_ordering(a.file.cmp(&b.file)),
        SortKey::Line => compare_numbers(a.line, b.line),
        SortKey::Column => compare_numbers(a.column, b.column),
        SortKey::Analysis => Cmp::from_ordering(a.analysis.cmp(&b.analysis)),
        SortKey::Severity => compare_severity(a, b),
    }
}

/// Final ordering stage.
pub struct Sorter {
    keys: Vec<SortKey>,
}

impl Sorter {
    /// An empty key list falls back to file, line, column.
    pub fn new(keys: Vec<SortKey>) -> Self {
        let keys = if keys.is_empty() {
            vec![SortKey::File, SortKey::Line, SortKey::Column]
        } else {
            keys
        };
        Self { keys }
    }
}

impl Processor for Sorter {
    fn name(&self) -> &'static str {
        "sort"
    }

    fn process(&self, mut findings: Vec<Finding>) -> Result<Vec<Finding>, PipelineError> {
        findings.sort_by(|a, b| {
            for key in &self.keys {
                match compare_by(*key, a, b) {
                    Cmp::Less => return Ordering::Less,
                    Cmp::Greater => return Ordering::Greater,
                    Cmp::Equal | Cmp::Incomparable => {}
                }
            }
            Ordering::Equal
        });
        Ok(findings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(file: &str, line: usize, column: usize) -> Finding {
        Finding::new(
            "line-length".to_string(),
            file.to_string(),
            line,
            "message".to_string(),
        )
        .with_column(column)
    }

    #[test]
    fn test_orders_by_file_then_line_then_column() {
        let sorter = Sorter::new(Vec::new());
        let sorted = sorter
            .process(vec![
                entry("b.rs", 1, 1),
                entry("a.rs", 2, 1),
                entry("a.rs", 1, 5),
                entry("a.rs", 1, 2),
            ])
            .unwrap();

        let order: Vec<(String, usize, usize)> = sorted
            .iter()
            .map(|f| (f.file.clone(), f.line, f.column))
            .collect();
        assert_eq!(
            order,
            [
                ("a.rs".to_string(), 1, 2),
                ("a.rs".to_string(), 1, 5),
                ("a.rs".to_string(), 2, 1),
                ("b.rs".to_string(), 1, 1),
            ]
        );
    }

    #[test]
    fn test_unknown_column_is_neutral_and_keeps_input_order() {
        let sorter = Sorter::new(vec![SortKey::Column]);
        let sorted = sorter
            .process(vec![entry("a.rs", 1, 0), entry("a.rs", 2, 0)])
            .unwrap();

        // Both columns unknown: stable sort preserves input order.
        assert_eq!(sorted[0].line, 1);
        assert_eq!(sorted[1].line, 2);
    }

    #[test]
    fn test_ranked_severities_use_the_ranking() {
        let sorter = Sorter::new(vec![SortKey::Severity]);
        let warning = entry("a.rs", 1, 1).with_severity("warning");
        let low = entry("a.rs", 2, 1).with_severity("low");
        let error = entry("a.rs", 3, 1).with_severity("error");

        let sorted = sorter.process(vec![warning, low, error]).unwrap();
        let severities: Vec<&str> = sorted
            .iter()
            .map(|f| f.severity.as_deref().unwrap())
            .collect();
        assert_eq!(severities, ["low", "warning", "error"]);
    }

    #[test]
    fn test_unranked_severity_falls_back_to_lexical_order() {
        let sorter = Sorter::new(vec![SortKey::Severity]);
        let ranked = entry("a.rs", 1, 1).with_severity("error");
        let custom = entry("a.rs", 2, 1).with_severity("blocker");

        let sorted = sorter.process(vec![ranked, custom]).unwrap();
        let severities: Vec<&str> = sorted
            .iter()
            .map(|f| f.severity.as_deref().unwrap())
            .collect();
        // "blocker" < "error" lexically.
        assert_eq!(severities, ["blocker", "error"]);
    }
}
