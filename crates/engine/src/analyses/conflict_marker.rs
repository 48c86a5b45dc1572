use crate::analyses::read_source;
use crate::core::{Analysis, Finding, RunContext};

/// Detects leftover version-control merge conflict markers.
pub struct ConflictMarker;

impl ConflictMarker {
    fn is_marker(line: &str) -> bool {
        line.starts_with("<<<<<<<")
            || line.starts_with(">>>>>>>")
            || line.trim_end() == "======="
    }
}

impl Analysis for ConflictMarker {
    fn id(&self) -> &str {
        "conflict-marker"
    }

    fn description(&self) -> &'static str {
        "Reports unresolved merge conflict markers"
    }

    fn check(&self, ctx: &RunContext) -> anyhow::Result<Vec<Finding>> {
        let mut findings = Vec::new();
        for path in ctx.files() {
            let Some(content) = read_source(path) else {
                continue;
            };
            let file = path.display().to_string();

            let mut byte_offset = 0usize;
            for (number, line) in content.lines().enumerate() {
                if Self::is_marker(line) {
                    findings.push(
                        Finding::new(
                            self.id().to_string(),
                            file.clone(),
                            number + 1,
                            "merge conflict marker".to_string(),
                        )
                        .with_column(1)
                        .with_offset(byte_offset)
                        .with_severity("error"),
                    );
                }
                byte_offset += line.len() + 1;
            }
        }
        Ok(findings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyses::testutil;

    #[test]
    fn test_all_three_marker_shapes_are_caught() {
        let content = "\
fn merge() {
<<<<<<< HEAD
    left();
=======
    right();
>>>>>>> feature
}
";
        let (_tmp, ctx) = testutil::context(&[("sample.rs", content)]);
        let findings = ConflictMarker.check(&ctx).unwrap();

        let lines: Vec<usize> = findings.iter().map(|f| f.line).collect();
        assert_eq!(lines, [2, 4, 6]);
        assert!(findings.iter().all(|f| f.severity.as_deref() == Some("error")));
        assert_eq!(findings[0].offset, Some(13));
    }

    #[test]
    fn test_separator_rows_in_code_do_not_trigger() {
        let content = "let banner = \"=======\";\n    ======= inside\n";
        let (_tmp, ctx) = testutil::context(&[("sample.rs", content)]);

        assert!(ConflictMarker.check(&ctx).unwrap().is_empty());
    }
}
