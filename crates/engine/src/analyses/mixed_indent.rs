use crate::analyses::read_source;
use crate::core::{Analysis, Finding, RunContext};

/// Flags a tab appearing after a space inside leading indentation, the
/// mix that renders differently depending on the viewer's tab width.
pub struct MixedIndent;

impl Analysis for MixedIndent {
    fn id(&self) -> &str {
        "mixed-indent"
    }

    fn description(&self) -> &'static str {
        "Reports space-before-tab mixtures in indentation"
    }

    fn check(&self, ctx: &RunContext) -> anyhow::Result<Vec<Finding>> {
        let mut findings = Vec::new();
        for path in ctx.files() {
            let Some(content) = read_source(path) else {
                continue;
            };
            let file = path.display().to_string();
            for (number, line) in content.lines().enumerate() {
                if let Some(column) = space_before_tab(line) {
                    findings.push(
                        Finding::new(
                            self.id().to_string(),
                            file.clone(),
                            number + 1,
                            "space before tab in indentation".to_string(),
                        )
                        .with_column(column)
                        .with_severity("warning"),
                    );
                }
            }
        }
        Ok(findings)
    }
}

/// 1-based column of the first tab preceded by a space in the leading
/// whitespace, if any.
fn space_before_tab(line: &str) -> Option<usize> {
    let mut seen_space = false;
    for (position, c) in line.chars().enumerate() {
        match c {
            ' ' => seen_space = true,
            '\t' if seen_space => return Some(position + 1),
            '\t' => {}
            _ => return None,
        }
    }
    None
}
