use once_cell::sync::Lazy;
use regex::Regex;

use crate::analyses::read_source;
use crate::core::{Analysis, Finding, RunContext};

static MARKER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b(TODO|FIXME|XXX|HACK)\b").unwrap());

/// Surfaces TODO-style annotations left in source.
///
/// Off by default; its message is also covered by the default exclusion
/// patterns, so enabling it without loosening those stays quiet.
pub struct TodoMarker;

impl Analysis for TodoMarker {
    fn id(&self) -> &str {
        "todo-marker"
    }

    fn description(&self) -> &'static str {
        "Reports TODO, FIXME, XXX and HACK annotations"
    }

    fn check(&self, ctx: &RunContext) -> anyhow::Result<Vec<Finding>> {
        let mut findings = Vec::new();
        for path in ctx.files() {
            let Some(content) = read_source(path) else {
                continue;
            };
            let file = path.display().to_string();
            for (number, line) in content.lines().enumerate() {
                if let Some(found) = MARKER_RE.find(line) {
                    let column = line[..found.start()].chars().count() + 1;
                    let snippet = line[found.start()..].trim_end();
                    findings.push(
                        Finding::new(
                            self.id().to_string(),
                            file.clone(),
                            number + 1,
                            format!("TODO marker: {snippet}"),
                        )
                        .with_column(column)
                        .with_severity("low"),
                    );
                }
            }
        }
        Ok(findings)
    }
}
