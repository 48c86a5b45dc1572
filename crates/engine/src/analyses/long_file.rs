use crate::analyses::read_source;
use crate::core::{Analysis, Finding, RunContext};

/// Flags files longer than `max-file-lines`.
pub struct LongFile;

impl Analysis for LongFile {
    fn id(&self) -> &str {
        "long-file"
    }

    fn description(&self) -> &'static str {
        "Reports files exceeding the configured line count"
    }

    fn check(&self, ctx: &RunContext) -> anyhow::Result<Vec<Finding>> {
        let limit = ctx.settings().max_file_lines;
        let mut findings = Vec::new();

        for path in ctx.files() {
            let Some(content) = read_source(path) else {
                continue;
            };
            let lines = content.lines().count();
            if lines > limit {
                findings.push(
                    Finding::new(
                        self.id().to_string(),
                        path.display().to_string(),
                        1,
                        format!("file has {lines} lines, limit is {limit}"),
                    )
                    .with_severity("warning"),
                );
            }
        }

        Ok(findings)
    }
}
