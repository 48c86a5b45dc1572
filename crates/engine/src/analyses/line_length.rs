use crate::analyses::read_source;
use crate::core::{Analysis, Finding, RunContext};

/// Reports lines longer than `max-line-length` characters.
pub struct LineLength;

impl Analysis for LineLength {
    fn id(&self) -> &str {
        "line-length"
    }

    fn description(&self) -> &'static str {
        "Reports lines longer than the configured maximum"
    }

    fn check(&self, ctx: &RunContext) -> anyhow::Result<Vec<Finding>> {
        let limit = ctx.settings().max_line_length;
        let mut findings = Vec::new();

        for path in ctx.files() {
            let Some(content) = read_source(path) else {
                continue;
            };
            let file = path.display().to_string();
            for (number, line) in content.lines().enumerate() {
                let length = line.chars().count();
                if length > limit {
                    findings.push(
                        Finding::new(
                            self.id().to_string(),
                            file.clone(),
                            number + 1,
                            format!("line is {length} characters long, limit is {limit}"),
                        )
                        .with_column(limit + 1)
                        .with_severity("warning"),
                    );
                }
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
    fn test_flags_only_lines_over_the_limit() {
        let long = "x".repeat(130);
        let content = format!("short line\n{long}\n");
        let (_tmp, ctx) = testutil::context(&[("sample.rs", &content)]);

        let findings = LineLength.check(&ctx).unwrap();

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].line, 2);
        assert_eq!(findings[0].column, 121);
        assert_eq!(
            findings[0].message,
            "line is 130 characters long, limit is 120"
        );
        assert_eq!(findings[0].severity.as_deref(), Some("warning"));
    }

    #[test]
    fn test_limit_comes_from_settings() {
        let mut config = crate::core::Config::default();
        config.settings.max_line_length = 10;
        let (_tmp, ctx) = testutil::context_with(config, &[("sample.rs", "only twelve!\n")]);

        let findings = LineLength.check(&ctx).unwrap();

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].message, "line is 12 characters long, limit is 10");
    }
}
