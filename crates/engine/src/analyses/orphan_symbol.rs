use crate::core::{Analysis, Finding, RunContext};

/// Flags symbols defined somewhere in the target set but never referenced
/// anywhere else in it.
///
/// Works on the shared source index's identifier counts: a definition
/// whose name appears exactly once project-wide is only mentioned by its
/// own declaration. Entry points (`main`) and names starting with an
/// underscore are exempt.
pub struct OrphanSymbol;

impl Analysis for OrphanSymbol {
    fn id(&self) -> &str {
        "orphan-symbol"
    }

    fn description(&self) -> &'static str {
        "Reports symbols defined but never referenced in the target set"
    }

    fn check(&self, ctx: &RunContext) -> anyhow::Result<Vec<Finding>> {
        let index = ctx.source_index();
        let mut findings = Vec::new();

        for def in index.definitions() {
            if def.name == "main" || def.name.starts_with('_') {
                continue;
            }
            if index.occurrences(&def.name) <= 1 {
                findings.push(
                    Finding::new(
                        self.id().to_string(),
                        def.file.display().to_string(),
                        def.line,
                        format!("symbol `{}` is defined but never referenced", def.name),
                    )
                    .with_severity("medium"),
                );
            }
        }

        Ok(findings)
    }
}
