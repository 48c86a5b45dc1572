//! Built-in analyses
//!
//! Every diagnostic pass the binary ships, plus the catalog wiring that
//! registers them with their aliases, groups, default states, and presets.
//! The passes are language-agnostic line and token checks; anything
//! needing a whole-project view consumes the shared source index and is
//! marked slow. The orchestration layers never reference a concrete
//! analysis type: everything downstream of this module sees descriptors.

pub mod conflict_marker;
pub mod dup_block;
pub mod line_length;
pub mod long_file;
pub mod mixed_indent;
pub mod orphan_symbol;
pub mod todo_marker;
pub mod whitespace;

use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::core::AnalysisDescriptor;
use crate::registry::{Registry, RegistryBuilder};

pub use conflict_marker::ConflictMarker;
pub use dup_block::DupBlock;
pub use line_length::LineLength;
pub use long_file::LongFile;
pub use mixed_indent::MixedIndent;
pub use orphan_symbol::OrphanSymbol;
pub use todo_marker::TodoMarker;
pub use whitespace::{BlankRuns, FinalNewline, TrailingSpace};

/// Reads one target file, downgrading failures to a debug log so a file
/// deleted mid-run cannot abort an analysis.
pub(crate) fn read_source(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(err) => {
            tracing::debug!("skipping unreadable file {}: {}", path.display(), err);
            None
        }
    }
}

/// Builds the full built-in catalog.
pub fn builtin_registry() -> Registry {
    RegistryBuilder::new()
        .with(AnalysisDescriptor::enabled(Arc::new(LineLength)).with_alias("ll"))
        .with(AnalysisDescriptor::enabled(Arc::new(TrailingSpace)).with_group("whitespace"))
        .with(AnalysisDescriptor::enabled(Arc::new(BlankRuns)).with_group("whitespace"))
        .with(AnalysisDescriptor::enabled(Arc::new(FinalNewline)).with_group("whitespace"))
        .with(AnalysisDescriptor::enabled(Arc::new(MixedIndent)))
        .with(AnalysisDescriptor::enabled(Arc::new(ConflictMarker)).with_alias("merge-marker"))
        .with(AnalysisDescriptor::disabled(Arc::new(TodoMarker)).with_alias("fixme"))
        .with(AnalysisDescriptor::disabled(Arc::new(LongFile)))
        .with(
            AnalysisDescriptor::disabled(Arc::new(DupBlock))
                .with_alias("copydetect")
                .slow()
                .with_source_index(),
        )
        .with(
            AnalysisDescriptor::disabled(Arc::new(OrphanSymbol))
                .with_alias("deadsym")
                .slow()
                .with_source_index(),
        )
        .with_preset(
            "style",
            &[
                "line-length",
                "mixed-indent",
                "trailing-space",
                "blank-runs",
                "final-newline",
            ],
        )
        .with_preset("hygiene", &["trailing-space", "conflict-marker", "todo-marker"])
        .with_preset("deepscan", &["dup-block", "orphan-symbol"])
        .build()
}

#[cfg(test)]
pub(crate) mod testutil {
    use std::fs;
    use std::sync::Arc;

    use crate::core::{Config, RunContext};

    pub fn context(files: &[(&str, &str)]) -> (tempfile::TempDir, RunContext) {
        context_with(Config::default(), files)
    }

    pub fn context_with(
        config: Config,
        files: &[(&str, &str)],
    ) -> (tempfile::TempDir, RunContext) {
        let tmp = tempfile::tempdir().unwrap();
        let mut paths = Vec::new();
        for (name, content) in files {
            let path = tmp.path().join(name);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(&path, content).unwrap();
            paths.push(path);
        }
        (tmp, RunContext::new(paths, Arc::new(config)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_registers_ten_analyses() {
        let registry = builtin_registry();
        assert_eq!(registry.all().len(), 10);
        assert_eq!(registry.default_enabled().len(), 6);
    }

    #[test]
    fn test_catalog_aliases_resolve() {
        let registry = builtin_registry();
        assert_eq!(registry.canonical_name("ll"), Some("line-length".to_string()));
        assert_eq!(
            registry.canonical_name("merge-marker"),
            Some("conflict-marker".to_string())
        );
        assert_eq!(registry.canonical_name("fixme"), Some("todo-marker".to_string()));
        assert_eq!(registry.canonical_name("copydetect"), Some("dup-block".to_string()));
        assert_eq!(
            registry.canonical_name("deadsym"),
            Some("orphan-symbol".to_string())
        );
    }

    #[test]
    fn test_whitespace_group_order_is_fixed() {
        let registry = builtin_registry();
        let members: Vec<String> = registry
            .group_members("whitespace")
            .iter()
            .map(|d| d.name())
            .collect();
        assert_eq!(members, ["trailing-space", "blank-runs", "final-newline"]);
    }

    #[test]
    fn test_slow_analyses_need_the_index() {
        let registry = builtin_registry();
        for name in ["dup-block", "orphan-symbol"] {
            let descriptor = registry.get(name).unwrap();
            assert!(descriptor.is_slow());
            assert!(descriptor.needs_source_index());
            assert!(!descriptor.enabled_by_default());
        }
    }

    #[test]
    fn test_presets_are_registered() {
        let registry = builtin_registry();
        assert_eq!(registry.preset_names(), ["deepscan", "hygiene", "style"]);
        assert_eq!(
            registry.preset("deepscan"),
            Some(["dup-block".to_string(), "orphan-symbol".to_string()].as_slice())
        );
    }
}
