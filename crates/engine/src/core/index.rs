//! Shared cross-file source index.
//!
//! Some analyses need to see the whole target set at once rather than one
//! file at a time: duplicate-block detection compares line windows across
//! files, and orphan-symbol detection counts identifier references
//! project-wide. The [`SourceIndex`] is that shared view. It is built at
//! most once per run, on first use, and handed out behind an `Arc` so
//! concurrent analyses read the same snapshot.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::fs;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

static IDENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z_][A-Za-z0-9_]*").unwrap()
});

static DEF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:fn|func|def|class|struct|enum|trait|interface|type|impl)\s+([A-Za-z_][A-Za-z0-9_]*)").unwrap()
});

/// One indexed source file.
#[derive(Debug)]
pub struct IndexedFile {
    path: PathBuf,
    lines: Vec<String>,
    line_hashes: Vec<u64>,
}

impl IndexedFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Hashes of the trailing-whitespace-trimmed lines, aligned with
    /// `lines()`.
    pub fn line_hashes(&self) -> &[u64] {
        &self.line_hashes
    }
}

/// A symbol definition site found by the lightweight declaration scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolDef {
    pub name: String,
    pub file: PathBuf,
    pub line: usize,
}

/// Tokenized view of the whole target set.
#[derive(Debug, Default)]
pub struct SourceIndex {
    files: Vec<IndexedFile>,
    ident_counts: HashMap<String, usize>,
    definitions: Vec<SymbolDef>,
}

impl SourceIndex {
    /// Indexes the given files. Unreadable files are skipped with a
    /// warning so one bad path cannot abort index-backed analyses.
    pub fn build(paths: &[PathBuf]) -> Self {
        let mut index = SourceIndex::default();

        for path in paths {
            let content = match fs::read_to_string(path) {
                Ok(content) => content,
                Err(err) => {
                    tracing::warn!("skipping unreadable file {}: {}", path.display(), err);
                    continue;
                }
            };

            let mut lines = Vec::new();
            let mut line_hashes = Vec::new();
            for (number, line) in content.lines().enumerate() {
                let mut hasher = DefaultHasher::new();
                line.trim_end().hash(&mut hasher);
                line_hashes.push(hasher.finish());

                for ident in IDENT_RE.find_iter(line) {
                    *index.ident_counts.entry(ident.as_str().to_string()).or_insert(0) += 1;
                }
                if let Some(caps) = DEF_RE.captures(line) {
                    index.definitions.push(SymbolDef {
                        name: caps[1].to_string(),
                        file: path.clone(),
                        line: number + 1,
                    });
                }
                lines.push(line.to_string());
            }

            index.files.push(IndexedFile {
                path: path.clone(),
                lines,
                line_hashes,
            });
        }

        index
    }

    pub fn files(&self) -> &[IndexedFile] {
        &self.files
    }

    /// Project-wide occurrence count of an identifier token, definition
    /// sites included.
    pub fn occurrences(&self, name: &str) -> usize {
        self.ident_counts.get(name).copied().unwrap_or(0)
    }

    pub fn definitions(&self) -> &[SymbolDef] {
        &self.definitions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_index_counts_identifiers_and_definitions() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_file(&dir, "a.rs", "fn helper() {}\nfn caller() { helper(); }\n");
        let index = SourceIndex::build(&[a.clone()]);

        assert_eq!(index.occurrences("helper"), 2);
        assert_eq!(index.occurrences("caller"), 1);
        assert_eq!(index.occurrences("absent"), 0);

        let defs: Vec<&str> = index.definitions().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(defs, ["helper", "caller"]);
        assert_eq!(index.definitions()[0].file, a);
        assert_eq!(index.definitions()[0].line, 1);
    }

    #[test]
    fn test_line_hashes_ignore_trailing_whitespace() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "b.rs", "let x = 1;   \nlet x = 1;\n");
        let index = SourceIndex::build(&[path]);

        let hashes = index.files()[0].line_hashes();
        assert_eq!(hashes[0], hashes[1]);
    }

    #[test]
    fn test_unreadable_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let real = write_file(&dir, "ok.rs", "fn ok() {}\n");
        let ghost = dir.path().join("missing.rs");
        let index = SourceIndex::build(&[ghost, real]);

        assert_eq!(index.files().len(), 1);
        assert_eq!(index.files()[0].path().file_name().unwrap(), "ok.rs");
    }
}
