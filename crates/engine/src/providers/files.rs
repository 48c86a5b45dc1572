//! Target-file resolution.
//!
//! Roots come in three shapes: `dir/...` walks recursively, a plain
//! directory takes only its direct children, and an explicit file is taken
//! as-is, bypassing the extension and test-file filters. Hidden and
//! underscore-prefixed directories are always skipped; skip patterns are
//! regular expressions matched against directory names at any depth.
//! Output is sorted and duplicate-free, and directories that contributed
//! no eligible files are dropped from the directory list.

use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use walkdir::{DirEntry, WalkDir};

use crate::core::ProviderError;

/// Distinct files and the directories they were found in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub files: Vec<PathBuf>,
    pub dirs: Vec<PathBuf>,
}

/// Resolves configured roots into the concrete target file set.
#[derive(Debug)]
pub struct FileResolver {
    skip_patterns: Vec<Regex>,
    extensions: HashSet<String>,
    include_tests: bool,
}

impl FileResolver {
    pub fn new(
        skip_dirs: &[String],
        extensions: &[String],
        include_tests: bool,
    ) -> Result<Self, ProviderError> {
        let skip_patterns = skip_dirs
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|source| ProviderError::BadSkipPattern {
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            skip_patterns,
            extensions: extensions.iter().cloned().collect(),
            include_tests,
        })
    }

    pub fn resolve(&self, roots: &[String]) -> Result<ResolvedPaths, ProviderError> {
        if roots.is_empty() {
            return Err(ProviderError::NoRoots);
        }

        let mut files = BTreeSet::new();
        let mut dirs = BTreeSet::new();

        for root in roots {
            if let Some(stripped) = root.strip_suffix("/...") {
                let dir = if stripped.is_empty() { "." } else { stripped };
                self.check_exists(Path::new(dir))?;
                self.walk(Path::new(dir), None, &mut files, &mut dirs)?;
            } else {
                let path = Path::new(root);
                let metadata = self.check_exists(path)?;
                if metadata.is_dir() {
                    self.walk(path, Some(1), &mut files, &mut dirs)?;
                } else {
                    // Explicitly named files are taken verbatim.
                    files.insert(path.to_path_buf());
                }
            }
        }

        Ok(ResolvedPaths {
            files: files.into_iter().collect(),
            dirs: dirs.into_iter().collect(),
        })
    }

    fn check_exists(&self, path: &Path) -> Result<fs::Metadata, ProviderError> {
        fs::metadata(path).map_err(|source| ProviderError::Missing {
            path: path.to_path_buf(),
            source,
        })
    }

    fn walk(
        &self,
        root: &Path,
        max_depth: Option<usize>,
        files: &mut BTreeSet<PathBuf>,
        dirs: &mut BTreeSet<PathBuf>,
    ) -> Result<(), ProviderError> {
        let mut walker = WalkDir::new(root);
        if let Some(depth) = max_depth {
            walker = walker.max_depth(depth);
        }

        for entry in walker.into_iter().filter_entry(|entry| self.keep(entry)) {
            let entry = entry.map_err(|source| ProviderError::Walk {
                dir: root.to_path_buf(),
                source,
            })?;
            if entry.file_type().is_file() && self.eligible(entry.path()) {
                if let Some(parent) = entry.path().parent() {
                    dirs.insert(parent.to_path_buf());
                }
                files.insert(entry.path().to_path_buf());
            }
        }
        Ok(())
    }

    fn keep(&self, entry: &DirEntry) -> bool {
        // The root itself was named explicitly and is never filtered.
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return true;
        }
        let name = entry.file_name().to_string_lossy();
        !self.ignored_dir(&name)
    }

    fn ignored_dir(&self, name: &str) -> bool {
        if name != "." && name != ".." && name.starts_with('.') {
            return true;
        }
        if name.starts_with('_') {
            return true;
        }
        self.skip_patterns.iter().any(|pattern| pattern.is_match(name))
    }

    fn eligible(&self, path: &Path) -> bool {
        let Some(extension) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        if !self.extensions.contains(extension) {
            return false;
        }
        if !self.include_tests {
            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default();
            if name.starts_with("test_") || name.ends_with(&format!("_test.{extension}")) {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn touch(dir: &Path, name: &str) {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        let mut file = fs::File::create(path).unwrap();
        writeln!(file, "content").unwrap();
    }

    fn sample_tree() -> tempfile::TempDir {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        touch(root, "a.rs");
        touch(root, "b_test.rs");
        touch(root, "test_c.rs");
        touch(root, "notes.txt");
        touch(root, "vendor/v.rs");
        touch(root, ".hidden/h.rs");
        touch(root, "_private/p.rs");
        touch(root, "sub/d.rs");
        touch(root, "sub/deeper/e.rs");
        tmp
    }

    fn names(paths: &[PathBuf], root: &Path) -> Vec<String> {
        paths
            .iter()
            .map(|p| {
                p.strip_prefix(root)
                    .unwrap()
                    .display()
                    .to_string()
                    .replace('\\', "/")
            })
            .collect()
    }

    fn resolver(include_tests: bool) -> FileResolver {
        FileResolver::new(&["vendor".to_string()], &["rs".to_string()], include_tests).unwrap()
    }

    #[test]
    fn test_recursive_root_walks_everything_eligible() {
        let tmp = sample_tree();
        let root = tmp.path();
        let resolved = resolver(true)
            .resolve(&[format!("{}/...", root.display())])
            .unwrap();

        assert_eq!(
            names(&resolved.files, root),
            ["a.rs", "b_test.rs", "sub/d.rs", "sub/deeper/e.rs", "test_c.rs"]
        );
        assert_eq!(resolved.dirs.len(), 3);
    }

    #[test]
    fn test_plain_directory_takes_direct_children_only() {
        let tmp = sample_tree();
        let root = tmp.path();
        let resolved = resolver(true)
            .resolve(&[root.display().to_string()])
            .unwrap();

        assert_eq!(names(&resolved.files, root), ["a.rs", "b_test.rs", "test_c.rs"]);
    }

    #[test]
    fn test_excluding_tests_drops_both_test_shapes() {
        let tmp = sample_tree();
        let root = tmp.path();
        let resolved = resolver(false)
            .resolve(&[format!("{}/...", root.display())])
            .unwrap();

        assert_eq!(
            names(&resolved.files, root),
            ["a.rs", "sub/d.rs", "sub/deeper/e.rs"]
        );
    }

    #[test]
    fn test_explicit_file_bypasses_extension_filter() {
        let tmp = sample_tree();
        let root = tmp.path();
        let resolved = resolver(true)
            .resolve(&[root.join("notes.txt").display().to_string()])
            .unwrap();

        assert_eq!(names(&resolved.files, root), ["notes.txt"]);
        assert!(resolved.dirs.is_empty());
    }

    #[test]
    fn test_skip_pattern_matches_names_at_any_depth() {
        let tmp = sample_tree();
        let root = tmp.path();
        let resolver =
            FileResolver::new(&["deep.*".to_string()], &["rs".to_string()], true).unwrap();
        let resolved = resolver
            .resolve(&[format!("{}/...", root.display())])
            .unwrap();

        assert!(!names(&resolved.files, root).contains(&"sub/deeper/e.rs".to_string()));
        assert!(names(&resolved.files, root).contains(&"sub/d.rs".to_string()));
    }

    #[test]
    fn test_missing_path_is_an_error() {
        let tmp = sample_tree();
        let missing = tmp.path().join("nowhere");
        let err = resolver(true)
            .resolve(&[missing.display().to_string()])
            .unwrap_err();

        assert!(matches!(err, ProviderError::Missing { .. }));
    }

    #[test]
    fn test_no_roots_is_an_error() {
        let err = resolver(true).resolve(&[]).unwrap_err();
        assert_eq!(err.to_string(), "no paths are set");
    }

    #[test]
    fn test_bad_skip_pattern_is_rejected_at_construction() {
        let err = FileResolver::new(&["(open".to_string()], &["rs".to_string()], true).unwrap_err();
        assert!(matches!(err, ProviderError::BadSkipPattern { .. }));
    }
}
