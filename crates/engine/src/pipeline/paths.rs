use std::env;
use std::path::{Path, PathBuf};

use crate::core::{Finding, PathStyle, PipelineError};
use crate::pipeline::Processor;

/// Rewrites finding paths into one consistent form.
///
/// Runs before de-duplication so the same file reported absolute by one
/// analysis and relative by another collapses properly. When the working
/// directory cannot be determined the stage passes findings through
/// untouched.
pub struct PathNormalizer {
    style: PathStyle,
    cwd: Option<PathBuf>,
}

impl PathNormalizer {
    pub fn new(style: PathStyle) -> Self {
        Self {
            style,
            cwd: env::current_dir().ok(),
        }
    }

    #[cfg(test)]
    fn with_cwd(style: PathStyle, cwd: PathBuf) -> Self {
        Self {
            style,
            cwd: Some(cwd),
        }
    }

    fn rewrite(&self, file: &str) -> Option<String> {
        let cwd = self.cwd.as_ref()?;
        let path = Path::new(file);
        match self.style {
            PathStyle::Relative => path
                .strip_prefix(cwd)
                .ok()
                .map(|relative| relative.display().to_string()),
            PathStyle::Absolute => {
                if path.is_absolute() {
                    None
                } else {
                    Some(cwd.join(path).display().to_string())
                }
            }
        }
    }
}

impl Processor for PathNormalizer {
    fn name(&self) -> &'static str {
        "path-normalization"
    }

    fn process(&self, findings: Vec<Finding>) -> Result<Vec<Finding>, PipelineError> {
        Ok(findings
            .into_iter()
            .map(|mut finding| {
                if let Some(rewritten) = self.rewrite(&finding.file) {
                    finding.file = rewritten;
                }
                finding
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(file: &str) -> Finding {
        Finding::new(
            "line-length".to_string(),
            file.to_string(),
            1,
            "message".to_string(),
        )
    }

    #[test]
    fn test_relative_style_strips_the_working_directory() {
        let normalizer = PathNormalizer::with_cwd(PathStyle::Relative, PathBuf::from("/work"));
        let findings = normalizer
            .process(vec![at("/work/src/lib.rs"), at("src/main.rs"), at("/elsewhere/x.rs")])
            .unwrap();

        assert_eq!(findings[0].file, "src/lib.rs");
        assert_eq!(findings[1].file, "src/main.rs");
        assert_eq!(findings[2].file, "/elsewhere/x.rs");
    }

    #[test]
    fn test_absolute_style_joins_relative_paths() {
        let normalizer = PathNormalizer::with_cwd(PathStyle::Absolute, PathBuf::from("/work"));
        let findings = normalizer
            .process(vec![at("src/main.rs"), at("/already/abs.rs")])
            .unwrap();

        assert_eq!(findings[0].file, "/work/src/main.rs");
        assert_eq!(findings[1].file, "/already/abs.rs");
    }
}
