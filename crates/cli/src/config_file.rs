//! Optional `lintmux.toml` loading.
//!
//! Configuration is layered: built-in defaults, then the config file, then
//! command line flags. Every field here is optional so an absent key can be
//! told apart from one set to the default value; only present keys touch
//! the engine [`Config`].

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use lintmux_engine::{ChangeSource, Config, PathStyle, SortKey};

/// File names probed in the working directory when no explicit path is
/// given, in order.
pub const CONFIG_NAMES: [&str; 2] = ["lintmux.toml", ".lintmux.toml"];

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub analyses: AnalysesSection,
    #[serde(default)]
    pub run: RunSection,
    #[serde(default)]
    pub issues: IssuesSection,
    #[serde(default)]
    pub output: OutputSection,
    #[serde(default)]
    pub settings: SettingsSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct AnalysesSection {
    #[serde(default)]
    pub enable: Vec<String>,
    #[serde(default)]
    pub disable: Vec<String>,
    #[serde(default)]
    pub enable_all: bool,
    #[serde(default)]
    pub disable_all: bool,
    #[serde(default)]
    pub presets: Vec<String>,
    #[serde(default)]
    pub fast_only: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct RunSection {
    pub deadline: Option<u64>,
    pub workers: Option<usize>,
    #[serde(default)]
    pub paths: Vec<String>,
    #[serde(default)]
    pub skip_dirs: Vec<String>,
    #[serde(default)]
    pub extensions: Vec<String>,
    pub include_tests: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct IssuesSection {
    #[serde(default)]
    pub exclude: Vec<String>,
    pub use_default_excludes: Option<bool>,
    pub respect_suppressions: Option<bool>,
    pub dedup_same_line: Option<bool>,
    pub max_same_messages: Option<usize>,
    pub max_per_analysis: Option<usize>,
    pub max_per_file: Option<usize>,
    pub new: Option<bool>,
    pub new_from_rev: Option<String>,
    pub new_from_patch: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct OutputSection {
    pub format: Option<String>,
    pub sort_results: Option<bool>,
    #[serde(default)]
    pub sort_keys: Vec<String>,
    pub path_style: Option<PathStyle>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct SettingsSection {
    pub max_line_length: Option<usize>,
    pub max_blank_run: Option<usize>,
    pub max_file_lines: Option<usize>,
    pub dup_block_lines: Option<usize>,
}

/// Loads the explicit config file, or probes the working directory for one.
/// A missing explicit file is an error; absent discovery is not.
pub fn discover(explicit: Option<&Path>) -> Result<Option<FileConfig>> {
    let path = match explicit {
        Some(path) => {
            if !path.exists() {
                bail!("config file not found: {}", path.display());
            }
            Some(path.to_path_buf())
        }
        None => CONFIG_NAMES.iter().map(PathBuf::from).find(|name| name.exists()),
    };

    let Some(path) = path else {
        return Ok(None);
    };
    tracing::debug!("loading config file {}", path.display());
    let text = fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let parsed = toml::from_str(&text)
        .with_context(|| format!("failed to parse config file {}", path.display()))?;
    Ok(Some(parsed))
}

impl FileConfig {
    /// Folds the file's values over the defaults already in `config`.
    pub fn apply(&self, config: &mut Config) -> Result<()> {
        config.enable.extend(self.analyses.enable.iter().cloned());
        config.disable.extend(self.analyses.disable.iter().cloned());
        config.presets.extend(self.analyses.presets.iter().cloned());
        if self.analyses.enable_all {
            config.enable_all = true;
        }
        if self.analyses.disable_all {
            config.disable_all = true;
        }
        if self.analyses.fast_only {
            config.fast_only = true;
        }

        if let Some(seconds) = self.run.deadline {
            config.deadline = Duration::from_secs(seconds);
        }
        if let Some(workers) = self.run.workers {
            config.workers = workers;
        }
        if !self.run.paths.is_empty() {
            config.roots = self.run.paths.clone();
        }
        config.skip_dirs.extend(self.run.skip_dirs.iter().cloned());
        if !self.run.extensions.is_empty() {
            config.extensions = self.run.extensions.clone();
        }
        if let Some(include) = self.run.include_tests {
            config.include_tests = include;
        }

        config
            .exclude_patterns
            .extend(self.issues.exclude.iter().cloned());
        if let Some(value) = self.issues.use_default_excludes {
            config.use_default_excludes = value;
        }
        if let Some(value) = self.issues.respect_suppressions {
            config.respect_suppressions = value;
        }
        if let Some(value) = self.issues.dedup_same_line {
            config.dedup_same_line = value;
        }
        if let Some(cap) = self.issues.max_same_messages {
            config.max_same_messages = cap;
        }
        if let Some(cap) = self.issues.max_per_analysis {
            config.max_per_analysis = cap;
        }
        if let Some(cap) = self.issues.max_per_file {
            config.max_per_file = cap;
        }
        if self.issues.new == Some(true) {
            config.change_source = Some(ChangeSource::WorkingTree);
        }
        if let Some(rev) = &self.issues.new_from_rev {
            config.change_source = Some(ChangeSource::Revision(rev.clone()));
        }
        if let Some(path) = &self.issues.new_from_patch {
            config.change_source = Some(ChangeSource::PatchFile(path.clone()));
        }

        if let Some(value) = self.output.sort_results {
            config.sort_results = value;
        }
        if !self.output.sort_keys.is_empty() {
            config.sort_keys = self
                .output
                .sort_keys
                .iter()
                .map(|key| key.parse::<SortKey>())
                .collect::<Result<Vec<_>, _>>()?;
        }
        if let Some(style) = self.output.path_style {
            config.path_style = style;
        }

        if let Some(limit) = self.settings.max_line_length {
            config.settings.max_line_length = limit;
        }
        if let Some(limit) = self.settings.max_blank_run {
            config.settings.max_blank_run = limit;
        }
        if let Some(limit) = self.settings.max_file_lines {
            config.settings.max_file_lines = limit;
        }
        if let Some(window) = self.settings.dup_block_lines {
            config.settings.dup_block_lines = window;
        }

        Ok(())
    }
}
