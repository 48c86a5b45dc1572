use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Args, ValueEnum};
use lintmux_engine::{
    builtin_registry, collect_changes, resolve, ChangeSource, Config, FileResolver, Outcome,
    Pipeline, RunContext, Runner, SortKey,
};

use crate::config_file;
use crate::exit;
use crate::printer::{self, Printer};

#[derive(Args)]
pub struct RunArgs {
    /// Paths to analyze; append /... to recurse into a tree.
    #[arg(value_name = "PATH")]
    paths: Vec<String>,

    /// Enable an analysis on top of the base set (repeatable).
    #[arg(short = 'E', long = "enable", value_name = "NAME")]
    enable: Vec<String>,

    /// Disable an analysis (repeatable).
    #[arg(short = 'D', long = "disable", value_name = "NAME")]
    disable: Vec<String>,

    /// Start from every registered analysis.
    #[arg(long)]
    enable_all: bool,

    /// Start from an empty set; requires at least one --enable.
    #[arg(long)]
    disable_all: bool,

    /// Activate a named preset (repeatable).
    #[arg(short = 'p', long = "preset", value_name = "NAME")]
    preset: Vec<String>,

    /// Drop slow analyses from the base set.
    #[arg(long)]
    fast: bool,

    /// Whole-run deadline in seconds.
    #[arg(long, value_name = "SECONDS")]
    deadline: Option<u64>,

    /// Worker pool size; 0 sizes it to the machine.
    #[arg(short = 'j', long, value_name = "N")]
    workers: Option<usize>,

    /// Drop findings whose message matches this regex (repeatable).
    #[arg(short = 'e', long = "exclude", value_name = "PATTERN")]
    exclude: Vec<String>,

    /// Keep findings the default exclusion patterns would drop.
    #[arg(long)]
    no_default_excludes: bool,

    /// Cap findings per analysis; 0 disables the cap.
    #[arg(long, value_name = "N")]
    max_per_analysis: Option<usize>,

    /// Cap findings per file; 0 disables the cap.
    #[arg(long, value_name = "N")]
    max_per_file: Option<usize>,

    /// Cap findings with identical message text; 0 disables the cap.
    #[arg(long, value_name = "N")]
    max_same_messages: Option<usize>,

    /// Ignore in-code nolint directives.
    #[arg(long)]
    no_suppressions: bool,

    /// Only report findings on lines changed in the working tree.
    #[arg(short = 'n', long)]
    new: bool,

    /// Only report findings on lines changed since this revision.
    #[arg(long, value_name = "REV", conflicts_with = "new")]
    new_from_rev: Option<String>,

    /// Only report findings on lines added by this patch file.
    #[arg(long, value_name = "FILE", conflicts_with_all = ["new", "new_from_rev"])]
    new_from_patch: Option<PathBuf>,

    /// Report format.
    #[arg(long, value_enum, value_name = "FORMAT")]
    format: Option<OutputFormat>,

    /// Disable colored output.
    #[arg(long)]
    no_color: bool,

    /// Config file to load; discovery is skipped.
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Run with built-in defaults only, ignoring any config file.
    #[arg(long, conflicts_with = "config")]
    no_config: bool,

    /// Skip test files (test_*.* and *_test.*).
    #[arg(long)]
    skip_tests: bool,

    /// Skip directories whose name matches this regex (repeatable).
    #[arg(long = "skip-dirs", value_name = "REGEX")]
    skip_dirs: Vec<String>,

    /// Ordering key, most significant first (repeatable):
    /// file, line, column, analysis, severity.
    #[arg(long = "sort-key", value_name = "KEY")]
    sort_keys: Vec<String>,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
pub enum OutputFormat {
    Text,
    Json,
}

impl RunArgs {
    pub fn execute(&self, verbose: bool) -> Result<i32> {
        let file_config = if self.no_config {
            None
        } else {
            config_file::discover(self.config.as_deref())?
        };

        let mut config = Config::default();
        if let Some(file) = &file_config {
            file.apply(&mut config)?;
        }
        self.apply(&mut config, verbose)?;
        let format = self.output_format(file_config.as_ref())?;

        let registry = builtin_registry();

        let resolver =
            FileResolver::new(&config.skip_dirs, &config.extensions, config.include_tests)?;
        let resolved = resolver.resolve(&config.roots)?;
        if resolved.files.is_empty() {
            println!("no files to analyze");
            return Ok(exit::NO_FILES);
        }
        tracing::debug!(
            "resolved {} files across {} directories",
            resolved.files.len(),
            resolved.dirs.len()
        );

        let active = resolve(&config, &registry)?;
        if verbose {
            let names: Vec<String> = active.iter().map(|entry| entry.name()).collect();
            tracing::info!("active analyses: {}", names.join(", "));
        }

        let changes = match &config.change_source {
            Some(source) => Some(collect_changes(source)?),
            None => None,
        };

        let pipeline = Pipeline::from_config(&config, &registry, changes)?;

        let config = Arc::new(config);
        let ctx = RunContext::new(resolved.files, Arc::clone(&config));
        let report = Runner::new(config.workers).run(&active, &ctx)?;

        for status in &report.statuses {
            if let Outcome::Failed { error } = &status.outcome {
                tracing::warn!("analysis {} failed: {error}", status.name);
            }
        }
        if verbose {
            printer::print_statuses(&report.statuses);
        }
        if report.deadline_exceeded {
            tracing::warn!("deadline exceeded, results may be incomplete");
        }

        let verdict = pipeline.run(report.findings)?;
        Printer::new(format == OutputFormat::Json, self.no_color).print(&verdict)?;

        if verdict.any_findings {
            Ok(exit::ISSUES_FOUND)
        } else if report.deadline_exceeded {
            Ok(exit::TIMEOUT)
        } else {
            Ok(exit::SUCCESS)
        }
    }

    /// Folds command line flags over the config. Lists extend, scalars
    /// override, absent flags leave the underlying value alone.
    fn apply(&self, config: &mut Config, verbose: bool) -> Result<()> {
        if !self.paths.is_empty() {
            config.roots = self.paths.clone();
        }
        config.enable.extend(self.enable.iter().cloned());
        config.disable.extend(self.disable.iter().cloned());
        config.presets.extend(self.preset.iter().cloned());
        if self.enable_all {
            config.enable_all = true;
        }
        if self.disable_all {
            config.disable_all = true;
        }
        if self.fast {
            config.fast_only = true;
        }

        if let Some(seconds) = self.deadline {
            config.deadline = Duration::from_secs(seconds);
        }
        if let Some(workers) = self.workers {
            config.workers = workers;
        }

        config.exclude_patterns.extend(self.exclude.iter().cloned());
        if self.no_default_excludes {
            config.use_default_excludes = false;
        }
        if let Some(cap) = self.max_per_analysis {
            config.max_per_analysis = cap;
        }
        if let Some(cap) = self.max_per_file {
            config.max_per_file = cap;
        }
        if let Some(cap) = self.max_same_messages {
            config.max_same_messages = cap;
        }
        if self.no_suppressions {
            config.respect_suppressions = false;
        }

        if self.new {
            config.change_source = Some(ChangeSource::WorkingTree);
        }
        if let Some(rev) = &self.new_from_rev {
            config.change_source = Some(ChangeSource::Revision(rev.clone()));
        }
        if let Some(path) = &self.new_from_patch {
            config.change_source = Some(ChangeSource::PatchFile(path.clone()));
        }

        if self.skip_tests {
            config.include_tests = false;
        }
        config.skip_dirs.extend(self.skip_dirs.iter().cloned());

        if !self.sort_keys.is_empty() {
            config.sort_keys = self
                .sort_keys
                .iter()
                .map(|key| key.parse::<SortKey>())
                .collect::<Result<Vec<_>, _>>()?;
        }

        // Analyses may print diagnostics of their own; verbose runs keep
        // that output visible instead of silencing the batch.
        if verbose {
            config.silence_output = false;
        }

        Ok(())
    }

    fn output_format(&self, file: Option<&config_file::FileConfig>) -> Result<OutputFormat> {
        if let Some(format) = self.format {
            return Ok(format);
        }
        if let Some(value) = file.and_then(|file| file.output.format.as_deref()) {
            return <OutputFormat as ValueEnum>::from_str(value, true)
                .map_err(|_| anyhow::anyhow!("unknown output format {value:?} in config file"));
        }
        Ok(OutputFormat::Text)
    }
}
