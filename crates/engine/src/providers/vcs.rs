//! Change-data collection for incremental runs.
//!
//! Three modes mirror the `--new*` flags: the working tree and a named
//! revision shell out to `git diff` with zero context, an external patch
//! file is read as-is. All three funnel into one unified-diff parser that
//! records, per file, the set of added line numbers.

use std::fs;
use std::process::Command;

use crate::core::{ChangeSource, ProviderError};
use crate::pipeline::ChangeSet;

/// Collects the added-line sets for the requested change source.
pub fn collect_changes(source: &ChangeSource) -> Result<ChangeSet, ProviderError> {
    match source {
        ChangeSource::WorkingTree => git_diff(&["diff", "--no-color", "--unified=0", "HEAD"]),
        ChangeSource::Revision(revision) => {
            git_diff(&["diff", "--no-color", "--unified=0", revision])
        }
        ChangeSource::PatchFile(path) => {
            let patch = fs::read_to_string(path).map_err(|source| ProviderError::Patch {
                path: path.clone(),
                source,
            })?;
            parse_unified_diff(&patch)
        }
    }
}

fn git_diff(args: &[&str]) -> Result<ChangeSet, ProviderError> {
    let rendered = format!("git {}", args.join(" "));
    let output = Command::new("git")
        .args(args)
        .output()
        .map_err(|err| ProviderError::Vcs {
            command: rendered.clone(),
            message: err.to_string(),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ProviderError::Vcs {
            command: rendered,
            message: format!("{}: {}", output.status, stderr.trim()),
        });
    }

    parse_unified_diff(&String::from_utf8_lossy(&output.stdout))
}

/// Extracts added lines from a unified diff, context allowed or not.
///
/// Hunk content is consumed by the counts declared in the `@@` header, so
/// added lines whose text happens to start with `+++` never get mistaken
/// for a file header.
pub fn parse_unified_diff(text: &str) -> Result<ChangeSet, ProviderError> {
    let mut changes = ChangeSet::new();
    let mut current_file: Option<String> = None;
    let mut line_number = 0usize;
    let mut remaining_old = 0usize;
    let mut remaining_new = 0usize;

    for line in text.lines() {
        if remaining_old > 0 || remaining_new > 0 {
            if line.starts_with('\\') {
                // "\ No newline at end of file" consumes nothing.
                continue;
            }
            if let Some(_added) = line.strip_prefix('+') {
                if let Some(file) = &current_file {
                    changes.insert(file, line_number);
                }
                line_number += 1;
                remaining_new = remaining_new.saturating_sub(1);
            } else if line.starts_with('-') {
                remaining_old = remaining_old.saturating_sub(1);
            } else {
                line_number += 1;
                remaining_old = remaining_old.saturating_sub(1);
                remaining_new = remaining_new.saturating_sub(1);
            }
            continue;
        }

        if let Some(header) = line.strip_prefix("+++ ") {
            let path = header.split('\t').next().unwrap_or(header);
            current_file = if path == "/dev/null" {
                None
            } else {
                Some(path.strip_prefix("b/").unwrap_or(path).to_string())
            };
        } else if line.starts_with("@@") {
            let (new_start, old_count, new_count) = parse_hunk_header(line)?;
            line_number = new_start;
            remaining_old = old_count;
            remaining_new = new_count;
        }
    }

    Ok(changes)
}

fn parse_hunk_header(line: &str) -> Result<(usize, usize, usize), ProviderError> {
    hunk_header_parts(line).ok_or_else(|| ProviderError::BadHunk(line.to_string()))
}

fn hunk_header_parts(line: &str) -> Option<(usize, usize, usize)> {
    let mut parts = line.split_whitespace();
    parts.next()?; // "@@"
    let old = parts.next()?.strip_prefix('-')?;
    let new = parts.next()?.strip_prefix('+')?;
    let (_, old_count) = parse_range(old)?;
    let (new_start, new_count) = parse_range(new)?;
    Some((new_start, old_count, new_count))
}

fn parse_range(text: &str) -> Option<(usize, usize)> {
    match text.split_once(',') {
        Some((start, count)) => Some((start.parse().ok()?, count.parse().ok()?)),
        None => Some((text.parse().ok()?, 1)),
    }
}
