use std::fs;

use lintmux_engine::{builtin_registry, ChangeSet, Config, Finding, Pipeline, SortKey};

fn finding(analysis: &str, file: &str, line: usize, message: &str) -> Finding {
    Finding::new(
        analysis.to_string(),
        file.to_string(),
        line,
        message.to_string(),
    )
}

fn pipeline(config: &Config, changes: Option<ChangeSet>) -> Pipeline {
    let registry = builtin_registry();
    Pipeline::from_config(config, &registry, changes).unwrap()
}

#[test]
fn test_same_position_findings_collapse_to_one() {
    let config = Config::default();
    let verdict = pipeline(&config, None)
        .run(vec![
            finding("trailing-space", "src/a.rs", 7, "trailing whitespace"),
            finding("line-length", "src/a.rs", 7, "line is 140 characters long, limit is 120"),
        ])
        .unwrap();

    assert_eq!(verdict.findings.len(), 1);
    assert_eq!(verdict.findings[0].analysis, "trailing-space");
    assert!(verdict.any_findings);
}

#[test]
fn test_processed_list_passes_through_unchanged() {
    let config = Config::default();
    let chain = pipeline(&config, None);

    let input = vec![
        finding("line-length", "src/b.rs", 3, "line is 130 characters long, limit is 120"),
        finding("line-length", "src/a.rs", 9, "line is 125 characters long, limit is 120"),
        finding("mixed-indent", "src/a.rs", 2, "space before tab in indentation"),
    ];

    let first = chain.run(input).unwrap();
    let second = chain.run(first.findings.clone()).unwrap();

    assert_eq!(first.findings, second.findings);
    assert_eq!(first.any_findings, second.any_findings);
}

#[test]
fn test_default_excludes_cover_noisy_messages() {
    let config = Config::default();
    let verdict = pipeline(&config, None)
        .run(vec![
            finding("todo-marker", "src/a.rs", 1, "TODO marker: tidy this up"),
            finding("final-newline", "src/a.rs", 40, "no final newline at end of file"),
            finding("trailing-space", "src/a.rs", 2, "trailing whitespace"),
        ])
        .unwrap();

    assert_eq!(verdict.findings.len(), 1);
    assert_eq!(verdict.findings[0].analysis, "trailing-space");
}

#[test]
fn test_default_excludes_can_be_switched_off() {
    let mut config = Config::default();
    config.use_default_excludes = false;
    let verdict = pipeline(&config, None)
        .run(vec![finding(
            "todo-marker",
            "src/a.rs",
            1,
            "TODO marker: tidy this up",
        )])
        .unwrap();

    assert_eq!(verdict.findings.len(), 1);
}

#[test]
fn test_user_patterns_stack_on_default_excludes() {
    let mut config = Config::default();
    config.exclude_patterns = vec!["characters long".to_string()];
    let verdict = pipeline(&config, None)
        .run(vec![
            finding("line-length", "src/a.rs", 1, "line is 130 characters long, limit is 120"),
            finding("mixed-indent", "src/a.rs", 2, "space before tab in indentation"),
        ])
        .unwrap();

    assert_eq!(verdict.findings.len(), 1);
    assert_eq!(verdict.findings[0].analysis, "mixed-indent");
}

#[test]
fn test_per_analysis_volume_cap_applies() {
    let mut config = Config::default();
    // The identical-message cap would fire first; lift it to see the
    // per-analysis cap alone.
    config.max_same_messages = 0;

    let input: Vec<Finding> = (1..=60)
        .map(|line| finding("line-length", "src/a.rs", line, "line is 121 characters long, limit is 120"))
        .collect();

    let verdict = pipeline(&config, None).run(input).unwrap();
    assert_eq!(verdict.findings.len(), 50);
}

#[test]
fn test_identical_message_cap_applies() {
    let config = Config::default();
    let input: Vec<Finding> = (1..=10)
        .map(|line| finding("orphan-symbol", "src/a.rs", line, "symbol `x` is defined but never referenced"))
        .collect();

    let verdict = pipeline(&config, None).run(input).unwrap();
    assert_eq!(verdict.findings.len(), 3);
}

#[test]
fn test_suppression_reads_real_source_positions() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("code.py");
    fs::write(
        &path,
        "\
value = 1  # nolint:ll
toolong = 2
# nolint:todo-marker
def later():
    pass
after = 3
",
    )
    .unwrap();
    let file = path.display().to_string();

    let config = Config::default();
    let verdict = pipeline(&config, None)
        .run(vec![
            finding("line-length", &file, 1, "line is 130 characters long, limit is 120"),
            finding("line-length", &file, 2, "line is 128 characters long, limit is 120"),
            finding("todo-marker", &file, 4, "annotation left in code"),
            finding("todo-marker", &file, 6, "annotation left in code"),
            finding("mixed-indent", &file, 5, "space before tab in indentation"),
        ])
        .unwrap();

    let survivors: Vec<(String, usize)> = verdict
        .findings
        .iter()
        .map(|f| (f.analysis.clone(), f.line))
        .collect();

    // Line 1 is inline-suppressed for line-length via its alias; the
    // standalone directive covers the following block (lines 3 to 5) for
    // todo-marker only.
    assert_eq!(
        survivors,
        [
            ("line-length".to_string(), 2),
            ("mixed-indent".to_string(), 5),
            ("todo-marker".to_string(), 6),
        ]
    );
}

#[test]
fn test_wildcard_suppression_silences_every_analysis() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("all.rs");
    fs::write(&path, "let x = compute(); // nolint\n").unwrap();
    let file = path.display().to_string();

    let config = Config::default();
    let verdict = pipeline(&config, None)
        .run(vec![
            finding("line-length", &file, 1, "line is 121 characters long, limit is 120"),
            finding("mixed-indent", &file, 1, "space before tab in indentation"),
        ])
        .unwrap();

    assert!(verdict.findings.is_empty());
    assert!(!verdict.any_findings);
}

#[test]
fn test_diff_filter_keeps_only_added_lines() {
    let mut changes = ChangeSet::new();
    changes.insert("src/a.rs", 5);

    let config = Config::default();
    let verdict = pipeline(&config, Some(changes))
        .run(vec![
            finding("line-length", "src/a.rs", 5, "line is 121 characters long, limit is 120"),
            finding("line-length", "src/a.rs", 6, "line is 122 characters long, limit is 120"),
            finding("mixed-indent", "src/b.rs", 5, "space before tab in indentation"),
        ])
        .unwrap();

    assert_eq!(verdict.findings.len(), 1);
    assert_eq!(verdict.findings[0].line, 5);
    assert_eq!(verdict.findings[0].file, "src/a.rs");
}

#[test]
fn test_sort_is_stable_across_unknown_positions() {
    let mut config = Config::default();
    config.sort_keys = vec![SortKey::Column];

    let first = finding("orphan-symbol", "src/a.rs", 9, "symbol `a` is defined but never referenced");
    let second = finding("orphan-symbol", "src/b.rs", 4, "symbol `b` is defined but never referenced");

    // Both columns are 0 (unknown): the comparator is neutral, so input
    // order survives the sort.
    let verdict = pipeline(&config, None)
        .run(vec![first.clone(), second.clone()])
        .unwrap();

    assert_eq!(verdict.findings, [first, second]);
}

#[test]
fn test_sort_by_severity_uses_the_ranking() {
    let mut config = Config::default();
    config.sort_keys = vec![SortKey::Severity];

    let verdict = pipeline(&config, None)
        .run(vec![
            finding("conflict-marker", "src/a.rs", 1, "merge conflict marker").with_severity("error"),
            finding("trailing-space", "src/b.rs", 2, "trailing whitespace").with_severity("low"),
            finding("line-length", "src/c.rs", 3, "line is 121 characters long, limit is 120")
                .with_severity("warning"),
        ])
        .unwrap();

    let severities: Vec<&str> = verdict
        .findings
        .iter()
        .map(|f| f.severity.as_deref().unwrap())
        .collect();
    assert_eq!(severities, ["low", "warning", "error"]);
}

#[test]
fn test_empty_result_reports_no_findings() {
    let config = Config::default();
    let verdict = pipeline(&config, None).run(Vec::new()).unwrap();

    assert!(verdict.findings.is_empty());
    assert!(!verdict.any_findings);
}
