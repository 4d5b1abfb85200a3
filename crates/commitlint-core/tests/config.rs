use std::fs;

use commitlint_core::{
    discover_config, lint, load_config, CommitlintError, ConfigError, ConfigSource, RawConfig,
    RuleId, RuleSet, Severity, CONFIG_FILE_NAME,
};

fn write_config(dir: &std::path::Path, json: &str) -> std::path::PathBuf {
    let path = dir.join(CONFIG_FILE_NAME);
    fs::write(&path, json).unwrap();
    path
}

#[test]
fn local_config_changes_the_verdict() {
    let dir = tempfile::tempdir().unwrap();
    write_config(
        dir.path(),
        r#"{
            "extends": "atl",
            "rules": {
                "header-max-length": [1, "always", 30],
                "subject-full-stop": [2, "never", "."]
            },
            "ignores": ["^WIP "]
        }"#,
    );

    let (set, source) = discover_config(dir.path(), None).unwrap();
    assert_eq!(source, ConfigSource::File(dir.path().join(CONFIG_FILE_NAME)));

    let long = lint("feat(auth): add a much longer login flow", &set);
    assert!(long.passed);
    assert_eq!(long.warning_count(), 1);
    assert_eq!(long.violations[0].severity, Severity::Warning);

    let stop = lint("feat(auth): add login.", &set);
    assert!(stop.has_violation(RuleId::SubjectFullStop));

    let wip = lint("WIP Something Half Done", &set);
    assert!(wip.ignored);
}

#[test]
fn upstream_array_extends_loads_conventional_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        dir.path(),
        r#"{
            "extends": ["@commitlint/config-conventional"],
            "rules": { "header-max-length": [2, "always", 120] }
        }"#,
    );

    let set = load_config(&path).unwrap();
    assert_eq!(
        set.get(RuleId::BodyLeadingBlank).unwrap().severity(),
        Severity::Warning
    );

    let stop = lint("fix: handle empty input.", &set);
    assert!(stop.has_violation(RuleId::SubjectFullStop));

    let long = format!("feat: {}", "a".repeat(110));
    assert!(lint(&long, &set).passed);
}

#[test]
fn missing_local_config_falls_back_to_builtin() {
    let dir = tempfile::tempdir().unwrap();
    let (set, source) = discover_config(dir.path(), None).unwrap();
    assert_eq!(source, ConfigSource::BuiltIn);
    assert_eq!(set.rules().len(), RuleSet::atl().rules().len());
}

#[test]
fn explicit_path_must_exist() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.json");
    let err = discover_config(dir.path(), Some(missing.as_path())).unwrap_err();
    assert!(matches!(err, CommitlintError::Io(_)));
}

#[test]
fn invalid_config_is_rejected_before_linting() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        dir.path(),
        r#"{ "rules": { "scope-min-length": [2, "always", 25] } }"#,
    );
    let err = load_config(&path).unwrap_err();
    assert!(matches!(
        err,
        CommitlintError::Config(ConfigError::ConflictingBounds { .. })
    ));
}

#[test]
fn printed_builtin_config_reloads_to_same_verdicts() {
    let json = serde_json::to_string_pretty(&RawConfig::from_rule_set(&RuleSet::atl())).unwrap();
    let reloaded = RawConfig::from_json(&json).unwrap().into_rule_set().unwrap();

    for raw in [
        "feat(auth): add login flow",
        "Added Login Flow",
        "fix!",
        "fix(ui): correct button color\nbody",
    ] {
        assert_eq!(lint(raw, &RuleSet::atl()), lint(raw, &reloaded), "{raw}");
    }
}
