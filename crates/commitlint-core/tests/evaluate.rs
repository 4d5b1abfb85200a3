use commitlint_core::{lint, RuleId, RuleSet, Severity, Verdict, ALLOWED_TYPES};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn ids(verdict: &Verdict) -> Vec<RuleId> {
    verdict.violations.iter().map(|v| v.id).collect()
}

fn header_of_len(len: usize) -> String {
    let prefix = "feat: ";
    format!("{prefix}{}", "a".repeat(len - prefix.len()))
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn scoped_feature_passes() {
    let verdict = lint("feat(auth): add login flow", &RuleSet::atl());
    assert!(verdict.passed);
    assert!(verdict.violations.is_empty());
}

#[test]
fn free_text_header_fails_type_and_subject_case() {
    let verdict = lint("Added Login Flow", &RuleSet::atl());
    assert!(!verdict.passed);
    let found = ids(&verdict);
    assert!(found.contains(&RuleId::TypeEnum));
    assert!(found.contains(&RuleId::SubjectCase));

    let type_enum = verdict
        .violations
        .iter()
        .find(|v| v.id == RuleId::TypeEnum)
        .unwrap();
    assert!(type_enum.message.contains("no type found"));
}

#[test]
fn body_without_blank_line_fails() {
    let raw = "fix(ui): correct button color\nthe hover state used the wrong token";
    let verdict = lint(raw, &RuleSet::atl());
    assert_eq!(ids(&verdict), vec![RuleId::BodyLeadingBlank]);
    assert!(!verdict.passed);
}

#[test]
fn body_after_blank_line_passes() {
    let raw = "fix(ui): correct button color\n\nthe hover state used the wrong token\n";
    assert!(lint(raw, &RuleSet::atl()).violations.is_empty());
}

#[test]
fn short_header_fails_min_length() {
    let verdict = lint("fix!", &RuleSet::atl());
    let min = verdict
        .violations
        .iter()
        .find(|v| v.id == RuleId::HeaderMinLength)
        .unwrap();
    assert_eq!(min.severity, Severity::Error);
    assert!(min.message.contains("10"));
}

#[test]
fn header_length_boundary() {
    let set = RuleSet::atl();

    let at_limit = lint(&header_of_len(120), &set);
    assert!(!at_limit.has_violation(RuleId::HeaderMaxLength));
    assert!(at_limit.passed);

    let over = lint(&header_of_len(121), &set);
    let max = over
        .violations
        .iter()
        .find(|v| v.id == RuleId::HeaderMaxLength)
        .unwrap();
    assert!(max.message.contains("120"));
    assert!(!over.passed);
}

#[test]
fn unknown_type_reports_exactly_one_type_enum() {
    for raw in [
        "wip: add login flow",
        "feature(auth): add login flow",
        "oops(ui): fix",
    ] {
        let verdict = lint(raw, &RuleSet::atl());
        let count = verdict
            .violations
            .iter()
            .filter(|v| v.id == RuleId::TypeEnum)
            .count();
        assert_eq!(count, 1, "{raw}");
    }
}

#[test]
fn type_enum_does_not_change_other_rules() {
    let set = RuleSet::atl();
    let good = lint("feat(auth): Add login flow", &set);
    let bad = lint("wip(auth): Add login flow", &set);

    let others = |v: &Verdict| {
        v.violations
            .iter()
            .filter(|x| x.id != RuleId::TypeEnum)
            .map(|x| x.id)
            .collect::<Vec<_>>()
    };
    assert_eq!(others(&good), others(&bad));
    assert_eq!(others(&good), vec![RuleId::SubjectCase]);
}

#[test]
fn every_allowed_type_passes() {
    let set = RuleSet::atl();
    for t in ALLOWED_TYPES {
        let raw = format!("{t}(core): keep things tidy");
        assert!(lint(&raw, &set).violations.is_empty(), "{raw}");
    }
}

#[test]
fn scope_length_bounds() {
    let set = RuleSet::atl();
    assert!(lint("feat(abcdefghijklmnopqrst): add thing", &set).passed);

    let long = lint("feat(abcdefghijklmnopqrstu): add thing", &set);
    assert_eq!(ids(&long), vec![RuleId::ScopeMaxLength]);

    let empty = lint("feat(): add a thing", &set);
    assert_eq!(ids(&empty), vec![RuleId::ScopeMinLength]);
}

#[test]
fn missing_scope_is_allowed() {
    assert!(lint("docs: explain the bridge setup", &RuleSet::atl()).passed);
}

#[test]
fn long_footer_line_fails() {
    let raw = format!(
        "feat(bridge): relay reactions\n\nadds relay support\n\nRefs: {}",
        "x".repeat(120)
    );
    let verdict = lint(&raw, &RuleSet::atl());
    assert_eq!(ids(&verdict), vec![RuleId::FooterMaxLineLength]);
}

#[test]
fn unbounded_body_accepts_long_lines() {
    let raw = format!("feat(web): add landing page\n\n{}", "y".repeat(500));
    assert!(lint(&raw, &RuleSet::atl()).violations.is_empty());
}

#[test]
fn breaking_change_inside_body_fails_footer_blank() {
    let raw = "feat(api)!: drop v1 routes\n\nremoves the old api\nBREAKING CHANGE: v1 is gone";
    let verdict = lint(raw, &RuleSet::atl());
    assert_eq!(ids(&verdict), vec![RuleId::FooterLeadingBlank]);

    let separated = "feat(api)!: drop v1 routes\n\nremoves the old api\n\nBREAKING CHANGE: v1 is gone";
    assert!(lint(separated, &RuleSet::atl()).violations.is_empty());
}

#[test]
fn breaking_change_among_footer_trailers_passes() {
    let raw = "feat(api)!: drop v1 routes\n\nremoves the old api\n\nRefs: #12\nBREAKING CHANGE: v1 is gone";
    let verdict = lint(raw, &RuleSet::atl());
    assert!(verdict.violations.is_empty());
    assert!(verdict.passed);
}

#[test]
fn overlong_unknown_type_fails_enum_and_max_length() {
    let verdict = lint("abcdefghijklmnop: add a thing", &RuleSet::atl());
    assert_eq!(ids(&verdict), vec![RuleId::TypeEnum, RuleId::TypeMaxLength]);
}

#[test]
fn two_blank_lines_before_body_fail() {
    let verdict = lint("fix(ui): correct the color\n\n\nbody", &RuleSet::atl());
    assert_eq!(ids(&verdict), vec![RuleId::BodyLeadingBlank]);
    assert_eq!(
        verdict.violations[0].message,
        "body must have exactly one leading blank line"
    );
}

#[test]
fn default_ignores_skip_generated_messages() {
    let set = RuleSet::atl();
    for raw in [
        "Merge branch 'main' into feature",
        "Merge pull request #12 from org/branch",
        "Revert \"feat: add thing\"",
        "fixup! feat: add thing",
        "squash! feat: add thing",
        "v1.2.3",
    ] {
        let verdict = lint(raw, &set);
        assert!(verdict.ignored, "{raw}");
        assert!(verdict.passed, "{raw}");
    }

    let strict = RuleSet::atl().with_default_ignores(false);
    assert!(!lint("Merge branch 'main' into feature", &strict).passed);
}

#[test]
fn evaluation_is_idempotent() {
    let set = RuleSet::atl();
    for raw in [
        "feat(auth): add login flow",
        "Added Login Flow",
        "fix!",
        "fix(ui): correct button color\nbody",
    ] {
        assert_eq!(lint(raw, &set), lint(raw, &set));
    }
}

#[test]
fn violations_follow_rule_order() {
    let raw = format!("WIP({}): {}", "s".repeat(25), "Z".repeat(130));
    let verdict = lint(&raw, &RuleSet::atl());
    let order: Vec<usize> = verdict
        .violations
        .iter()
        .map(|v| {
            RuleSet::atl()
                .rules()
                .iter()
                .position(|r| r.id() == v.id)
                .unwrap()
        })
        .collect();
    let mut sorted = order.clone();
    sorted.sort_unstable();
    assert_eq!(order, sorted);
    assert!(verdict.violations.len() >= 4);
}

// ---------------------------------------------------------------------------
// conventional preset
// ---------------------------------------------------------------------------

#[test]
fn conventional_preset_is_stricter_on_headers() {
    let set = RuleSet::conventional();
    let long = lint(&header_of_len(101), &set);
    assert!(long.has_violation(RuleId::HeaderMaxLength));

    let stop = lint("fix: handle empty input.", &set);
    assert_eq!(ids(&stop), vec![RuleId::SubjectFullStop]);

    let upper_type = lint("FIX: handle empty input", &set);
    assert!(upper_type.has_violation(RuleId::TypeCase));
}

#[test]
fn conventional_preset_warns_on_missing_blank() {
    let set = RuleSet::conventional();
    let verdict = lint("fix: handle empty input\nextra context", &set);
    assert!(verdict.passed);
    assert_eq!(verdict.warning_count(), 1);
    assert!(!verdict.passed_with(true));
}
