//! Rule predicates and their message templates.

use crate::domain::{CommitMessage, Header};

use super::{CaseStyle, Condition, Limit, Rule, RuleId, RuleValue};

/// Evaluate one rule. Returns the rendered message when the rule is violated.
///
/// Length rules ignore the condition; every other rule negates its predicate
/// under `never`.
pub(crate) fn check_rule(rule: &Rule, msg: &CommitMessage, header: &Header) -> Option<String> {
    let negated = rule.condition() == Condition::Never;
    let must = if negated { "must not" } else { "must" };

    match (rule.id(), rule.value()) {
        (RuleId::TypeEnum, RuleValue::Types(allowed)) => {
            let list = allowed.join(", ");
            match &header.commit_type {
                None if negated => None,
                None => Some(format!("type must be one of [{list}], no type found")),
                Some(t) => {
                    let listed = allowed.iter().any(|a| a == t);
                    violated(listed, negated).then(|| format!("type {must} be one of [{list}]"))
                }
            }
        }

        (RuleId::TypeCase, RuleValue::Cases(cases)) => {
            let t = header.commit_type.as_deref()?;
            case_violation("type", t, cases, negated)
        }

        (RuleId::TypeEmpty, RuleValue::None) => {
            empty_violation("type", header.commit_type.is_none(), negated)
        }

        (RuleId::TypeMaxLength, RuleValue::Limit(limit)) => {
            let t = header.commit_type.as_deref()?;
            max_violation("type", t, *limit)
        }

        (RuleId::ScopeEmpty, RuleValue::None) => {
            let empty = header.scope.as_deref().map_or(true, str::is_empty);
            empty_violation("scope", empty, negated)
        }

        (RuleId::ScopeMinLength, RuleValue::Limit(limit)) => {
            let scope = header.scope.as_deref()?;
            min_violation("scope", scope, *limit)
        }

        (RuleId::ScopeMaxLength, RuleValue::Limit(limit)) => {
            let scope = header.scope.as_deref()?;
            max_violation("scope", scope, *limit)
        }

        (RuleId::SubjectCase, RuleValue::Cases(cases)) => {
            if !header.subject.starts_with(|c: char| c.is_ascii_alphabetic()) {
                return None;
            }
            case_violation("subject", &header.subject, cases, negated)
        }

        (RuleId::SubjectEmpty, RuleValue::None) => {
            empty_violation("subject", header.subject.is_empty(), negated)
        }

        (RuleId::SubjectFullStop, RuleValue::Text(stop)) => {
            if header.subject.is_empty() {
                return None;
            }
            let ends = header.subject.ends_with(stop.as_str());
            let verb = if negated { "may not" } else { "must" };
            violated(ends, negated).then(|| format!("subject {verb} end with full stop"))
        }

        (RuleId::SubjectMaxLength, RuleValue::Limit(limit)) => {
            max_violation("subject", &header.subject, *limit)
        }

        (RuleId::HeaderMinLength, RuleValue::Limit(limit)) => {
            let len = char_len(msg.header());
            let min = limit.bound()?;
            (len < min).then(|| {
                format!(
                    "header must not be shorter than {min} characters, current length is {len}"
                )
            })
        }

        (RuleId::HeaderMaxLength, RuleValue::Limit(limit)) => {
            let len = char_len(msg.header());
            (!limit.allows_at_most(len)).then(|| {
                format!(
                    "header must not be longer than {limit} characters, current length is {len}"
                )
            })
        }

        (RuleId::HeaderTrim, RuleValue::None) => {
            let trimmed = msg.header() == msg.header().trim();
            violated(trimmed, negated)
                .then(|| format!("header {must} be trimmed of surrounding whitespace"))
        }

        (RuleId::BodyLeadingBlank, RuleValue::None) => {
            let gap = msg.header_gap()?;
            violated(gap == 1, negated)
                .then(|| format!("body {must} have exactly one leading blank line"))
        }

        (RuleId::BodyMaxLength, RuleValue::Limit(limit)) => {
            let body = msg.body_text()?;
            max_violation("body", &body, *limit)
        }

        (RuleId::BodyMaxLineLength, RuleValue::Limit(limit)) => {
            lines_violation("body", msg.body(), *limit)
        }

        (RuleId::FooterLeadingBlank, RuleValue::None) => {
            let embedded = msg.embedded_footer_tokens();
            if !msg.has_footer() && embedded.is_empty() {
                return None;
            }
            violated(embedded.is_empty(), negated)
                .then(|| format!("footer {must} have leading blank line"))
        }

        (RuleId::FooterMinLength, RuleValue::Limit(limit)) => {
            let footer = msg.footer_text()?;
            min_violation("footer", &footer, *limit)
        }

        (RuleId::FooterMaxLineLength, RuleValue::Limit(limit)) => {
            lines_violation("footer", msg.footer(), *limit)
        }

        // Rule::new guarantees the id/value pairing.
        _ => None,
    }
}

fn violated(holds: bool, negated: bool) -> bool {
    holds == negated
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn case_violation(field: &str, text: &str, cases: &[CaseStyle], negated: bool) -> Option<String> {
    let matched = cases.iter().any(|c| c.matches(text));
    let list = cases
        .iter()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let must = if negated { "must not" } else { "must" };
    violated(matched, negated).then(|| format!("{field} {must} be {list}"))
}

fn empty_violation(field: &str, empty: bool, negated: bool) -> Option<String> {
    if negated {
        empty.then(|| format!("{field} may not be empty"))
    } else {
        (!empty).then(|| format!("{field} must be empty"))
    }
}

fn max_violation(field: &str, text: &str, limit: Limit) -> Option<String> {
    (!limit.allows_at_most(char_len(text)))
        .then(|| format!("{field} must not be longer than {limit} characters"))
}

fn min_violation(field: &str, text: &str, limit: Limit) -> Option<String> {
    let min = limit.bound()?;
    (char_len(text) < min).then(|| format!("{field} must not be shorter than {min} characters"))
}

fn lines_violation(field: &str, lines: &[String], limit: Limit) -> Option<String> {
    lines
        .iter()
        .any(|line| !limit.allows_at_most(char_len(line)))
        .then(|| format!("{field}'s lines must not be longer than {limit} characters"))
}
