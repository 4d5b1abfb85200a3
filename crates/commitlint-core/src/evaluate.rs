//! Rule evaluator.
//!
//! Applies every enabled rule of a [`RuleSet`] to a [`CommitMessage`] and
//! collects a [`Verdict`]. Evaluation never stops early: all problems are
//! reported in one pass.

use serde::{Deserialize, Serialize};

use crate::domain::CommitMessage;
use crate::obs::{emit_message_evaluated, emit_message_ignored};
use crate::rules::check::check_rule;
use crate::rules::{RuleId, Severity};
use crate::ruleset::RuleSet;

/// A single rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Which rule was violated.
    pub id: RuleId,
    pub severity: Severity,
    /// Human-readable explanation with the rule parameters filled in.
    pub message: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} {}", self.severity, self.id, self.message)
    }
}

/// The outcome of linting one message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    /// False iff at least one error-severity rule was violated.
    pub passed: bool,
    /// The message matched an ignore pattern and was not linted.
    pub ignored: bool,
    /// Violations in rule declaration order.
    pub violations: Vec<Violation>,
}

impl Verdict {
    fn ignored() -> Self {
        Self {
            passed: true,
            ignored: true,
            violations: Vec::new(),
        }
    }

    fn from_violations(violations: Vec<Violation>) -> Self {
        let passed = !violations.iter().any(|v| v.severity == Severity::Error);
        Self {
            passed,
            ignored: false,
            violations,
        }
    }

    pub fn errors(&self) -> impl Iterator<Item = &Violation> {
        self.violations
            .iter()
            .filter(|v| v.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Violation> {
        self.violations
            .iter()
            .filter(|v| v.severity == Severity::Warning)
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    /// Passed, and when `strict` is set, also free of warnings.
    pub fn passed_with(&self, strict: bool) -> bool {
        self.passed && (!strict || self.warning_count() == 0)
    }

    pub fn has_violation(&self, id: RuleId) -> bool {
        self.violations.iter().any(|v| v.id == id)
    }
}

/// Evaluate a parsed message against a rule set.
pub fn evaluate(msg: &CommitMessage, rule_set: &RuleSet) -> Verdict {
    if rule_set.is_ignored(msg.raw()) {
        emit_message_ignored(msg.header());
        return Verdict::ignored();
    }

    let header = msg.parsed_header();
    let violations = rule_set
        .rules()
        .iter()
        .filter(|rule| rule.is_enabled())
        .filter_map(|rule| {
            check_rule(rule, msg, &header).map(|message| Violation {
                id: rule.id(),
                severity: rule.severity(),
                message,
            })
        })
        .collect();

    let verdict = Verdict::from_violations(violations);
    emit_message_evaluated(
        msg.header(),
        verdict.error_count(),
        verdict.warning_count(),
        verdict.passed,
    );
    verdict
}

/// Parse raw text and evaluate it.
pub fn lint(raw: &str, rule_set: &RuleSet) -> Verdict {
    evaluate(&CommitMessage::parse(raw), rule_set)
}
