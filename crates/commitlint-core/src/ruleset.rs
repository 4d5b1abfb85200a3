//! Ordered rule tables and their global settings.
//!
//! Two presets are built in:
//! - `atl`: the project policy (default)
//! - `conventional`: the upstream conventional-commit table the project
//!   policy was derived from
//!
//! A third, `none`, is empty and exists so a fully resolved table can be
//! written out and loaded back unchanged.

use regex::Regex;

use crate::domain::ConfigError;
use crate::ignore::is_default_ignored;
use crate::rules::{CaseStyle, Condition, Limit, Rule, RuleId, RuleValue, Severity};

/// Commit types accepted by `type-enum`.
pub const ALLOWED_TYPES: [&str; 11] = [
    "build", "chore", "ci", "docs", "feat", "fix", "perf", "refactor", "revert", "style", "test",
];

pub const DEFAULT_HELP_URL: &str = "https://github.com/conventional-changelog/commitlint";

/// Pairs of rules bounding the same field from below and above.
const BOUND_PAIRS: [(RuleId, RuleId); 2] = [
    (RuleId::ScopeMinLength, RuleId::ScopeMaxLength),
    (RuleId::HeaderMinLength, RuleId::HeaderMaxLength),
];

/// A named built-in rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Atl,
    Conventional,
    None,
}

impl Preset {
    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        match name {
            "atl" => Ok(Self::Atl),
            "conventional" | "@commitlint/config-conventional" => Ok(Self::Conventional),
            "none" => Ok(Self::None),
            other => Err(ConfigError::UnknownPreset(other.to_string())),
        }
    }

    pub fn rule_set(self) -> RuleSet {
        match self {
            Self::Atl => RuleSet::atl(),
            Self::Conventional => RuleSet::conventional(),
            Self::None => RuleSet::empty(),
        }
    }
}

/// Rules in declaration order plus global settings.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<Rule>,
    default_ignores: bool,
    ignores: Vec<Regex>,
    help_url: Option<String>,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::atl()
    }
}

fn forbidden_subject_cases() -> RuleValue {
    RuleValue::Cases(vec![
        CaseStyle::SentenceCase,
        CaseStyle::StartCase,
        CaseStyle::PascalCase,
        CaseStyle::UpperCase,
    ])
}

fn allowed_types() -> RuleValue {
    RuleValue::Types(ALLOWED_TYPES.iter().map(|t| t.to_string()).collect())
}

fn limit(n: usize) -> RuleValue {
    RuleValue::Limit(Limit::Bounded(n))
}

impl RuleSet {
    /// A rule set with no rules and default ignores on.
    pub fn empty() -> Self {
        Self {
            rules: Vec::new(),
            default_ignores: true,
            ignores: Vec::new(),
            help_url: None,
        }
    }

    /// The project policy.
    pub fn atl() -> Self {
        use Condition::{Always, Never};
        use Severity::{Disabled, Error};

        let rules = vec![
            Rule::fixed(RuleId::TypeEnum, Error, Always, allowed_types()),
            Rule::fixed(RuleId::TypeMaxLength, Error, Always, limit(15)),
            Rule::fixed(RuleId::ScopeEmpty, Disabled, Never, RuleValue::None),
            Rule::fixed(RuleId::ScopeMinLength, Error, Always, limit(1)),
            Rule::fixed(RuleId::ScopeMaxLength, Error, Always, limit(20)),
            Rule::fixed(RuleId::SubjectCase, Error, Never, forbidden_subject_cases()),
            Rule::fixed(RuleId::SubjectMaxLength, Error, Always, limit(120)),
            Rule::fixed(RuleId::HeaderMinLength, Error, Always, limit(10)),
            Rule::fixed(RuleId::HeaderMaxLength, Error, Always, limit(120)),
            Rule::fixed(RuleId::BodyLeadingBlank, Error, Always, RuleValue::None),
            Rule::fixed(
                RuleId::BodyMaxLength,
                Error,
                Always,
                RuleValue::Limit(Limit::Unbounded),
            ),
            Rule::fixed(
                RuleId::BodyMaxLineLength,
                Error,
                Always,
                RuleValue::Limit(Limit::Unbounded),
            ),
            Rule::fixed(RuleId::FooterLeadingBlank, Error, Always, RuleValue::None),
            Rule::fixed(RuleId::FooterMinLength, Error, Always, limit(0)),
            Rule::fixed(RuleId::FooterMaxLineLength, Error, Always, limit(120)),
        ];

        Self {
            rules,
            default_ignores: true,
            ignores: Vec::new(),
            help_url: Some(DEFAULT_HELP_URL.to_string()),
        }
    }

    /// The upstream conventional-commit table.
    pub fn conventional() -> Self {
        use Condition::{Always, Never};
        use Severity::{Error, Warning};

        let rules = vec![
            Rule::fixed(RuleId::BodyLeadingBlank, Warning, Always, RuleValue::None),
            Rule::fixed(RuleId::BodyMaxLineLength, Error, Always, limit(100)),
            Rule::fixed(RuleId::FooterLeadingBlank, Warning, Always, RuleValue::None),
            Rule::fixed(RuleId::FooterMaxLineLength, Error, Always, limit(100)),
            Rule::fixed(RuleId::HeaderMaxLength, Error, Always, limit(100)),
            Rule::fixed(RuleId::HeaderTrim, Error, Always, RuleValue::None),
            Rule::fixed(RuleId::SubjectCase, Error, Never, forbidden_subject_cases()),
            Rule::fixed(RuleId::SubjectEmpty, Error, Never, RuleValue::None),
            Rule::fixed(
                RuleId::SubjectFullStop,
                Error,
                Never,
                RuleValue::Text(".".to_string()),
            ),
            Rule::fixed(
                RuleId::TypeCase,
                Error,
                Always,
                RuleValue::Cases(vec![CaseStyle::LowerCase]),
            ),
            Rule::fixed(RuleId::TypeEmpty, Error, Never, RuleValue::None),
            Rule::fixed(RuleId::TypeEnum, Error, Always, allowed_types()),
        ];

        Self {
            rules,
            default_ignores: true,
            ignores: Vec::new(),
            help_url: Some(DEFAULT_HELP_URL.to_string()),
        }
    }

    /// Replace the rule with the same id in place, or append it.
    pub fn with_rule(mut self, rule: Rule) -> Self {
        match self.rules.iter_mut().find(|r| r.id() == rule.id()) {
            Some(existing) => *existing = rule,
            None => self.rules.push(rule),
        }
        self
    }

    pub fn with_default_ignores(mut self, enabled: bool) -> Self {
        self.default_ignores = enabled;
        self
    }

    /// Add an operator ignore pattern. Messages matching it are not linted.
    pub fn with_ignore_pattern(mut self, pattern: &str) -> Result<Self, ConfigError> {
        let re = Regex::new(pattern).map_err(|e| ConfigError::InvalidIgnorePattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        self.ignores.push(re);
        Ok(self)
    }

    pub fn with_help_url(mut self, url: Option<String>) -> Self {
        self.help_url = url;
        self
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn get(&self, id: RuleId) -> Option<&Rule> {
        self.rules.iter().find(|r| r.id() == id)
    }

    pub fn enabled_count(&self) -> usize {
        self.rules.iter().filter(|r| r.is_enabled()).count()
    }

    pub fn default_ignores(&self) -> bool {
        self.default_ignores
    }

    pub fn ignore_patterns(&self) -> impl Iterator<Item = &str> {
        self.ignores.iter().map(Regex::as_str)
    }

    pub fn help_url(&self) -> Option<&str> {
        self.help_url.as_deref()
    }

    /// Whether `raw` should be skipped instead of linted.
    pub fn is_ignored(&self, raw: &str) -> bool {
        (self.default_ignores && is_default_ignored(raw))
            || self.ignores.iter().any(|re| re.is_match(raw))
    }

    /// Cross-rule checks that a single entry cannot express.
    ///
    /// # Errors
    ///
    /// `ConfigError::ConflictingBounds` when an enabled minimum exceeds the
    /// enabled maximum for the same field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (min_id, max_id) in BOUND_PAIRS {
            let bound = |id| {
                self.get(id)
                    .filter(|r| r.is_enabled())
                    .and_then(Rule::limit)
                    .and_then(Limit::bound)
            };
            if let (Some(min), Some(max)) = (bound(min_id), bound(max_id)) {
                if min > max {
                    return Err(ConfigError::ConflictingBounds {
                        min_id: min_id.to_string(),
                        min,
                        max_id: max_id.to_string(),
                        max,
                    });
                }
            }
        }
        Ok(())
    }
}
