//! Rule vocabulary: ids, severities, conditions and typed rule values.
//!
//! Each [`RuleId`] accepts exactly one [`RuleValue`] shape. [`Rule::new`]
//! rejects mismatches, so the evaluator never sees an ill-typed rule.

pub mod case;
pub(crate) mod check;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::ConfigError;

pub use case::CaseStyle;

/// Every rule id the evaluator knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleId {
    TypeEnum,
    TypeCase,
    TypeEmpty,
    TypeMaxLength,
    ScopeEmpty,
    ScopeMinLength,
    ScopeMaxLength,
    SubjectCase,
    SubjectEmpty,
    SubjectFullStop,
    SubjectMaxLength,
    HeaderMinLength,
    HeaderMaxLength,
    HeaderTrim,
    BodyLeadingBlank,
    BodyMaxLength,
    BodyMaxLineLength,
    FooterLeadingBlank,
    FooterMinLength,
    FooterMaxLineLength,
}

/// The value shape a rule id expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    None,
    Limit,
    Types,
    Cases,
    Text,
}

impl RuleId {
    pub const ALL: [RuleId; 20] = [
        RuleId::TypeEnum,
        RuleId::TypeCase,
        RuleId::TypeEmpty,
        RuleId::TypeMaxLength,
        RuleId::ScopeEmpty,
        RuleId::ScopeMinLength,
        RuleId::ScopeMaxLength,
        RuleId::SubjectCase,
        RuleId::SubjectEmpty,
        RuleId::SubjectFullStop,
        RuleId::SubjectMaxLength,
        RuleId::HeaderMinLength,
        RuleId::HeaderMaxLength,
        RuleId::HeaderTrim,
        RuleId::BodyLeadingBlank,
        RuleId::BodyMaxLength,
        RuleId::BodyMaxLineLength,
        RuleId::FooterLeadingBlank,
        RuleId::FooterMinLength,
        RuleId::FooterMaxLineLength,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::TypeEnum => "type-enum",
            Self::TypeCase => "type-case",
            Self::TypeEmpty => "type-empty",
            Self::TypeMaxLength => "type-max-length",
            Self::ScopeEmpty => "scope-empty",
            Self::ScopeMinLength => "scope-min-length",
            Self::ScopeMaxLength => "scope-max-length",
            Self::SubjectCase => "subject-case",
            Self::SubjectEmpty => "subject-empty",
            Self::SubjectFullStop => "subject-full-stop",
            Self::SubjectMaxLength => "subject-max-length",
            Self::HeaderMinLength => "header-min-length",
            Self::HeaderMaxLength => "header-max-length",
            Self::HeaderTrim => "header-trim",
            Self::BodyLeadingBlank => "body-leading-blank",
            Self::BodyMaxLength => "body-max-length",
            Self::BodyMaxLineLength => "body-max-line-length",
            Self::FooterLeadingBlank => "footer-leading-blank",
            Self::FooterMinLength => "footer-min-length",
            Self::FooterMaxLineLength => "footer-max-line-length",
        }
    }

    pub fn value_kind(self) -> ValueKind {
        match self {
            Self::TypeEnum => ValueKind::Types,
            Self::TypeCase | Self::SubjectCase => ValueKind::Cases,
            Self::SubjectFullStop => ValueKind::Text,
            Self::TypeMaxLength
            | Self::ScopeMinLength
            | Self::ScopeMaxLength
            | Self::SubjectMaxLength
            | Self::HeaderMinLength
            | Self::HeaderMaxLength
            | Self::BodyMaxLength
            | Self::BodyMaxLineLength
            | Self::FooterMinLength
            | Self::FooterMaxLineLength => ValueKind::Limit,
            Self::TypeEmpty
            | Self::ScopeEmpty
            | Self::SubjectEmpty
            | Self::HeaderTrim
            | Self::BodyLeadingBlank
            | Self::FooterLeadingBlank => ValueKind::None,
        }
    }

    /// Lower-bound rules cannot take an unbounded limit.
    pub fn is_min_length(self) -> bool {
        matches!(
            self,
            Self::ScopeMinLength | Self::HeaderMinLength | Self::FooterMinLength
        )
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleId {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownRule { id: s.to_string() })
    }
}

/// Enforcement level of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Disabled,
    Warning,
    Error,
}

impl Severity {
    /// Numeric level used in configuration files (0, 1, 2).
    pub fn level(self) -> u8 {
        match self {
            Self::Disabled => 0,
            Self::Warning => 1,
            Self::Error => 2,
        }
    }

    pub fn from_level(level: i64) -> Option<Self> {
        match level {
            0 => Some(Self::Disabled),
            1 => Some(Self::Warning),
            2 => Some(Self::Error),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the rule's predicate must hold (`always`) or must not (`never`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    #[default]
    Always,
    Never,
}

impl Condition {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Never => "never",
        }
    }
}

/// A length bound. `Unbounded` keeps a rule listed without enforcing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    Bounded(usize),
    Unbounded,
}

impl Limit {
    pub fn allows_at_most(self, len: usize) -> bool {
        match self {
            Self::Bounded(max) => len <= max,
            Self::Unbounded => true,
        }
    }

    pub fn bound(self) -> Option<usize> {
        match self {
            Self::Bounded(n) => Some(n),
            Self::Unbounded => None,
        }
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bounded(n) => write!(f, "{n}"),
            Self::Unbounded => f.write_str("Infinity"),
        }
    }
}

/// Rule-specific parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleValue {
    None,
    Limit(Limit),
    Types(Vec<String>),
    Cases(Vec<CaseStyle>),
    Text(String),
}

impl RuleValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::None => ValueKind::None,
            Self::Limit(_) => ValueKind::Limit,
            Self::Types(_) => ValueKind::Types,
            Self::Cases(_) => ValueKind::Cases,
            Self::Text(_) => ValueKind::Text,
        }
    }
}

/// One testable constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    id: RuleId,
    severity: Severity,
    condition: Condition,
    value: RuleValue,
}

impl Rule {
    /// Build a rule, checking that `value` has the shape `id` expects.
    pub fn new(
        id: RuleId,
        severity: Severity,
        condition: Condition,
        value: RuleValue,
    ) -> Result<Self, ConfigError> {
        let expected = id.value_kind();
        if value.kind() != expected {
            return Err(ConfigError::InvalidValue {
                id: id.to_string(),
                reason: format!("expected {expected:?} value, got {:?}", value.kind()),
            });
        }
        if id.is_min_length() && value == RuleValue::Limit(Limit::Unbounded) {
            return Err(ConfigError::InvalidValue {
                id: id.to_string(),
                reason: "minimum length cannot be unbounded".to_string(),
            });
        }
        match &value {
            RuleValue::Types(types) if types.is_empty() => {
                return Err(ConfigError::InvalidValue {
                    id: id.to_string(),
                    reason: "type list must not be empty".to_string(),
                });
            }
            RuleValue::Cases(cases) if cases.is_empty() => {
                return Err(ConfigError::InvalidValue {
                    id: id.to_string(),
                    reason: "case list must not be empty".to_string(),
                });
            }
            _ => {}
        }
        Ok(Self {
            id,
            severity,
            condition,
            value,
        })
    }

    /// Build a rule from a built-in table entry whose shape is known to be valid.
    pub(crate) fn fixed(
        id: RuleId,
        severity: Severity,
        condition: Condition,
        value: RuleValue,
    ) -> Self {
        debug_assert_eq!(id.value_kind(), value.kind(), "preset entry for {id}");
        Self {
            id,
            severity,
            condition,
            value,
        }
    }

    pub fn id(&self) -> RuleId {
        self.id
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn condition(&self) -> Condition {
        self.condition
    }

    pub fn value(&self) -> &RuleValue {
        &self.value
    }

    pub fn is_enabled(&self) -> bool {
        self.severity != Severity::Disabled
    }

    /// The limit of a length rule, if this is one.
    pub fn limit(&self) -> Option<Limit> {
        match self.value {
            RuleValue::Limit(limit) => Some(limit),
            _ => None,
        }
    }
}
