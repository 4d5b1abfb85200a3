//! Error taxonomy for the commit message policy.
//!
//! Rule violations are not errors: they are reported through a
//! [`Verdict`](crate::Verdict). Errors cover operator mistakes in the rule
//! configuration and failures acquiring the message text.

/// Errors produced while loading or validating a rule configuration.
///
/// Every variant that concerns a single rule carries its id so the operator
/// can find the offending entry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown rule id: {id}")]
    UnknownRule { id: String },

    #[error("rule {id}: severity must be 0, 1 or 2, got {value}")]
    InvalidSeverity { id: String, value: String },

    #[error("rule {id}: condition must be \"always\" or \"never\", got {value}")]
    InvalidCondition { id: String, value: String },

    #[error("rule {id}: missing value")]
    MissingValue { id: String },

    #[error("rule {id}: invalid value: {reason}")]
    InvalidValue { id: String, reason: String },

    #[error("rule {id}: length bound must not be negative, got {value}")]
    NegativeBound { id: String, value: String },

    #[error("rule {id}: unknown case style {style}")]
    UnknownCase { id: String, style: String },

    #[error("rule {min_id} ({min}) conflicts with {max_id} ({max}): minimum exceeds maximum")]
    ConflictingBounds {
        min_id: String,
        min: usize,
        max_id: String,
        max: usize,
    },

    #[error("invalid ignore pattern {pattern}: {reason}")]
    InvalidIgnorePattern { pattern: String, reason: String },

    #[error("unknown preset: {0}")]
    UnknownPreset(String),

    #[error("malformed configuration: {0}")]
    Malformed(String),
}

/// Errors surfaced by the library outside of rule evaluation.
#[derive(Debug, thiserror::Error)]
pub enum CommitlintError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("git error: {0}")]
    Git(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for library operations.
pub type Result<T> = std::result::Result<T, CommitlintError>;
