//! atl.chat commit message policy
//!
//! Parses commit messages into header, body and footer, applies an ordered
//! rule table and reports every violation with its severity.

pub mod catalogue;
pub mod config;
pub mod domain;
pub mod evaluate;
pub mod git;
pub mod ignore;
pub mod obs;
pub mod report;
pub mod rules;
pub mod ruleset;
pub mod telemetry;

pub use catalogue::{commit_types, find_commit_type, CommitType};

pub use config::{
    discover_config, load_config, ConfigSource, Extends, RawConfig, CONFIG_ENV_VAR,
    CONFIG_FILE_NAME,
};

pub use domain::{strip_comments, CommitMessage, CommitlintError, ConfigError, Header, Result};

pub use evaluate::{evaluate, lint, Verdict, Violation};

pub use git::{read_commits, CommitRange, CommitRecord};

pub use report::{LintReport, LintResult};

pub use rules::{CaseStyle, Condition, Limit, Rule, RuleId, RuleValue, Severity};

pub use ruleset::{Preset, RuleSet, ALLOWED_TYPES, DEFAULT_HELP_URL};

pub use telemetry::init_tracing;

/// Crate version, reported by the CLI.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
