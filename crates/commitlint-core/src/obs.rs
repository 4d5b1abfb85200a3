//! Structured tracing events for the lint lifecycle.
//!
//! Events carry an `event` field (`config.loaded`, `lint.evaluated`, ...) so
//! they can be filtered in JSON log output. Per-message events are emitted at
//! `debug!` so hook output stays quiet by default.

use tracing::{debug, info};

/// RAII guard that enters a span tagged with the commit being linted.
pub struct LintSpan {
    _span: tracing::span::EnteredSpan,
}

impl LintSpan {
    /// `commit` is a sha for range linting or a label such as `stdin`.
    pub fn enter(commit: &str) -> Self {
        let span = tracing::info_span!("commitlint.lint", commit = %commit);
        Self {
            _span: span.entered(),
        }
    }
}

pub fn emit_config_loaded(source: &str, rules: usize, enabled: usize) {
    info!(event = "config.loaded", source = %source, rules = rules, enabled = enabled);
}

pub fn emit_message_evaluated(header: &str, errors: usize, warnings: usize, passed: bool) {
    debug!(
        event = "lint.evaluated",
        header = %header,
        errors = errors,
        warnings = warnings,
        passed = passed,
    );
}

pub fn emit_message_ignored(header: &str) {
    debug!(event = "lint.ignored", header = %header);
}

pub fn emit_range_read(range: &str, commits: usize) {
    info!(event = "git.range_read", range = %range, commits = commits);
}
