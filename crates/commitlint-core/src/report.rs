//! Lint reports for one or many messages, rendered as text or JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::evaluate::Verdict;

/// The verdict for one input message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LintResult {
    /// Commit sha when the message came from a git range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
    /// Header line of the message.
    pub input: String,
    pub verdict: Verdict,
}

/// All results of one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LintReport {
    pub generated_at: DateTime<Utc>,
    pub strict: bool,
    pub passed: bool,
    pub results: Vec<LintResult>,
}

impl LintReport {
    pub fn new(results: Vec<LintResult>, strict: bool) -> Self {
        let passed = results.iter().all(|r| r.verdict.passed_with(strict));
        Self {
            generated_at: Utc::now(),
            strict,
            passed,
            results,
        }
    }

    pub fn error_count(&self) -> usize {
        self.results.iter().map(|r| r.verdict.error_count()).sum()
    }

    pub fn warning_count(&self) -> usize {
        self.results.iter().map(|r| r.verdict.warning_count()).sum()
    }

    /// Text rendering. Clean and ignored messages are only listed when
    /// `verbose` is set.
    pub fn render_text(&self, help_url: Option<&str>, verbose: bool) -> String {
        let mut out = String::new();

        for result in &self.results {
            let reported = !result.verdict.violations.is_empty();
            if !reported && !verbose {
                continue;
            }
            match &result.sha {
                Some(sha) => out.push_str(&format!(
                    "⧗ input ({}): {}\n",
                    short_sha(sha),
                    result.input
                )),
                None => out.push_str(&format!("⧗ input: {}\n", result.input)),
            }
            if result.verdict.ignored {
                out.push_str("ignored\n");
            }
            for violation in &result.verdict.violations {
                out.push_str(&format!("{violation}\n"));
            }
        }

        let errors = self.error_count();
        let warnings = self.warning_count();
        if errors + warnings > 0 {
            out.push_str(&format!("✖ found {errors} errors, {warnings} warnings\n"));
            if let Some(url) = help_url {
                out.push_str(&format!("ⓘ Get help: {url}\n"));
            }
        } else if verbose {
            out.push_str("✔ no problems found\n");
        }
        out
    }
}

fn short_sha(sha: &str) -> &str {
    sha.get(..7).unwrap_or(sha)
}
