//! Conventional-commit header grammar: `type(scope)!: subject`.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

// A type only counts when the colon is followed by a space, so `feat:add`
// falls back to an untyped header.
static HEADER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\w*)(?:\(([^()\r\n]*)\))?(!)?: (.*)$").expect("header pattern compiles")
});

/// The parts of a conventional header.
///
/// When the header does not follow the grammar, `commit_type` and `scope`
/// are `None` and `subject` holds the whole header, so case and length rules
/// still have something to inspect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Header {
    pub commit_type: Option<String>,
    pub scope: Option<String>,
    pub breaking: bool,
    pub subject: String,
}

impl Header {
    pub fn parse(header: &str) -> Self {
        match HEADER_PATTERN.captures(header) {
            Some(caps) => Self {
                commit_type: caps
                    .get(1)
                    .map(|m| m.as_str())
                    .filter(|t| !t.is_empty())
                    .map(str::to_string),
                scope: caps.get(2).map(|m| m.as_str().to_string()),
                breaking: caps.get(3).is_some(),
                subject: caps.get(4).map_or_else(String::new, |m| m.as_str().to_string()),
            },
            None => Self {
                commit_type: None,
                scope: None,
                breaking: false,
                subject: header.to_string(),
            },
        }
    }

    /// Whether the header matched the conventional grammar.
    pub fn is_conventional(&self) -> bool {
        self.commit_type.is_some()
    }
}
