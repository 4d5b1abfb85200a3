//! Letter-case classification for `type-case` and `subject-case`.
//!
//! A text is in a given style when converting it to that style leaves it
//! unchanged. Quoted spans are removed first because they usually hold proper
//! names (`` refactor: `Eslint` configuration ``).

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static QUOTED_SPAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"`[^`]*`|"[^"]*"|'[^']*'"#).expect("quoted span pattern compiles")
});

/// Case styles understood by the case rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CaseStyle {
    LowerCase,
    UpperCase,
    CamelCase,
    KebabCase,
    PascalCase,
    SentenceCase,
    SnakeCase,
    StartCase,
}

impl CaseStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LowerCase => "lower-case",
            Self::UpperCase => "upper-case",
            Self::CamelCase => "camel-case",
            Self::KebabCase => "kebab-case",
            Self::PascalCase => "pascal-case",
            Self::SentenceCase => "sentence-case",
            Self::SnakeCase => "snake-case",
            Self::StartCase => "start-case",
        }
    }

    /// Convert `input` to this style.
    pub fn convert(self, input: &str) -> String {
        match self {
            Self::LowerCase => input.to_lowercase(),
            Self::UpperCase => input.to_uppercase(),
            Self::SentenceCase => upper_first(input),
            Self::StartCase => words(input)
                .iter()
                .map(|w| upper_first(w))
                .collect::<Vec<_>>()
                .join(" "),
            Self::CamelCase => camel_case(input),
            Self::PascalCase => upper_first(&camel_case(input)),
            Self::KebabCase => joined_lower(input, "-"),
            Self::SnakeCase => joined_lower(input, "_"),
        }
    }

    /// Whether `raw` is already written in this style.
    ///
    /// Texts that are empty after stripping quoted spans, or whose
    /// conversion starts with a digit, match every style.
    pub fn matches(self, raw: &str) -> bool {
        let stripped = QUOTED_SPAN.replace_all(raw, "");
        let input = stripped.trim();
        let transformed = self.convert(input);
        if transformed.is_empty() || transformed.starts_with(|c: char| c.is_ascii_digit()) {
            return true;
        }
        transformed == input
    }
}

impl fmt::Display for CaseStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CaseStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lower-case" | "lowercase" | "lowerCase" => Ok(Self::LowerCase),
            "upper-case" | "uppercase" | "upperCase" => Ok(Self::UpperCase),
            "camel-case" | "camelCase" => Ok(Self::CamelCase),
            "kebab-case" | "kebabCase" => Ok(Self::KebabCase),
            "pascal-case" | "pascalCase" => Ok(Self::PascalCase),
            "sentence-case" | "sentencecase" | "sentenceCase" => Ok(Self::SentenceCase),
            "snake-case" | "snakeCase" => Ok(Self::SnakeCase),
            "start-case" | "startCase" => Ok(Self::StartCase),
            other => Err(other.to_string()),
        }
    }
}

/// Split text into words: non-alphanumerics separate, and lower-to-upper,
/// letter-to-digit and `XMLHttp`-style transitions start a new word.
/// Apostrophes are dropped without splitting.
fn words(input: &str) -> Vec<String> {
    let chars: Vec<char> = input.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if c == '\'' || c == '\u{2019}' {
            continue;
        }
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if let Some(prev) = current.chars().last() {
            let next = chars.get(i + 1).copied();
            let boundary = (prev.is_lowercase() && c.is_uppercase())
                || (prev.is_alphabetic() && c.is_numeric())
                || (prev.is_numeric() && c.is_alphabetic())
                || (prev.is_uppercase()
                    && c.is_uppercase()
                    && next.is_some_and(|n| n.is_lowercase()));
            if boundary {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn capitalize(s: &str) -> String {
    upper_first(&s.to_lowercase())
}

fn camel_case(input: &str) -> String {
    words(input)
        .iter()
        .enumerate()
        .map(|(i, w)| if i == 0 { w.to_lowercase() } else { capitalize(w) })
        .collect()
}

fn joined_lower(input: &str, sep: &str) -> String {
    words(input)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join(sep)
}
