//! JSON rule configuration.
//!
//! ```json
//! {
//!   "extends": "atl",
//!   "rules": {
//!     "header-max-length": [2, "always", 100],
//!     "body-max-line-length": [2, "always", null],
//!     "scope-empty": [0]
//!   },
//!   "defaultIgnores": true,
//!   "ignores": ["^WIP"],
//!   "helpUrl": "https://example.org/commits"
//! }
//! ```
//!
//! Each rule entry is `[severity, condition?, value?]`. Entries override the
//! preset rule with the same id in place; other ids are appended. Loading is
//! eager: every entry is checked before any message is linted.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::{CommitlintError, ConfigError, Result};
use crate::obs::emit_config_loaded;
use crate::rules::{CaseStyle, Condition, Limit, Rule, RuleId, RuleValue, Severity, ValueKind};
use crate::ruleset::{Preset, RuleSet, ALLOWED_TYPES};

/// File looked up in the working directory when no path is given.
pub const CONFIG_FILE_NAME: &str = ".commitlintrc.json";

/// Environment variable naming a configuration file.
pub const CONFIG_ENV_VAR: &str = "COMMITLINT_CONFIG";

/// `extends` as a single preset name or a list applied left to right.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Extends {
    One(String),
    Many(Vec<String>),
}

impl Extends {
    pub fn names(&self) -> &[String] {
        match self {
            Self::One(name) => std::slice::from_ref(name),
            Self::Many(names) => names,
        }
    }
}

/// On-disk shape of the configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<Extends>,

    #[serde(default)]
    pub rules: Map<String, Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_ignores: Option<bool>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignores: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_url: Option<String>,

    /// Keys this tool does not use (prompt settings, formatter, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RawConfig {
    pub fn from_json(text: &str) -> std::result::Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(|e| ConfigError::Malformed(e.to_string()))
    }

    /// Resolve the preset, apply every rule entry and check the result.
    pub fn into_rule_set(self) -> std::result::Result<RuleSet, ConfigError> {
        for key in self.extra.keys() {
            tracing::debug!(key = %key, "ignoring unsupported configuration key");
        }

        let mut set = match &self.extends {
            None => RuleSet::atl(),
            Some(extends) => resolve_presets(extends.names())?,
        };

        for (name, entry) in &self.rules {
            let id: RuleId = name.parse()?;
            let rule = parse_rule_entry(id, entry, set.get(id))?;
            set = set.with_rule(rule);
        }

        if let Some(enabled) = self.default_ignores {
            set = set.with_default_ignores(enabled);
        }
        for pattern in &self.ignores {
            set = set.with_ignore_pattern(pattern)?;
        }
        if self.help_url.is_some() {
            set = set.with_help_url(self.help_url);
        }

        set.validate()?;
        Ok(set)
    }

    /// Render a resolved rule set back into a loadable configuration.
    ///
    /// The output extends `none`, so loading it reproduces the same table.
    pub fn from_rule_set(set: &RuleSet) -> Self {
        let rules = set
            .rules()
            .iter()
            .map(|rule| (rule.id().to_string(), rule_entry(rule)))
            .collect();
        Self {
            extends: Some(Extends::One("none".to_string())),
            rules,
            default_ignores: Some(set.default_ignores()),
            ignores: set.ignore_patterns().map(str::to_string).collect(),
            help_url: set.help_url().map(str::to_string),
            extra: Map::new(),
        }
    }
}

/// Where the active rule set came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    BuiltIn,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::BuiltIn => f.write_str("built-in atl policy"),
        }
    }
}

/// Load and validate a configuration file.
pub fn load_config(path: &Path) -> Result<RuleSet> {
    let text = std::fs::read_to_string(path)?;
    let set = RawConfig::from_json(&text)?.into_rule_set()?;
    Ok(set)
}

/// Resolve the active rule set: an explicit path wins, then
/// [`CONFIG_FILE_NAME`] in `dir`, then the built-in `atl` table.
pub fn discover_config(dir: &Path, explicit: Option<&Path>) -> Result<(RuleSet, ConfigSource)> {
    let candidate = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => Some(dir.join(CONFIG_FILE_NAME)).filter(|p| p.is_file()),
    };

    let (set, source) = match candidate {
        Some(path) => {
            let set = load_config(&path).map_err(|e| match e {
                CommitlintError::Io(io) => CommitlintError::Io(std::io::Error::new(
                    io.kind(),
                    format!("{}: {io}", path.display()),
                )),
                other => other,
            })?;
            (set, ConfigSource::File(path))
        }
        None => (RuleSet::atl(), ConfigSource::BuiltIn),
    };

    emit_config_loaded(&source.to_string(), set.rules().len(), set.enabled_count());
    Ok((set, source))
}

/// The first preset is the base table; rules of later presets override it
/// in place or are appended. An empty list is the empty table.
fn resolve_presets(names: &[String]) -> std::result::Result<RuleSet, ConfigError> {
    let mut set = RuleSet::empty();
    for (idx, name) in names.iter().enumerate() {
        let preset = Preset::from_name(name)?.rule_set();
        if idx == 0 {
            set = preset;
        } else {
            for rule in preset.rules() {
                set = set.with_rule(rule.clone());
            }
        }
    }
    Ok(set)
}

fn parse_rule_entry(
    id: RuleId,
    entry: &Value,
    existing: Option<&Rule>,
) -> std::result::Result<Rule, ConfigError> {
    let items = match entry {
        Value::Array(items) if !items.is_empty() => items,
        other => {
            return Err(ConfigError::InvalidValue {
                id: id.to_string(),
                reason: format!("expected [severity, condition?, value?], got {other}"),
            });
        }
    };

    if items.len() > 3 {
        return Err(ConfigError::InvalidValue {
            id: id.to_string(),
            reason: format!("expected at most 3 items, got {}", items.len()),
        });
    }

    let severity = items[0]
        .as_i64()
        .and_then(Severity::from_level)
        .ok_or_else(|| ConfigError::InvalidSeverity {
            id: id.to_string(),
            value: items[0].to_string(),
        })?;

    let condition = match items.get(1) {
        None => Condition::Always,
        Some(Value::String(s)) if s == "always" => Condition::Always,
        Some(Value::String(s)) if s == "never" => Condition::Never,
        Some(other) => {
            return Err(ConfigError::InvalidCondition {
                id: id.to_string(),
                value: other.to_string(),
            });
        }
    };

    let value = match (id.value_kind(), items.get(2)) {
        (ValueKind::None, None) => RuleValue::None,
        (ValueKind::None, Some(raw)) => {
            return Err(ConfigError::InvalidValue {
                id: id.to_string(),
                reason: format!("rule takes no value, got {raw}"),
            });
        }
        (_, Some(raw)) => parse_value(id, raw)?,
        (_, None) if severity == Severity::Disabled => existing
            .map(|r| r.value().clone())
            .unwrap_or_else(|| placeholder_value(id)),
        (_, None) => return Err(ConfigError::MissingValue { id: id.to_string() }),
    };

    Rule::new(id, severity, condition, value)
}

fn parse_value(id: RuleId, raw: &Value) -> std::result::Result<RuleValue, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidValue {
        id: id.to_string(),
        reason,
    };

    match id.value_kind() {
        ValueKind::None => Ok(RuleValue::None),
        ValueKind::Limit => parse_limit(id, raw).map(RuleValue::Limit),
        ValueKind::Types => {
            let list = raw
                .as_array()
                .ok_or_else(|| invalid(format!("expected a list of types, got {raw}")))?;
            let mut types = Vec::with_capacity(list.len());
            for item in list {
                match item.as_str() {
                    Some(t) if !t.trim().is_empty() => types.push(t.to_string()),
                    _ => {
                        return Err(invalid(format!(
                            "type entries must be non-empty strings, got {item}"
                        )));
                    }
                }
            }
            Ok(RuleValue::Types(types))
        }
        ValueKind::Cases => {
            let names: Vec<&Value> = match raw {
                Value::Array(list) => list.iter().collect(),
                single => vec![single],
            };
            let mut cases = Vec::with_capacity(names.len());
            for name in names {
                let name = name
                    .as_str()
                    .ok_or_else(|| invalid(format!("case styles must be strings, got {name}")))?;
                let style = name.parse::<CaseStyle>().map_err(|style| ConfigError::UnknownCase {
                    id: id.to_string(),
                    style,
                })?;
                cases.push(style);
            }
            Ok(RuleValue::Cases(cases))
        }
        ValueKind::Text => raw
            .as_str()
            .map(|s| RuleValue::Text(s.to_string()))
            .ok_or_else(|| invalid(format!("expected a string, got {raw}"))),
    }
}

fn parse_limit(id: RuleId, raw: &Value) -> std::result::Result<Limit, ConfigError> {
    let negative = || ConfigError::NegativeBound {
        id: id.to_string(),
        value: raw.to_string(),
    };
    match raw {
        Value::Null => Ok(Limit::Unbounded),
        Value::String(s) if s == "Infinity" => Ok(Limit::Unbounded),
        Value::Number(n) => {
            if let Some(v) = n.as_u64() {
                return usize::try_from(v)
                    .map(Limit::Bounded)
                    .or(Ok(Limit::Unbounded));
            }
            if n.as_i64().is_some_and(|v| v < 0) {
                return Err(negative());
            }
            match n.as_f64() {
                Some(f) if f < 0.0 => Err(negative()),
                Some(f) if f.fract() == 0.0 && f <= usize::MAX as f64 => {
                    Ok(Limit::Bounded(f as usize))
                }
                _ => Err(ConfigError::InvalidValue {
                    id: id.to_string(),
                    reason: format!("length must be a whole number, got {raw}"),
                }),
            }
        }
        other => Err(ConfigError::InvalidValue {
            id: id.to_string(),
            reason: format!("expected a length, null or \"Infinity\", got {other}"),
        }),
    }
}

/// Value used for a disabled rule configured without one.
fn placeholder_value(id: RuleId) -> RuleValue {
    match id.value_kind() {
        ValueKind::None => RuleValue::None,
        ValueKind::Limit if id.is_min_length() => RuleValue::Limit(Limit::Bounded(0)),
        ValueKind::Limit => RuleValue::Limit(Limit::Unbounded),
        ValueKind::Types => RuleValue::Types(ALLOWED_TYPES.iter().map(|t| t.to_string()).collect()),
        ValueKind::Cases => RuleValue::Cases(vec![CaseStyle::LowerCase]),
        ValueKind::Text => RuleValue::Text(".".to_string()),
    }
}

fn rule_entry(rule: &Rule) -> Value {
    let mut entry = vec![
        Value::from(rule.severity().level()),
        Value::from(rule.condition().as_str()),
    ];
    match rule.value() {
        RuleValue::None => {}
        RuleValue::Limit(Limit::Bounded(n)) => entry.push(Value::from(*n)),
        RuleValue::Limit(Limit::Unbounded) => entry.push(Value::Null),
        RuleValue::Types(types) => entry.push(Value::from(types.clone())),
        RuleValue::Cases(cases) => entry.push(Value::from(
            cases.iter().map(|c| c.as_str()).collect::<Vec<_>>(),
        )),
        RuleValue::Text(text) => entry.push(Value::from(text.as_str())),
    }
    Value::Array(entry)
}
