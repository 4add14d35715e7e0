//! Rule settings as they appear in presets and user configuration

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::diagnostic::DiagnosticSeverity;

/// Configured rule level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "SeverityValue")]
pub enum Severity {
    Off,
    #[default]
    Warn,
    Error,
}

impl Severity {
    pub fn is_enabled(self) -> bool {
        self != Severity::Off
    }

    /// Severity for emitted diagnostics, or `None` when the rule is off
    pub fn diagnostic_severity(self) -> Option<DiagnosticSeverity> {
        match self {
            Severity::Off => None,
            Severity::Warn => Some(DiagnosticSeverity::Warning),
            Severity::Error => Some(DiagnosticSeverity::Error),
        }
    }
}

/// `"warn"` or `1` alike
#[derive(Deserialize)]
#[serde(untagged)]
enum SeverityValue {
    Level(u8),
    Name(String),
}

impl TryFrom<SeverityValue> for Severity {
    type Error = String;

    fn try_from(value: SeverityValue) -> Result<Self, String> {
        match value {
            SeverityValue::Level(0) => Ok(Severity::Off),
            SeverityValue::Level(1) => Ok(Severity::Warn),
            SeverityValue::Level(2) => Ok(Severity::Error),
            SeverityValue::Name(name) => match name.as_str() {
                "off" => Ok(Severity::Off),
                "warn" | "warning" => Ok(Severity::Warn),
                "error" => Ok(Severity::Error),
                _ => Err(format!("unknown severity `{name}`")),
            },
            SeverityValue::Level(level) => Err(format!("unknown severity level {level}")),
        }
    }
}

/// A rule entry: `"warn"` or `["warn", { …options }]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleSetting {
    Severity(Severity),
    WithOptions(Severity, serde_json::Value),
}

impl RuleSetting {
    pub fn severity(&self) -> Severity {
        match self {
            RuleSetting::Severity(severity) | RuleSetting::WithOptions(severity, _) => *severity,
        }
    }

    pub fn options(&self) -> Option<&serde_json::Value> {
        match self {
            RuleSetting::Severity(_) => None,
            RuleSetting::WithOptions(_, options) => Some(options),
        }
    }
}

impl From<Severity> for RuleSetting {
    fn from(severity: Severity) -> Self {
        RuleSetting::Severity(severity)
    }
}

/// Problems found while building a [`crate::RulesConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown rule `{0}`")]
    UnknownRule(String),
    #[error("invalid options for `{rule}`: {source}")]
    InvalidOptions {
        rule: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid pattern `{pattern}` in `{rule}` options: {source}")]
    InvalidPattern {
        rule: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

impl ConfigError {
    pub fn rule(&self) -> &str {
        match self {
            ConfigError::UnknownRule(rule)
            | ConfigError::InvalidOptions { rule, .. }
            | ConfigError::InvalidPattern { rule, .. } => rule,
        }
    }
}

/// Deserialize rule options, falling back to defaults when none are given
pub fn parse_options<T>(rule: &str, options: Option<&serde_json::Value>) -> Result<T, ConfigError>
where
    T: DeserializeOwned + Default,
{
    match options {
        None | Some(serde_json::Value::Null) => Ok(T::default()),
        Some(value) => T::deserialize(value).map_err(|source| ConfigError::InvalidOptions {
            rule: rule.to_string(),
            source,
        }),
    }
}

/// Compile user-supplied patterns
pub fn compile_patterns(rule: &str, patterns: &[String]) -> Result<Vec<regex::Regex>, ConfigError> {
    patterns
        .iter()
        .map(|pattern| {
            regex::Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
                rule: rule.to_string(),
                pattern: pattern.clone(),
                source,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_rule_setting_shapes() {
        let bare: RuleSetting = serde_json::from_value(json!("error")).unwrap();
        assert_eq!(bare, RuleSetting::Severity(Severity::Error));

        let numeric: RuleSetting = serde_json::from_value(json!(0)).unwrap();
        assert_eq!(numeric.severity(), Severity::Off);

        let with_options: RuleSetting =
            serde_json::from_value(json!(["warn", { "threshold": 2 }])).unwrap();
        assert_eq!(with_options.severity(), Severity::Warn);
        assert_eq!(with_options.options(), Some(&json!({ "threshold": 2 })));

        assert!(serde_json::from_value::<RuleSetting>(json!("loud")).is_err());
    }

    #[test]
    fn test_parse_options_defaults() {
        #[derive(Debug, Default, Deserialize, PartialEq)]
        #[serde(rename_all = "camelCase", default)]
        struct Options {
            min_length: usize,
        }

        assert_eq!(parse_options::<Options>("x", None).unwrap(), Options::default());
        assert_eq!(
            parse_options::<Options>("x", Some(&json!({ "minLength": 4 }))).unwrap().min_length,
            4
        );
        let err = parse_options::<Options>("x", Some(&json!({ "minLength": "four" }))).unwrap_err();
        assert_eq!(err.rule(), "x");
    }
}
