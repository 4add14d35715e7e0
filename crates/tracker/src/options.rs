//! Tracker options as written in rule configuration

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error raised while building a tracker client
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackerConfigError {
    #[error("invalid tracker configuration: {0}")]
    Invalid(String),
    #[error("{tracker} tracker requires `{field}`")]
    MissingField { tracker: &'static str, field: &'static str },
}

/// Tracker selection, tagged by `type`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TrackerOptions {
    #[serde(rename_all = "camelCase")]
    Github {
        owner: Option<String>,
        repo: Option<String>,
        token: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Gitlab {
        project_id: Option<String>,
        base_url: Option<String>,
        token: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Jira {
        base_url: Option<String>,
        token: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Linear { api_key: Option<String> },
}

/// Which tracker a client talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackerKind {
    Github,
    Gitlab,
    Jira,
    Linear,
}

impl TrackerKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Github => "github",
            Self::Gitlab => "gitlab",
            Self::Jira => "jira",
            Self::Linear => "linear",
        }
    }

    /// Whether tickets are plain issue numbers (`#12`, `GH-12`)
    pub fn numeric_ids(self) -> bool {
        matches!(self, Self::Github | Self::Gitlab)
    }

    /// Canonical id for a ticket as written: `#12` and `GH-12` both become
    /// `12` on numeric trackers, everything else is upper-cased.
    pub fn normalize(self, ticket: &str) -> String {
        let ticket = ticket.trim();
        if self.numeric_ids() {
            if let Some(number) = ticket.strip_prefix('#') {
                return number.to_string();
            }
            if let Some((_, number)) = ticket.rsplit_once('-') {
                if !number.is_empty() && number.chars().all(|c| c.is_ascii_digit()) {
                    return number.to_string();
                }
            }
        }
        ticket.to_ascii_uppercase()
    }
}

impl TrackerOptions {
    /// Deserialize and validate a raw `tracker` option
    pub fn from_value(value: &serde_json::Value) -> Result<Self, TrackerConfigError> {
        let options: Self =
            serde_json::from_value(value.clone()).map_err(|err| TrackerConfigError::Invalid(err.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    pub fn kind(&self) -> TrackerKind {
        match self {
            Self::Github { .. } => TrackerKind::Github,
            Self::Gitlab { .. } => TrackerKind::Gitlab,
            Self::Jira { .. } => TrackerKind::Jira,
            Self::Linear { .. } => TrackerKind::Linear,
        }
    }

    /// Check the fields each tracker needs before any request is made
    pub fn validate(&self) -> Result<(), TrackerConfigError> {
        let tracker = self.kind().as_str();
        let require = |value: &Option<String>, field: &'static str| match value.as_deref() {
            Some(v) if !v.trim().is_empty() => Ok(()),
            _ => Err(TrackerConfigError::MissingField { tracker, field }),
        };

        match self {
            Self::Github { owner, repo, .. } => {
                require(owner, "owner")?;
                require(repo, "repo")
            }
            Self::Gitlab { project_id, .. } => require(project_id, "projectId"),
            Self::Jira { base_url, .. } => require(base_url, "baseUrl"),
            Self::Linear { api_key } => require(api_key, "apiKey"),
        }
    }
}
