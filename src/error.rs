//! Error types for rapid-summary.

use serde::Serialize;

/// Errors returned by the summarization entry points.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// The configuration failed validation; nothing was processed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

/// Result type for rapid-summary operations.
pub type Result<T> = std::result::Result<T, Error>;

/// One offending configuration field.
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ConfigIssue {
    /// Field name as it appears in the serialized config.
    pub field: &'static str,
    /// Human-readable description of the problem.
    pub message: String,
}

impl ConfigIssue {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Every issue found while validating a [`SummarizerConfig`](crate::SummarizerConfig).
///
/// Validation never stops at the first problem, so callers see all of them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, thiserror::Error)]
#[error("{}", join_issues(.issues))]
pub struct ConfigError {
    pub issues: Vec<ConfigIssue>,
}

impl ConfigError {
    /// Returns `true` if any issue was recorded.
    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }

    /// Look up the issue for a given field.
    pub fn issue(&self, field: &str) -> Option<&ConfigIssue> {
        self.issues.iter().find(|i| i.field == field)
    }
}

fn join_issues(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
