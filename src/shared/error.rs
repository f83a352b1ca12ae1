//! Error handling module
//!
//! This module provides centralized error handling for the crate.

use std::collections::BTreeMap;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown preset: {name}")]
    UnknownPreset { name: String },

    #[error("Invalid rule: {0}")]
    InvalidRule(String),

    #[error(transparent)]
    Environment(#[from] InvalidEnvironment),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Application result type
pub type AppResult<T> = Result<T, AppError>;

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

/// Raised when one or more environment variables fail validation.
///
/// Carries both a single human-readable summary and the full per-field
/// error map so callers can present failures either way.
#[derive(Error, Debug, Clone)]
#[error("{message}")]
pub struct InvalidEnvironment {
    message: String,
    errors: BTreeMap<String, Vec<String>>,
}

impl InvalidEnvironment {
    /// Create a new invalid environment error from a per-field error map
    pub fn new(errors: BTreeMap<String, Vec<String>>) -> Self {
        let joined = errors
            .values()
            .flatten()
            .map(|m| normalize_whitespace(m))
            .collect::<Vec<_>>()
            .join(", ");

        Self {
            message: format!("Environment validation failed: {joined}"),
            errors,
        }
    }

    /// Get the per-field validation errors
    pub fn errors(&self) -> &BTreeMap<String, Vec<String>> {
        &self.errors
    }

    /// Get a flattened list of all error messages with whitespace normalized
    pub fn messages(&self) -> Vec<String> {
        self.errors
            .values()
            .flatten()
            .map(|m| normalize_whitespace(m))
            .filter(|m| !m.is_empty())
            .collect()
    }
}

/// Collapse runs of whitespace to single spaces and trim the ends
pub(crate) fn normalize_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_environment_joins_messages() {
        let mut errors = BTreeMap::new();
        errors.insert(
            "APP_ENV".to_string(),
            vec!["The APP_ENV field is required.".to_string()],
        );
        errors.insert(
            "APP_URL".to_string(),
            vec!["The APP_URL must be a valid URL.".to_string()],
        );

        let err = InvalidEnvironment::new(errors);
        assert_eq!(
            err.to_string(),
            "Environment validation failed: The APP_ENV field is required., The APP_URL must be a valid URL."
        );
        assert_eq!(err.errors().len(), 2);
    }

    #[test]
    fn messages_are_whitespace_normalized() {
        let mut errors = BTreeMap::new();
        errors.insert(
            "APP_NAME".to_string(),
            vec!["  The APP_NAME\n  field   is required.  ".to_string()],
        );

        let err = InvalidEnvironment::new(errors);
        assert_eq!(err.messages(), vec!["The APP_NAME field is required."]);
    }

    #[test]
    fn unknown_preset_display() {
        let err = AppError::UnknownPreset {
            name: "bogus".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown preset: bogus");
    }
}
