//! String rule evaluators
//!
//! Checks over string-shaped environment values: boolean-like tokens,
//! membership lists, JSON payloads, application keys, regex patterns and
//! email addresses.

use regex::Regex;
use validator::ValidateEmail;

use crate::domain::rule::Rule;
use crate::domain::value::EnvValue;
use crate::shared::error::{AppError, AppResult};

/// Validates that a value is boolean-like.
///
/// Accepted: `true`/`false`, `1`/`0`, `yes`/`no`, `on`/`off` (strings,
/// case-insensitive), native booleans, and the integers 1 and 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanRule;

const BOOLEAN_VALUES: [&str; 8] = ["true", "false", "1", "0", "yes", "no", "on", "off"];

impl BooleanRule {
    pub fn new() -> Self {
        Self
    }
}

impl Rule for BooleanRule {
    fn passes(&self, _field: &str, value: &EnvValue) -> bool {
        match value {
            EnvValue::Bool(_) => true,
            EnvValue::Int(n) => *n == 0 || *n == 1,
            EnvValue::Float(_) => false,
            EnvValue::Str(s) => BOOLEAN_VALUES.contains(&s.to_lowercase().as_str()),
        }
    }

    fn message(&self) -> String {
        "The :attribute must be a boolean value (true, false, 1, 0, yes, no, on, off).".to_string()
    }

    fn kind(&self) -> &'static str {
        "boolean"
    }
}

/// Validates that a value is in a given list of allowed values.
///
/// Strict mode (the default) compares type and value; loose mode also
/// accepts numerically-equal or identically-rendered values.
#[derive(Debug, Clone)]
pub struct InRule {
    allowed: Vec<EnvValue>,
    custom_message: Option<String>,
    strict: bool,
}

impl InRule {
    /// Create a strict membership rule over the given values
    pub fn new(allowed: Vec<EnvValue>) -> Self {
        Self {
            allowed,
            custom_message: None,
            strict: true,
        }
    }

    /// Convenience constructor from anything convertible to values
    pub fn of<I, V>(allowed: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<EnvValue>,
    {
        Self::new(allowed.into_iter().map(Into::into).collect())
    }

    /// Replace the default error message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.custom_message = Some(message.into());
        self
    }

    /// Set strict or loose comparison
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// The configured allowed values
    pub fn allowed(&self) -> &[EnvValue] {
        &self.allowed
    }

    /// Whether strict comparison is enabled
    pub fn is_strict(&self) -> bool {
        self.strict
    }
}

impl Rule for InRule {
    fn passes(&self, _field: &str, value: &EnvValue) -> bool {
        self.allowed.iter().any(|allowed| {
            if self.strict {
                allowed == value
            } else {
                allowed.loose_eq(value)
            }
        })
    }

    fn message(&self) -> String {
        if let Some(message) = &self.custom_message {
            return message.clone();
        }

        let values = self
            .allowed
            .iter()
            .map(EnvValue::to_string)
            .collect::<Vec<_>>()
            .join(", ");

        format!("The :attribute must be one of: {values}.")
    }

    fn kind(&self) -> &'static str {
        "in"
    }
}

/// Validates that a value is syntactically valid JSON.
///
/// Empty and whitespace-only strings fail; non-string values fail.
#[derive(Debug, Clone, Default)]
pub struct JsonRule {
    custom_message: Option<String>,
}

impl JsonRule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.custom_message = Some(message.into());
        self
    }
}

impl Rule for JsonRule {
    fn passes(&self, _field: &str, value: &EnvValue) -> bool {
        let Some(s) = value.as_str() else {
            return false;
        };
        if s.trim().is_empty() {
            return false;
        }
        serde_json::from_str::<serde_json::Value>(s).is_ok()
    }

    fn message(&self) -> String {
        self.custom_message
            .clone()
            .unwrap_or_else(|| "The :attribute must be valid JSON.".to_string())
    }

    fn kind(&self) -> &'static str {
        "json"
    }
}

/// Validates that a value is a valid Laravel-style application key:
/// `base64:` followed by at least 40 base64 characters.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyRule;

const KEY_PATTERN: &str = r"^base64:[A-Za-z0-9+/=]{40,}$";

impl KeyRule {
    pub fn new() -> Self {
        Self
    }
}

impl Rule for KeyRule {
    fn passes(&self, _field: &str, value: &EnvValue) -> bool {
        let Some(s) = value.as_str() else {
            return false;
        };
        Regex::new(KEY_PATTERN)
            .map(|re| re.is_match(s))
            .unwrap_or(false)
    }

    fn message(&self) -> String {
        "The :attribute must be a valid Laravel application key (base64 encoded string)."
            .to_string()
    }

    fn kind(&self) -> &'static str {
        "key"
    }
}

/// Validates that a value matches a regular expression.
///
/// Numeric values are stringified before matching; other non-string values
/// always fail. A malformed pattern is a programming error on the rule
/// author's side and fails at construction time.
#[derive(Debug, Clone)]
pub struct PatternRule {
    regex: Regex,
    custom_message: Option<String>,
}

impl PatternRule {
    /// Compile a pattern rule, failing fast on an invalid pattern
    pub fn new(pattern: &str) -> AppResult<Self> {
        let regex = Regex::new(pattern)
            .map_err(|e| AppError::InvalidRule(format!("invalid pattern '{pattern}': {e}")))?;

        Ok(Self {
            regex,
            custom_message: None,
        })
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.custom_message = Some(message.into());
        self
    }
}

impl Rule for PatternRule {
    fn passes(&self, _field: &str, value: &EnvValue) -> bool {
        match value {
            EnvValue::Str(s) => self.regex.is_match(s),
            EnvValue::Int(_) | EnvValue::Float(_) => self.regex.is_match(&value.to_string()),
            EnvValue::Bool(_) => false,
        }
    }

    fn message(&self) -> String {
        self.custom_message
            .clone()
            .unwrap_or_else(|| "The :attribute format is invalid.".to_string())
    }

    fn kind(&self) -> &'static str {
        "pattern"
    }
}

/// Validates that a value is a well-formed email address.
#[derive(Debug, Clone, Default)]
pub struct EmailRule {
    custom_message: Option<String>,
}

impl EmailRule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.custom_message = Some(message.into());
        self
    }
}

impl Rule for EmailRule {
    fn passes(&self, _field: &str, value: &EnvValue) -> bool {
        match value.as_str() {
            Some(s) => !s.is_empty() && s.validate_email(),
            None => false,
        }
    }

    fn message(&self) -> String {
        self.custom_message
            .clone()
            .unwrap_or_else(|| "The :attribute must be a valid email address.".to_string())
    }

    fn kind(&self) -> &'static str {
        "email"
    }
}
