//! Numeric rule evaluators
//!
//! Numeric range, integer and port checks with the string coercions an
//! environment table requires.

use crate::domain::rule::Rule;
use crate::domain::value::EnvValue;

/// Validates that a value is numeric, optionally whole and optionally
/// within an inclusive range.
#[derive(Debug, Clone, Copy)]
pub struct NumericRule {
    min: Option<f64>,
    max: Option<f64>,
    allow_decimals: bool,
}

impl Default for NumericRule {
    fn default() -> Self {
        Self {
            min: None,
            max: None,
            allow_decimals: true,
        }
    }
}

impl NumericRule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the inclusive minimum
    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Set the inclusive maximum
    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Reject values with a fractional part
    pub fn integers_only(mut self) -> Self {
        self.allow_decimals = false;
        self
    }
}

impl Rule for NumericRule {
    fn passes(&self, _field: &str, value: &EnvValue) -> bool {
        let Some(number) = value.as_f64() else {
            return false;
        };

        if !self.allow_decimals && number.floor() != number {
            return false;
        }

        if let Some(min) = self.min {
            if number < min {
                return false;
            }
        }

        if let Some(max) = self.max {
            if number > max {
                return false;
            }
        }

        true
    }

    fn message(&self) -> String {
        let mut constraints = Vec::new();

        if !self.allow_decimals {
            constraints.push("an integer".to_string());
        }

        match (self.min, self.max) {
            (Some(min), Some(max)) => constraints.push(format!("between {min} and {max}")),
            (Some(min), None) => constraints.push(format!("at least {min}")),
            (None, Some(max)) => constraints.push(format!("at most {max}")),
            (None, None) => {}
        }

        if constraints.is_empty() {
            return "The :attribute must be a numeric value.".to_string();
        }

        format!("The :attribute must be {}.", constraints.join(" and "))
    }

    fn kind(&self) -> &'static str {
        "numeric"
    }
}

/// Validates that a value is an integer, optionally within an inclusive
/// range.
///
/// A string passes only when its integer round-trip is exact, so `"5.0"`
/// and `"5abc"` fail.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegerRule {
    min: Option<i64>,
    max: Option<i64>,
}

impl IntegerRule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the inclusive minimum
    pub fn min(mut self, min: i64) -> Self {
        self.min = Some(min);
        self
    }

    /// Set the inclusive maximum
    pub fn max(mut self, max: i64) -> Self {
        self.max = Some(max);
        self
    }

    fn as_integer(value: &EnvValue) -> Option<i64> {
        match value {
            EnvValue::Int(n) => Some(*n),
            EnvValue::Str(s) => s.parse::<i64>().ok(),
            EnvValue::Float(f) if f.fract() == 0.0 => Some(*f as i64),
            _ => None,
        }
    }
}

impl Rule for IntegerRule {
    fn passes(&self, _field: &str, value: &EnvValue) -> bool {
        let Some(number) = Self::as_integer(value) else {
            return false;
        };

        if let Some(min) = self.min {
            if number < min {
                return false;
            }
        }

        if let Some(max) = self.max {
            if number > max {
                return false;
            }
        }

        true
    }

    fn message(&self) -> String {
        let constraint = match (self.min, self.max) {
            (Some(min), Some(max)) => format!(" between {min} and {max}"),
            (Some(min), None) => format!(" at least {min}"),
            (None, Some(max)) => format!(" at most {max}"),
            (None, None) => String::new(),
        };

        format!("The :attribute must be an integer{constraint}.")
    }

    fn kind(&self) -> &'static str {
        "integer"
    }
}

/// Validates that a value is a port number within an inclusive range,
/// [1, 65535] by default.
#[derive(Debug, Clone)]
pub struct PortRule {
    min: u16,
    max: u16,
    custom_message: Option<String>,
}

impl Default for PortRule {
    fn default() -> Self {
        Self {
            min: 1,
            max: 65535,
            custom_message: None,
        }
    }
}

impl PortRule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the accepted range
    pub fn with_range(min: u16, max: u16) -> Self {
        Self {
            min,
            max,
            custom_message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.custom_message = Some(message.into());
        self
    }

    /// The minimum accepted port
    pub fn min(&self) -> u16 {
        self.min
    }

    /// The maximum accepted port
    pub fn max(&self) -> u16 {
        self.max
    }
}

impl Rule for PortRule {
    fn passes(&self, _field: &str, value: &EnvValue) -> bool {
        // Numeric strings coerce to integers, truncating any fraction.
        let port = match value {
            EnvValue::Int(n) => *n,
            EnvValue::Str(s) => match s.parse::<f64>() {
                Ok(f) => f as i64,
                Err(_) => return false,
            },
            _ => return false,
        };

        port >= i64::from(self.min) && port <= i64::from(self.max)
    }

    fn message(&self) -> String {
        self.custom_message.clone().unwrap_or_else(|| {
            format!(
                "The :attribute must be a valid port number between {} and {}.",
                self.min, self.max
            )
        })
    }

    fn kind(&self) -> &'static str {
        "port"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passes(rule: &dyn Rule, value: impl Into<EnvValue>) -> bool {
        rule.passes("TEST", &value.into())
    }

    #[test]
    fn numeric_accepts_numbers_and_numeric_strings() {
        let rule = NumericRule::new();
        assert!(passes(&rule, "42"));
        assert!(passes(&rule, "3.5"));
        assert!(passes(&rule, 7));
        assert!(!passes(&rule, "7a"));
        assert!(!passes(&rule, true));
    }

    #[test]
    fn numeric_integer_only_rejects_fractions() {
        let rule = NumericRule::new().integers_only();
        assert!(passes(&rule, "5"));
        assert!(!passes(&rule, "5.5"));
    }

    #[test]
    fn numeric_range_is_inclusive() {
        let rule = NumericRule::new().min(1.0).max(100.0);
        assert!(passes(&rule, "1"));
        assert!(passes(&rule, "100"));
        assert!(!passes(&rule, "0.5"));
        assert!(!passes(&rule, "100.1"));
    }

    #[test]
    fn numeric_message_composes_constraints() {
        assert_eq!(
            NumericRule::new().message(),
            "The :attribute must be a numeric value."
        );
        assert_eq!(
            NumericRule::new().min(1.0).max(100.0).message(),
            "The :attribute must be between 1 and 100."
        );
        assert_eq!(
            NumericRule::new().min(1.0).max(100.0).integers_only().message(),
            "The :attribute must be an integer and between 1 and 100."
        );
        assert_eq!(
            NumericRule::new().min(2.0).message(),
            "The :attribute must be at least 2."
        );
    }

    #[test]
    fn integer_requires_exact_round_trip() {
        let rule = IntegerRule::new();
        assert!(passes(&rule, "5"));
        assert!(passes(&rule, 5));
        assert!(passes(&rule, "-3"));
        assert!(!passes(&rule, "5.0"));
        assert!(!passes(&rule, "5abc"));
        assert!(!passes(&rule, " 5"));
        assert!(!passes(&rule, true));
    }

    #[test]
    fn integer_range_is_inclusive() {
        let rule = IntegerRule::new().min(1).max(10);
        assert!(passes(&rule, "1"));
        assert!(passes(&rule, "10"));
        assert!(!passes(&rule, "0"));
        assert!(!passes(&rule, "11"));
        assert_eq!(
            rule.message(),
            "The :attribute must be an integer between 1 and 10."
        );
    }

    #[test]
    fn port_default_range_boundaries() {
        let rule = PortRule::new();
        assert!(passes(&rule, "1"));
        assert!(passes(&rule, "65535"));
        assert!(!passes(&rule, "0"));
        assert!(!passes(&rule, "65536"));
        assert!(!passes(&rule, "abc"));
    }

    #[test]
    fn port_custom_range_boundaries() {
        let rule = PortRule::with_range(1024, 8080);
        assert!(passes(&rule, "1024"));
        assert!(passes(&rule, "8080"));
        assert!(!passes(&rule, "1023"));
        assert!(!passes(&rule, "8081"));
    }

    #[test]
    fn port_message_names_the_range() {
        assert_eq!(
            PortRule::new().message(),
            "The :attribute must be a valid port number between 1 and 65535."
        );
        let custom = PortRule::new().with_message("Bad port.");
        assert_eq!(custom.message(), "Bad port.");
    }
}
