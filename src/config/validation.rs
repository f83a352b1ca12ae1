//! Configuration validation module
//!
//! Semantic checks for configuration beyond the basic field validation:
//! the preset must exist and configured rule lines must be well formed.
//! Malformed specifications fail here, at configuration time, not during
//! evaluation.

use crate::config::AppConfig;
use crate::domain::presets;
use crate::shared::error::AppError;

/// Configuration validator for additional validation logic
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the complete configuration
    pub fn validate_config(config: &AppConfig) -> crate::Result<()> {
        if !config.preset.is_empty() {
            presets::by_name(&config.preset).map(|_| ())?;
        }

        for (field, line) in &config.rules {
            Self::validate_rule_line(field, line)?;
        }

        for key in config.messages.keys() {
            if !key.contains('.') {
                return Err(AppError::Config(format!(
                    "Message key '{key}' must use the FIELD.kind format"
                )));
            }
        }

        Ok(())
    }

    /// Validate one pipe-syntax rule line
    fn validate_rule_line(field: &str, line: &str) -> crate::Result<()> {
        if line.trim().is_empty() {
            return Err(AppError::InvalidRule(format!(
                "Empty rule specification for field '{field}'"
            )));
        }

        for token in line.split('|').filter(|t| !t.is_empty()) {
            let (name, args) = match token.split_once(':') {
                Some((name, args)) => (name, Some(args)),
                None => (token, None),
            };

            match name {
                "min" | "max" => {
                    let valid = args.map(|a| a.parse::<f64>().is_ok()).unwrap_or(false);
                    if !valid {
                        return Err(AppError::InvalidRule(format!(
                            "Rule '{token}' for field '{field}' needs a numeric argument"
                        )));
                    }
                }
                "in" => {
                    if args.map(str::is_empty).unwrap_or(true) {
                        return Err(AppError::InvalidRule(format!(
                            "Rule 'in' for field '{field}' needs a value list"
                        )));
                    }
                }
                "port" => {
                    if let Some(args) = args {
                        let range = args.split_once(',').and_then(|(min, max)| {
                            let min: u16 = min.trim().parse().ok()?;
                            let max: u16 = max.trim().parse().ok()?;
                            (min <= max).then_some(())
                        });
                        if range.is_none() {
                            return Err(AppError::InvalidRule(format!(
                                "Rule '{token}' for field '{field}' needs a min,max port range"
                            )));
                        }
                    }
                }
                _ => {}
            }
        }

        Ok(())
    }
}
