//! Application configuration structures
//!
//! This module contains the configuration surface of the validator: preset
//! selection, externally supplied rules and messages, boot-time validation
//! scope, logging and sync paths.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level
    #[validate(length(min = 1))]
    pub level: String,

    /// Log format
    #[validate(length(min = 1))]
    pub format: String,

    /// Enable structured logging
    pub structured: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
            structured: false,
        }
    }
}

/// Env-file sync configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct SyncConfig {
    /// Path to the actual definitions file
    #[validate(length(min = 1))]
    pub env_path: String,

    /// Path to the template/example file
    #[validate(length(min = 1))]
    pub example_path: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            env_path: ".env".to_string(),
            example_path: ".env.example".to_string(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Validate the environment automatically at startup
    pub auto_validate: bool,

    /// Name of the default rule preset
    pub preset: String,

    /// Externally configured rules: field name to pipe-syntax rule line.
    /// Merged between the preset layer and per-session overrides.
    pub rules: BTreeMap<String, String>,

    /// Custom error messages keyed `"FIELD.kind"`
    pub messages: BTreeMap<String, String>,

    /// Restrict boot-time validation to these keys (empty = all)
    pub validate_on_boot: Vec<String>,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// Sync configuration
    pub sync: SyncConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            auto_validate: false,
            preset: "full".to_string(),
            rules: BTreeMap::new(),
            messages: BTreeMap::new(),
            validate_on_boot: Vec::new(),
            logging: LoggingConfig::default(),
            sync: SyncConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> crate::Result<Self> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("EnvValidator").required(false))
            .add_source(config::Environment::with_prefix("ENV_VALIDATOR").separator("__"))
            .build()
            .map_err(|e| {
                crate::shared::error::AppError::Config(format!("Failed to build configuration: {e}"))
            })?;

        let config: AppConfig = config.try_deserialize().map_err(|e| {
            crate::shared::error::AppError::Config(format!(
                "Failed to deserialize configuration: {e}"
            ))
        })?;

        config.validate_config()?;

        Ok(config)
    }

    /// Validate the entire configuration, failing fast on malformed
    /// sections
    pub fn validate_config(&self) -> crate::Result<()> {
        self.logging
            .validate()
            .map_err(|e| crate::shared::error::AppError::Config(e.to_string()))?;
        self.sync
            .validate()
            .map_err(|e| crate::shared::error::AppError::Config(e.to_string()))?;

        super::validation::ConfigValidator::validate_config(self)
    }
}
