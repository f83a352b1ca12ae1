//! Env Validator - rule-based environment variable validation
//!
//! This library validates a flat mapping of environment-variable names to
//! values against declarative rule sets (pipe-syntax lines, token lists or
//! parameterized rule objects), with preset rule sets, layered overrides
//! and custom error messages. A companion sync service reconciles an env
//! file with its example template.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod shared;

pub use application::{EnvSyncService, EnvValidator, SyncOptions, SyncStatus};
pub use config::AppConfig;
pub use domain::{
    presets, rules, EnvValue, MessageOverrides, Rule, RuleRegistry, RuleSet, RuleSpec, RuleUnit,
    StandaloneValidator, ValidationErrors,
};
pub use infrastructure::{EnvSource, ProcessEnvSource, StaticEnvSource};
pub use shared::error::{AppError, AppResult, InvalidEnvironment};

/// Application result type
pub type Result<T> = std::result::Result<T, shared::error::AppError>;
