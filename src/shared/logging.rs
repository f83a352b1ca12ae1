//! Logging utilities module
//!
//! This module provides centralized logging initialization. The validation
//! core itself never logs; presentation concerns live at the binary
//! boundary.

use tracing::{error, info};

/// Logging utilities for the application
pub struct LoggingUtils;

impl LoggingUtils {
    /// Initialize logging with the specified configuration
    pub fn initialize(level: &str, _format: &str, _structured: bool) -> crate::Result<()> {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(false)
            .with_ansi(false)
            .finish();

        tracing::subscriber::set_global_default(subscriber).map_err(|e| {
            crate::shared::error::AppError::Config(format!("Failed to initialize logging: {e}"))
        })?;

        Ok(())
    }

    /// Log a successful validation run
    pub fn log_validation_success(field_count: usize) {
        info!(field_count = %field_count, "Environment validation passed");
    }

    /// Log a failed validation run
    pub fn log_validation_failure(error: &crate::shared::error::InvalidEnvironment) {
        error!(
            failed_fields = %error.errors().len(),
            "Environment validation failed"
        );
        for message in error.messages() {
            error!("  {message}");
        }
    }
}
