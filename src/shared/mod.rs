//! Shared utilities and common functionality
//!
//! This module contains shared utilities and error handling that are used
//! across the crate.

pub mod error;
pub mod logging;

pub use error::{AppError, AppResult, InvalidEnvironment};
pub use logging::LoggingUtils;
