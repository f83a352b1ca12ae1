//! Application services
//!
//! The validation session and the env-file synchronization service.

pub mod sync_service;
pub mod validator;

pub use sync_service::{EnvSyncService, SyncOptions, SyncOutcome, SyncReport, SyncStatus};
pub use validator::EnvValidator;
