//! Infrastructure adapters
//!
//! Boundaries to ambient process state and the filesystem.

pub mod env_file;
pub mod env_source;

pub use env_source::{merge_sources, EnvSource, ProcessEnvSource, StaticEnvSource};
