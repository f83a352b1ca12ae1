//! Infrastructure module
//!
//! Adapters between the validation core and the outside world.

pub mod adapters;

pub use adapters::{EnvSource, ProcessEnvSource, StaticEnvSource};
