//! Default rule presets
//!
//! Named, pre-built rule sets for common deployments, plus slice builders
//! for individual backing services. Presets form the lowest-precedence
//! layer of a session's rule-set merge.

pub mod application;
pub mod deployment;
pub mod services;

use crate::domain::spec::RuleSet;
use crate::shared::error::{AppError, AppResult};

pub use application::{application, localization, minimal};
pub use deployment::{api, docker, microservice, production};
pub use services::{cache, database, logging, mail, queue};

/// The complete default rule set: application plus localization
pub fn full() -> RuleSet {
    merge(application(), localization())
}

/// Resolve a preset by name.
///
/// Unknown names fail fast at configuration time.
pub fn by_name(name: &str) -> AppResult<RuleSet> {
    match name {
        "full" => Ok(full()),
        "minimal" => Ok(minimal()),
        "production" => Ok(production()),
        "api" => Ok(api()),
        "application" => Ok(application()),
        "localization" => Ok(localization()),
        _ => Err(AppError::UnknownPreset {
            name: name.to_string(),
        }),
    }
}

/// Merge two rule sets; keys in `overlay` win
pub fn merge(mut base: RuleSet, overlay: RuleSet) -> RuleSet {
    base.extend(overlay);
    base
}
