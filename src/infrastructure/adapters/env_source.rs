//! Environment source adapters
//!
//! Ambient environment access is confined here: the session asks an
//! explicit source list for its values instead of reading process state
//! mid-evaluation.

use std::collections::BTreeMap;

use crate::domain::value::EnvValue;

/// A provider of environment variables as a flat name-to-value table
pub trait EnvSource: Send + Sync {
    fn vars(&self) -> BTreeMap<String, EnvValue>;
}

/// The current process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvSource;

impl ProcessEnvSource {
    pub fn new() -> Self {
        Self
    }
}

impl EnvSource for ProcessEnvSource {
    fn vars(&self) -> BTreeMap<String, EnvValue> {
        std::env::vars()
            .map(|(key, value)| (key, EnvValue::Str(value)))
            .collect()
    }
}

/// A fixed in-memory variable table, used for process-level overrides and
/// in tests.
#[derive(Debug, Clone, Default)]
pub struct StaticEnvSource {
    vars: BTreeMap<String, EnvValue>,
}

impl StaticEnvSource {
    pub fn new(vars: BTreeMap<String, EnvValue>) -> Self {
        Self { vars }
    }

    /// Build from string pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<EnvValue>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl EnvSource for StaticEnvSource {
    fn vars(&self) -> BTreeMap<String, EnvValue> {
        self.vars.clone()
    }
}

/// Merge sources in order; later sources win on key collision
pub fn merge_sources(sources: &[Box<dyn EnvSource>]) -> BTreeMap<String, EnvValue> {
    let mut merged = BTreeMap::new();
    for source in sources {
        merged.extend(source.vars());
    }
    merged
}
