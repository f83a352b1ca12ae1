use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::rule::Rule;
use crate::domain::rules::{
    BooleanRule, EmailRule, IntegerRule, IpRule, JsonRule, KeyRule, NumericRule, PortRule, UrlRule,
};

/// Factory producing a rule instance with default parameters
pub type RuleFactory = fn() -> Arc<dyn Rule>;

/// Registry of named rule factories, organized by category
pub struct RuleRegistry {
    rules: BTreeMap<String, BTreeMap<String, RuleFactory>>,
}

impl RuleRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            rules: BTreeMap::new(),
        }
    }

    /// Create a registry with all built-in rules registered
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();

        registry
            .register("string", "BooleanRule", || Arc::new(BooleanRule::new()))
            .register("string", "KeyRule", || Arc::new(KeyRule::new()))
            .register("string", "JsonRule", || Arc::new(JsonRule::new()))
            .register("string", "EmailRule", || Arc::new(EmailRule::new()))
            .register("network", "UrlRule", || Arc::new(UrlRule::new()))
            .register("network", "IpRule", || Arc::new(IpRule::new()))
            .register("numeric", "IntegerRule", || Arc::new(IntegerRule::new()))
            .register("numeric", "NumericRule", || Arc::new(NumericRule::new()))
            .register("numeric", "PortRule", || Arc::new(PortRule::new()));

        registry
    }

    /// Register a rule factory under a category and name
    pub fn register(
        &mut self,
        category: impl Into<String>,
        name: impl Into<String>,
        factory: RuleFactory,
    ) -> &mut Self {
        self.rules
            .entry(category.into())
            .or_default()
            .insert(name.into(), factory);
        self
    }

    /// Look up a factory by name.
    ///
    /// Qualified path-style names resolve through their final segment, so
    /// `rules::string::BooleanRule` finds `BooleanRule`.
    pub fn get(&self, name: &str) -> Option<RuleFactory> {
        let short = Self::short_name(name);
        self.rules
            .values()
            .find_map(|category| category.get(short))
            .copied()
    }

    /// Whether a name resolves to a registered rule
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Instantiate a registered rule by name
    pub fn make(&self, name: &str) -> Option<Arc<dyn Rule>> {
        self.get(name).map(|factory| factory())
    }

    /// All factories registered in a category
    pub fn category(&self, category: &str) -> Option<&BTreeMap<String, RuleFactory>> {
        self.rules.get(category)
    }

    fn short_name(name: &str) -> &str {
        name.rsplit("::").next().unwrap_or(name)
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}
