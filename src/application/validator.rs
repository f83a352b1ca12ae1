//! Validation session
//!
//! Merges preset, configuration and caller-supplied rule layers, resolves
//! message overrides, gathers values from the configured environment
//! sources and drives the evaluation engine across the whole rule set.

use std::collections::BTreeMap;

use tracing::debug;

use crate::config::AppConfig;
use crate::domain::engine::{MessageOverrides, StandaloneValidator, ValidationErrors};
use crate::domain::presets;
use crate::domain::registry::RuleRegistry;
use crate::domain::spec::{RuleSet, RuleSpec, RuleUnit};
use crate::domain::value::EnvValue;
use crate::infrastructure::adapters::{merge_sources, EnvSource, ProcessEnvSource};
use crate::shared::error::{AppResult, InvalidEnvironment};

/// Validates environment variables against layered rule sets.
///
/// Rule layers merge with increasing precedence: preset defaults, then
/// configuration-supplied rules, then per-session overrides. `set_rules`
/// replaces everything; `add_rule` upserts a single field.
pub struct EnvValidator {
    default_rules: RuleSet,
    config_rules: RuleSet,
    custom_rules: RuleSet,
    config_messages: MessageOverrides,
    messages: MessageOverrides,
    replace_defaults: bool,
    registry: RuleRegistry,
    sources: Vec<Box<dyn EnvSource>>,
}

impl EnvValidator {
    /// Create a session with the full default preset and the process
    /// environment as its value source.
    pub fn new() -> Self {
        Self {
            default_rules: presets::full(),
            config_rules: RuleSet::new(),
            custom_rules: RuleSet::new(),
            config_messages: MessageOverrides::new(),
            messages: MessageOverrides::new(),
            replace_defaults: false,
            registry: RuleRegistry::with_builtins(),
            sources: vec![Box::new(ProcessEnvSource::new())],
        }
    }

    /// Swap the default layer to a named preset.
    ///
    /// Fails fast on an unknown preset name.
    pub fn use_preset(mut self, name: &str) -> AppResult<Self> {
        self.default_rules = presets::by_name(name)?;
        self.replace_defaults = false;
        Ok(self)
    }

    /// Use only the essential environment rules
    pub fn use_minimal_rules(mut self) -> Self {
        self.default_rules = presets::minimal();
        self.replace_defaults = false;
        self
    }

    /// Use the full default rules
    pub fn use_full_rules(mut self) -> Self {
        self.default_rules = presets::full();
        self.replace_defaults = false;
        self
    }

    /// Use production-oriented rules
    pub fn use_production_rules(mut self) -> Self {
        self.default_rules = presets::production();
        self.replace_defaults = false;
        self
    }

    /// Use API-focused rules
    pub fn use_api_rules(mut self) -> Self {
        self.default_rules = presets::api();
        self.replace_defaults = false;
        self
    }

    /// Replace the effective rule set entirely, discarding the default and
    /// configuration layers.
    pub fn set_rules(mut self, rules: RuleSet) -> Self {
        self.custom_rules = rules;
        self.replace_defaults = true;
        self
    }

    /// Add or override a single field's rules, merging with the lower
    /// layers.
    pub fn add_rule(mut self, field: impl Into<String>, spec: impl Into<RuleSpec>) -> Self {
        self.custom_rules.insert(field.into(), spec.into());
        self.replace_defaults = false;
        self
    }

    /// Replace the message-override mapping (`"FIELD.kind"` keys)
    pub fn set_messages(mut self, messages: MessageOverrides) -> Self {
        self.messages = messages;
        self
    }

    /// The current session-level message overrides
    pub fn messages(&self) -> &MessageOverrides {
        &self.messages
    }

    /// Apply the configuration layer: preset selection, rules and messages.
    ///
    /// Fails fast when the configured preset is unknown.
    pub fn with_config(mut self, config: &AppConfig) -> AppResult<Self> {
        if !config.preset.is_empty() {
            self.default_rules = presets::by_name(&config.preset)?;
        }

        self.config_rules = config
            .rules
            .iter()
            .map(|(field, line)| (field.clone(), RuleSpec::from(line.clone())))
            .collect();
        self.config_messages = config.messages.clone();

        Ok(self)
    }

    /// Append an environment source; later sources win on key collision
    pub fn add_source(mut self, source: Box<dyn EnvSource>) -> Self {
        self.sources.push(source);
        self
    }

    /// Register an additional rule type for deferred references
    pub fn register_rule(
        mut self,
        category: &str,
        name: &str,
        factory: crate::domain::registry::RuleFactory,
    ) -> Self {
        self.registry.register(category, name, factory);
        self
    }

    /// The merged, fully-normalized rule set.
    ///
    /// Deferred references stay un-instantiated; repeated calls yield the
    /// same result.
    pub fn rules(&self) -> BTreeMap<String, Vec<RuleUnit>> {
        self.effective_specs()
            .iter()
            .map(|(field, spec)| (field.clone(), spec.normalize(&self.registry)))
            .collect()
    }

    /// Validate values gathered from the session's environment sources
    pub fn validate(&self) -> AppResult<()> {
        let env = merge_sources(&self.sources);
        self.perform(&self.effective_specs(), &env)
    }

    /// Validate an explicit value map
    pub fn validate_map(&self, env: &BTreeMap<String, EnvValue>) -> AppResult<()> {
        self.perform(&self.effective_specs(), env)
    }

    /// Validate only the named fields against the session's sources
    pub fn validate_only(&self, fields: &[&str]) -> AppResult<()> {
        let env = merge_sources(&self.sources);
        self.perform(&self.restrict(fields), &env)
    }

    /// Validate only the named fields against an explicit value map
    pub fn validate_only_map(
        &self,
        fields: &[&str],
        env: &BTreeMap<String, EnvValue>,
    ) -> AppResult<()> {
        self.perform(&self.restrict(fields), env)
    }

    /// Standalone validation: a pure pass with no session state.
    ///
    /// Returns `Ok(())` or the raw per-field error map, never a raised
    /// error.
    pub fn validate_standalone(
        env: &BTreeMap<String, EnvValue>,
        rules: &RuleSet,
        messages: &MessageOverrides,
    ) -> Result<(), ValidationErrors> {
        StandaloneValidator::validate(env, rules, messages)
    }

    fn effective_specs(&self) -> RuleSet {
        if self.replace_defaults {
            return self.custom_rules.clone();
        }

        let mut merged = self.default_rules.clone();
        merged.extend(self.config_rules.clone());
        merged.extend(self.custom_rules.clone());
        merged
    }

    fn effective_messages(&self) -> MessageOverrides {
        let mut merged = self.config_messages.clone();
        merged.extend(self.messages.clone());
        merged
    }

    fn restrict(&self, fields: &[&str]) -> RuleSet {
        self.effective_specs()
            .into_iter()
            .filter(|(field, _)| fields.contains(&field.as_str()))
            .collect()
    }

    fn perform(&self, rules: &RuleSet, env: &BTreeMap<String, EnvValue>) -> AppResult<()> {
        debug!(fields = %rules.len(), "Validating environment");

        match StandaloneValidator::validate_with_registry(
            env,
            rules,
            &self.effective_messages(),
            &self.registry,
        ) {
            Ok(()) => Ok(()),
            Err(errors) => Err(InvalidEnvironment::new(errors.into_inner()).into()),
        }
    }
}

impl Default for EnvValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::rules::InRule;
    use crate::infrastructure::adapters::StaticEnvSource;
    use crate::shared::error::AppError;

    fn env(pairs: &[(&str, &str)]) -> BTreeMap<String, EnvValue> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), EnvValue::from(*v)))
            .collect()
    }

    fn valid_full_env() -> BTreeMap<String, EnvValue> {
        env(&[
            ("APP_NAME", "demo"),
            ("APP_ENV", "production"),
            ("APP_KEY", "base64:y0KpAOoEIJ3y2PbqsI5fHKLxPUnYDFUJhG+qJOb0mLQ="),
            ("APP_DEBUG", "false"),
            ("APP_URL", "https://example.com"),
            ("APP_LOCALE", "en"),
            ("APP_FALLBACK_LOCALE", "en"),
        ])
    }

    #[test]
    fn default_session_validates_a_full_environment() {
        let validator = EnvValidator::new();
        assert!(validator.validate_map(&valid_full_env()).is_ok());
    }

    #[test]
    fn session_failure_carries_map_and_joined_message() {
        let validator = EnvValidator::new();
        let result = validator.validate_map(&env(&[]));

        match result.unwrap_err() {
            AppError::Environment(e) => {
                assert!(e.to_string().starts_with("Environment validation failed: "));
                assert!(e.errors().contains_key("APP_NAME"));
                assert!(!e.messages().is_empty());
            }
            other => panic!("expected environment error, got {other}"),
        }
    }

    #[test]
    fn set_rules_replaces_all_layers() {
        let mut rules = RuleSet::new();
        rules.insert("ONLY_KEY".to_string(), RuleSpec::from("required"));

        let validator = EnvValidator::new().set_rules(rules);
        // The default APP_* rules are gone; only ONLY_KEY is validated.
        let result = validator.validate_map(&env(&[("ONLY_KEY", "present")]));
        assert!(result.is_ok());
    }

    #[test]
    fn add_rule_merges_with_defaults() {
        let validator = EnvValidator::new().add_rule("EXTRA", "required");

        let mut values = valid_full_env();
        let err = validator.validate_map(&values).unwrap_err();
        match err {
            AppError::Environment(e) => {
                assert_eq!(e.errors().len(), 1);
                assert!(e.errors().contains_key("EXTRA"));
            }
            other => panic!("unexpected {other}"),
        }

        values.insert("EXTRA".to_string(), EnvValue::from("x"));
        assert!(validator.validate_map(&values).is_ok());
    }

    #[test]
    fn add_rule_overrides_a_default_field() {
        let validator =
            EnvValidator::new().add_rule("APP_ENV", [RuleUnit::rule(InRule::of(["qa"]))]);

        let mut values = valid_full_env();
        values.insert("APP_ENV".to_string(), EnvValue::from("qa"));
        assert!(validator.validate_map(&values).is_ok());
    }

    #[test]
    fn unknown_preset_fails_fast() {
        let result = EnvValidator::new().use_preset("bogus");
        assert!(matches!(result, Err(AppError::UnknownPreset { .. })));
    }

    #[test]
    fn minimal_preset_drops_url_requirement() {
        let validator = EnvValidator::new().use_minimal_rules();
        let mut values = valid_full_env();
        values.remove("APP_URL");
        assert!(validator.validate_map(&values).is_ok());
    }

    #[test]
    fn validate_only_restricts_the_field_set() {
        let validator = EnvValidator::new();
        let values = env(&[("APP_NAME", "demo")]);

        assert!(validator.validate_only_map(&["APP_NAME"], &values).is_ok());
        assert!(validator
            .validate_only_map(&["APP_NAME", "APP_KEY"], &values)
            .is_err());
    }

    #[test]
    fn custom_messages_reach_the_report() {
        let mut messages = MessageOverrides::new();
        messages.insert("APP_KEY.required".to_string(), "X".to_string());

        let mut rules = RuleSet::new();
        rules.insert("APP_KEY".to_string(), RuleSpec::from("required"));

        let validator = EnvValidator::new().set_rules(rules).set_messages(messages);
        match validator.validate_map(&env(&[])).unwrap_err() {
            AppError::Environment(e) => {
                assert_eq!(e.errors()["APP_KEY"], vec!["X".to_string()]);
            }
            other => panic!("unexpected {other}"),
        }
    }

    #[test]
    fn config_layer_sits_between_defaults_and_overrides() {
        let mut config = AppConfig::default();
        config
            .rules
            .insert("FEATURE_FLAG".to_string(), "required|boolean".to_string());

        let mut values = valid_full_env();
        values.insert("FEATURE_FLAG".to_string(), EnvValue::from("maybe"));

        // The config layer rejects a non-boolean flag.
        let configured = EnvValidator::new().with_config(&config).unwrap();
        assert!(configured.validate_map(&values).is_err());

        // The override layer replaces the config rule for the same key.
        let overridden = EnvValidator::new()
            .with_config(&config)
            .unwrap()
            .add_rule("FEATURE_FLAG", "required|in:maybe");
        assert!(overridden.validate_map(&values).is_ok());
    }

    #[test]
    fn config_preset_selection_is_applied() {
        let mut config = AppConfig::default();
        config.preset = "minimal".to_string();

        let validator = EnvValidator::new().with_config(&config).unwrap();
        let mut values = valid_full_env();
        values.remove("APP_URL");
        values.remove("APP_LOCALE");
        values.remove("APP_FALLBACK_LOCALE");
        assert!(validator.validate_map(&values).is_ok());
    }

    #[test]
    fn sources_merge_with_later_precedence() {
        let mut rules = RuleSet::new();
        rules.insert(
            "APP_ENV".to_string(),
            RuleSpec::from("required|in:staging,production"),
        );

        let validator = EnvValidator::new()
            .set_rules(rules)
            .add_source(Box::new(StaticEnvSource::from_pairs([("APP_ENV", "local")])))
            .add_source(Box::new(StaticEnvSource::from_pairs([(
                "APP_ENV",
                "production",
            )])));

        assert!(validator.validate().is_ok());
    }

    #[test]
    fn standalone_entry_point_returns_raw_errors() {
        let mut rules = RuleSet::new();
        rules.insert("APP_ENV".to_string(), RuleSpec::from("required"));

        let result =
            EnvValidator::validate_standalone(&env(&[]), &rules, &MessageOverrides::new());
        let errors = result.unwrap_err();
        assert_eq!(errors.get("APP_ENV").unwrap().len(), 1);
    }

    #[test]
    fn registered_custom_rules_resolve_by_name() {
        use std::sync::Arc;

        let mut rules = RuleSet::new();
        rules.insert("APP_HOST".to_string(), RuleSpec::from("required|IpRule"));

        let validator = EnvValidator::new()
            .set_rules(rules)
            .register_rule("network", "IpRule", || {
                Arc::new(crate::domain::rules::IpRule::v4())
            });

        assert!(validator
            .validate_map(&env(&[("APP_HOST", "10.0.0.1")]))
            .is_ok());
        assert!(validator
            .validate_map(&env(&[("APP_HOST", "nope")]))
            .is_err());
    }

    #[test]
    fn rules_accessor_is_idempotent() {
        let validator = EnvValidator::new().add_rule("EXTRA", "required|string");
        let first: Vec<String> = validator.rules().keys().cloned().collect();
        let second: Vec<String> = validator.rules().keys().cloned().collect();
        assert_eq!(first, second);
        assert!(first.contains(&"EXTRA".to_string()));
    }
}
