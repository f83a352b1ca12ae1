//! Rule evaluation engine
//!
//! Drives one field at a time through its normalized rule units: the
//! required check runs first and short-circuits, absent optional fields are
//! skipped entirely, and every remaining unit is attempted so a field can
//! accumulate multiple error messages. The engine is pure: it never logs
//! and only returns data.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::registry::RuleRegistry;
use crate::domain::rule::{render_message, Rule};
use crate::domain::rules::{
    BooleanRule, EmailRule, IntegerRule, IpRule, JsonRule, KeyRule, NumericRule, PortRule, UrlRule,
};
use crate::domain::spec::{RuleSet, RuleUnit};
use crate::domain::value::EnvValue;

/// Per-field validation errors, in evaluation order.
///
/// Field iteration order is deterministic (sorted by field name); message
/// order within a field follows the declared rule order, duplicates
/// preserved. An empty map means success.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    #[serde(flatten)]
    errors: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    /// Append one message to a field's error list
    pub fn push(&mut self, field: &str, message: String) {
        self.errors.entry(field.to_string()).or_default().push(message);
    }

    /// Whether no field has any error
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of fields with at least one error
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// The error messages recorded for a field
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.errors.get(field).map(Vec::as_slice)
    }

    /// Iterate over fields and their messages
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.errors.iter()
    }

    /// Consume into the underlying map
    pub fn into_inner(self) -> BTreeMap<String, Vec<String>> {
        self.errors
    }
}

/// Message override map, keyed `"FIELD.kind"`
pub type MessageOverrides = BTreeMap<String, String>;

/// Pure validation entry point with no session state.
pub struct StandaloneValidator;

impl StandaloneValidator {
    /// Validate an environment map against a rule set.
    ///
    /// Returns `Ok(())` on full success, otherwise the per-field error map.
    /// Calling twice with identical inputs yields identical output.
    pub fn validate(
        env: &BTreeMap<String, EnvValue>,
        rules: &RuleSet,
        messages: &MessageOverrides,
    ) -> Result<(), ValidationErrors> {
        let registry = RuleRegistry::with_builtins();
        Self::validate_with_registry(env, rules, messages, &registry)
    }

    /// Validate using a caller-supplied registry
    pub fn validate_with_registry(
        env: &BTreeMap<String, EnvValue>,
        rules: &RuleSet,
        messages: &MessageOverrides,
        registry: &RuleRegistry,
    ) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();

        for (field, spec) in rules {
            let units = spec.normalize(registry);
            Self::validate_field(field, env.get(field), &units, messages, registry, &mut errors);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_field(
        field: &str,
        value: Option<&EnvValue>,
        units: &[RuleUnit],
        messages: &MessageOverrides,
        registry: &RuleRegistry,
        errors: &mut ValidationErrors,
    ) {
        let required = units.iter().any(RuleUnit::is_required_marker);
        let missing = match value {
            None => true,
            Some(EnvValue::Str(s)) => s.is_empty(),
            Some(_) => false,
        };

        if required && missing {
            let message = messages
                .get(&format!("{field}.required"))
                .cloned()
                .unwrap_or_else(|| format!("The {field} field is required."));
            errors.push(field, render_message(&message, field));
            return;
        }

        let Some(value) = value else {
            // Absent and not required: skip every other unit.
            return;
        };

        if missing && units.iter().any(RuleUnit::is_nullable_marker) {
            return;
        }

        for unit in units {
            if unit.is_required_marker() || unit.is_nullable_marker() {
                continue;
            }

            match unit {
                RuleUnit::Rule(rule) => {
                    Self::apply_rule(field, value, rule.as_ref(), messages, errors);
                }
                RuleUnit::Named(name) => {
                    if let Some(rule) = registry.make(name) {
                        Self::apply_rule(field, value, rule.as_ref(), messages, errors);
                    }
                }
                RuleUnit::Token(token) => {
                    Self::apply_token(field, value, token, messages, errors);
                }
            }
        }
    }

    fn apply_rule(
        field: &str,
        value: &EnvValue,
        rule: &dyn Rule,
        messages: &MessageOverrides,
        errors: &mut ValidationErrors,
    ) {
        if rule.passes(field, value) {
            return;
        }

        let message = messages
            .get(&format!("{field}.{}", rule.kind()))
            .cloned()
            .unwrap_or_else(|| rule.message());
        errors.push(field, render_message(&message, field));
    }

    /// Evaluate one directly-handled token; unknown tokens are ignored for
    /// forward compatibility with host-framework rule vocabularies.
    fn apply_token(
        field: &str,
        value: &EnvValue,
        token: &str,
        messages: &MessageOverrides,
        errors: &mut ValidationErrors,
    ) {
        let (name, args) = match token.split_once(':') {
            Some((name, args)) => (name, Some(args)),
            None => (token, None),
        };

        match name {
            "string" => {
                if !matches!(value, EnvValue::Str(_)) {
                    Self::fail_token(
                        field,
                        "string",
                        "The :attribute must be a string.",
                        messages,
                        errors,
                    );
                }
            }
            "boolean" => Self::apply_rule(field, value, &BooleanRule::new(), messages, errors),
            "integer" => Self::apply_rule(field, value, &IntegerRule::new(), messages, errors),
            "numeric" => Self::apply_rule(field, value, &NumericRule::new(), messages, errors),
            "email" => Self::apply_rule(field, value, &EmailRule::new(), messages, errors),
            "url" => Self::apply_rule(field, value, &UrlRule::new(), messages, errors),
            "json" => Self::apply_rule(field, value, &JsonRule::new(), messages, errors),
            "key" => Self::apply_rule(field, value, &KeyRule::new(), messages, errors),
            "ip" => Self::apply_rule(field, value, &IpRule::new(), messages, errors),
            "ipv4" => Self::apply_rule(field, value, &IpRule::v4(), messages, errors),
            "ipv6" => Self::apply_rule(field, value, &IpRule::v6(), messages, errors),
            "port" => {
                let rule = match args.map(Self::parse_port_args) {
                    Some(Some((min, max))) => PortRule::with_range(min, max),
                    Some(None) => return, // unparseable arguments: ignored
                    None => PortRule::new(),
                };
                Self::apply_rule(field, value, &rule, messages, errors);
            }
            "in" => {
                let Some(args) = args else { return };
                let allowed: Vec<&str> = args.split(',').collect();
                let matched = allowed.iter().any(|candidate| match value.as_str() {
                    Some(s) => s == *candidate,
                    None => value.to_string() == *candidate,
                });
                if !matched {
                    let default = format!("The :attribute must be one of: {}.", allowed.join(", "));
                    Self::fail_token(field, "in", &default, messages, errors);
                }
            }
            "min" => {
                if let Some(Some(bound)) = args.map(|a| a.parse::<f64>().ok()) {
                    if !Self::satisfies_bound(value, bound, true) {
                        let default = format!("The :attribute must be at least {bound}.");
                        Self::fail_token(field, "min", &default, messages, errors);
                    }
                }
            }
            "max" => {
                if let Some(Some(bound)) = args.map(|a| a.parse::<f64>().ok()) {
                    if !Self::satisfies_bound(value, bound, false) {
                        let default = format!("The :attribute may not be greater than {bound}.");
                        Self::fail_token(field, "max", &default, messages, errors);
                    }
                }
            }
            _ => {}
        }
    }

    fn fail_token(
        field: &str,
        kind: &str,
        default: &str,
        messages: &MessageOverrides,
        errors: &mut ValidationErrors,
    ) {
        let message = messages
            .get(&format!("{field}.{kind}"))
            .cloned()
            .unwrap_or_else(|| default.to_string());
        errors.push(field, render_message(&message, field));
    }

    /// Bound check for `min:`/`max:` tokens: numeric comparison when the
    /// value is numeric, character length otherwise. Values that are
    /// neither strings nor numbers are not checked.
    fn satisfies_bound(value: &EnvValue, bound: f64, lower: bool) -> bool {
        let measure = match value.as_f64() {
            Some(number) => number,
            None => match value.as_str() {
                Some(s) => s.chars().count() as f64,
                None => return true,
            },
        };

        if lower {
            measure >= bound
        } else {
            measure <= bound
        }
    }

    fn parse_port_args(args: &str) -> Option<(u16, u16)> {
        let (min, max) = args.split_once(',')?;
        Some((min.trim().parse().ok()?, max.trim().parse().ok()?))
    }
}
