//! Core application and localization rule sets

use crate::domain::rules::{BooleanRule, InRule, UrlRule};
use crate::domain::spec::{RuleSet, RuleSpec, RuleUnit};

/// Core application configuration rules
pub fn application() -> RuleSet {
    let mut rules = RuleSet::new();

    rules.insert("APP_NAME".to_string(), RuleSpec::from("required|string"));
    rules.insert(
        "APP_ENV".to_string(),
        RuleSpec::from([
            RuleUnit::token("required"),
            RuleUnit::token("string"),
            RuleUnit::rule(InRule::of(["local", "development", "staging", "production"])),
        ]),
    );
    rules.insert(
        "APP_KEY".to_string(),
        RuleSpec::from("required|string|KeyRule"),
    );
    rules.insert(
        "APP_DEBUG".to_string(),
        RuleSpec::from([RuleUnit::token("required"), RuleUnit::rule(BooleanRule::new())]),
    );
    rules.insert(
        "APP_URL".to_string(),
        RuleSpec::from([RuleUnit::token("required"), RuleUnit::rule(UrlRule::new())]),
    );

    rules
}

/// Localization configuration rules
pub fn localization() -> RuleSet {
    let mut rules = RuleSet::new();

    rules.insert("APP_LOCALE".to_string(), RuleSpec::from("required|string"));
    rules.insert(
        "APP_FALLBACK_LOCALE".to_string(),
        RuleSpec::from("required|string"),
    );
    rules.insert(
        "APP_FAKER_LOCALE".to_string(),
        RuleSpec::from("nullable|string"),
    );

    rules
}

/// Minimal application rules: only the most essential variables
pub fn minimal() -> RuleSet {
    let mut rules = application();
    rules.remove("APP_URL");
    rules
}
