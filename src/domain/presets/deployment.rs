//! Deployment-oriented rule sets: production, API, microservice and Docker

use crate::domain::rules::{BooleanRule, InRule, KeyRule, UrlRule};
use crate::domain::spec::{RuleSet, RuleSpec, RuleUnit};

use super::application::{application, localization, minimal};
use super::merge;

/// Production-ready application rules: the environment must be one of the
/// deployed stages.
pub fn production() -> RuleSet {
    let mut rules = RuleSet::new();

    rules.insert("APP_NAME".to_string(), RuleSpec::from("required|string"));
    rules.insert(
        "APP_ENV".to_string(),
        RuleSpec::from([
            RuleUnit::token("required"),
            RuleUnit::token("string"),
            RuleUnit::rule(InRule::of(["staging", "production"]).with_message(
                "The :attribute must be either staging or production for production environments.",
            )),
        ]),
    );
    rules.insert(
        "APP_KEY".to_string(),
        RuleSpec::from([
            RuleUnit::token("required"),
            RuleUnit::token("string"),
            RuleUnit::rule(KeyRule::new()),
        ]),
    );
    rules.insert(
        "APP_DEBUG".to_string(),
        RuleSpec::from([RuleUnit::token("required"), RuleUnit::rule(BooleanRule::new())]),
    );
    rules.insert(
        "APP_URL".to_string(),
        RuleSpec::from([RuleUnit::token("required"), RuleUnit::rule(UrlRule::new())]),
    );

    merge(rules, localization())
}

/// API-focused application rules
pub fn api() -> RuleSet {
    let mut rules = application();
    rules.insert("APP_LOCALE".to_string(), RuleSpec::from("required|string"));
    rules
}

/// Microservice rules: minimal plus service identity
pub fn microservice() -> RuleSet {
    let mut rules = minimal();

    rules.insert(
        "SERVICE_NAME".to_string(),
        RuleSpec::from("required|string|min:2|max:50"),
    );
    rules.insert(
        "SERVICE_VERSION".to_string(),
        RuleSpec::from("required|string"),
    );
    rules.insert(
        "HEALTH_CHECK_PATH".to_string(),
        RuleSpec::from("nullable|string"),
    );

    rules
}

/// Containerized application rules: production plus container identity
pub fn docker() -> RuleSet {
    let mut rules = production();

    rules.insert("CONTAINER_NAME".to_string(), RuleSpec::from("nullable|string"));
    rules.insert("DOCKER_NETWORK".to_string(), RuleSpec::from("nullable|string"));

    rules
}
