//! Backing-service rule sets: database, cache, queue, mail and logging

use crate::domain::rules::InRule;
use crate::domain::spec::{RuleSet, RuleSpec, RuleUnit};

/// Database configuration rules
pub fn database() -> RuleSet {
    let mut rules = RuleSet::new();

    rules.insert(
        "DB_CONNECTION".to_string(),
        RuleSpec::from([
            RuleUnit::token("required"),
            RuleUnit::token("string"),
            RuleUnit::rule(InRule::of(["mysql", "pgsql", "sqlite", "sqlsrv"])),
        ]),
    );
    rules.insert(
        "DB_HOST".to_string(),
        RuleSpec::from("required_unless:DB_CONNECTION,sqlite|string"),
    );
    rules.insert(
        "DB_PORT".to_string(),
        RuleSpec::from("nullable|integer|min:1|max:65535"),
    );
    rules.insert("DB_DATABASE".to_string(), RuleSpec::from("required|string"));
    rules.insert(
        "DB_USERNAME".to_string(),
        RuleSpec::from("required_unless:DB_CONNECTION,sqlite|string"),
    );
    rules.insert("DB_PASSWORD".to_string(), RuleSpec::from("nullable|string"));

    rules
}

/// Cache and session configuration rules
pub fn cache() -> RuleSet {
    let mut rules = RuleSet::new();

    rules.insert(
        "CACHE_DRIVER".to_string(),
        RuleSpec::from([
            RuleUnit::token("required"),
            RuleUnit::rule(
                InRule::of(["file", "database", "redis", "memcached", "dynamodb", "array"])
                    .with_message("The :attribute must be a supported cache driver."),
            ),
        ]),
    );
    rules.insert(
        "SESSION_DRIVER".to_string(),
        RuleSpec::from([
            RuleUnit::token("required"),
            RuleUnit::rule(
                InRule::of(["file", "cookie", "database", "redis", "memcached", "array"])
                    .with_message("The :attribute must be a supported session driver."),
            ),
        ]),
    );
    rules.insert(
        "SESSION_LIFETIME".to_string(),
        RuleSpec::from("required|integer|min:1"),
    );

    rules
}

/// Queue configuration rules
pub fn queue() -> RuleSet {
    let mut rules = RuleSet::new();

    rules.insert(
        "QUEUE_CONNECTION".to_string(),
        RuleSpec::from([
            RuleUnit::token("required"),
            RuleUnit::rule(
                InRule::of(["sync", "database", "beanstalkd", "sqs", "redis"])
                    .with_message("The :attribute must be a supported queue connection."),
            ),
        ]),
    );

    rules
}

/// Mail configuration rules
pub fn mail() -> RuleSet {
    let mut rules = RuleSet::new();

    rules.insert(
        "MAIL_MAILER".to_string(),
        RuleSpec::from([
            RuleUnit::token("required"),
            RuleUnit::rule(InRule::of([
                "smtp", "sendmail", "mailgun", "ses", "postmark", "log", "array",
            ])),
        ]),
    );
    rules.insert(
        "MAIL_HOST".to_string(),
        RuleSpec::from("required_unless:MAIL_MAILER,log,array|string"),
    );
    rules.insert(
        "MAIL_PORT".to_string(),
        RuleSpec::from("required_unless:MAIL_MAILER,log,array|integer|min:1|max:65535"),
    );
    rules.insert("MAIL_USERNAME".to_string(), RuleSpec::from("nullable|string"));
    rules.insert("MAIL_PASSWORD".to_string(), RuleSpec::from("nullable|string"));
    rules.insert(
        "MAIL_ENCRYPTION".to_string(),
        RuleSpec::from([
            RuleUnit::token("nullable"),
            RuleUnit::rule(InRule::of(["tls", "ssl"])),
        ]),
    );

    rules
}

/// Logging configuration rules
pub fn logging() -> RuleSet {
    let mut rules = RuleSet::new();

    rules.insert(
        "LOG_CHANNEL".to_string(),
        RuleSpec::from([
            RuleUnit::token("required"),
            RuleUnit::rule(InRule::of([
                "stack", "single", "daily", "slack", "syslog", "errorlog",
            ])),
        ]),
    );
    rules.insert(
        "LOG_LEVEL".to_string(),
        RuleSpec::from([
            RuleUnit::token("required"),
            RuleUnit::rule(
                InRule::of([
                    "emergency", "alert", "critical", "error", "warning", "notice", "info",
                    "debug",
                ])
                .with_message("The :attribute must be a valid PSR-3 log level."),
            ),
        ]),
    );

    rules
}
