//! Env/example file synchronization
//!
//! Diffs an actual env-definitions file against its template/example
//! counterpart and reconciles them: missing keys can be appended with
//! generated placeholder values, extra keys removed, and a categorized
//! report produced. This is a line-oriented text transform, separate from
//! the validation core.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::info;
use validator::{ValidateEmail, ValidateUrl};

use crate::domain::rules::{BooleanRule, EmailRule, InRule, UrlRule};
use crate::domain::spec::{RuleSet, RuleSpec, RuleUnit};
use crate::infrastructure::adapters::env_file::parse_env_file;
use crate::shared::error::AppResult;

/// Key name fragments treated as sensitive when generating example values
const SENSITIVE_KEY_PATTERNS: [&str; 12] = [
    "APP_KEY",
    "DB_PASSWORD",
    "REDIS_PASSWORD",
    "MAIL_PASSWORD",
    "AWS_SECRET_ACCESS_KEY",
    "STRIPE_SECRET",
    "JWT_SECRET",
    "ENCRYPTION_KEY",
    "API_SECRET",
    "TOKEN",
    "SECRET",
    "PASSWORD",
];

/// Structured comparison of the env file against the example file
#[derive(Debug, Clone, Default)]
pub struct FileComparison {
    pub missing_in_example: BTreeMap<String, String>,
    pub extra_in_example: BTreeMap<String, String>,
    pub common: BTreeMap<String, String>,
    pub env_count: usize,
    pub example_count: usize,
}

/// Overall sync state of the two files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus {
    Synced,
    OutOfSync,
    MissingEnv,
    MissingExample,
}

/// Detailed sync report with keys grouped by category
#[derive(Debug, Clone)]
pub struct SyncReport {
    pub status: SyncStatus,
    pub message: String,
    pub missing_by_category: BTreeMap<String, Vec<String>>,
    pub extra_in_example: Vec<String>,
    pub suggestions: Vec<String>,
    pub total_env_keys: usize,
    pub total_example_keys: usize,
}

/// Options controlling [`EnvSyncService::sync_to_example`]
#[derive(Debug, Clone)]
pub struct SyncOptions {
    pub add_missing: bool,
    pub remove_extra: bool,
    pub generate_values: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            add_missing: true,
            remove_extra: false,
            generate_values: true,
        }
    }
}

/// Result of a sync run
#[derive(Debug, Clone, Default)]
pub struct SyncOutcome {
    pub added: Vec<String>,
    pub removed: Vec<String>,
    pub created_file: bool,
}

/// Synchronizes an env file with its example/template file.
pub struct EnvSyncService {
    env_path: PathBuf,
    example_path: PathBuf,
}

impl EnvSyncService {
    /// Create a service over explicit file paths
    pub fn new(env_path: impl Into<PathBuf>, example_path: impl Into<PathBuf>) -> Self {
        Self {
            env_path: env_path.into(),
            example_path: example_path.into(),
        }
    }

    /// Create a service over `.env` and `.env.example` in the current
    /// working directory
    pub fn in_current_dir() -> Self {
        Self::new(".env", ".env.example")
    }

    pub fn env_file_exists(&self) -> bool {
        self.env_path.exists()
    }

    pub fn example_file_exists(&self) -> bool {
        self.example_path.exists()
    }

    /// Compare both files and return the structured difference
    pub fn compare(&self) -> AppResult<FileComparison> {
        let env_vars = parse_env_file(&self.env_path)?;
        let example_vars = parse_env_file(&self.example_path)?;

        let missing_in_example = env_vars
            .iter()
            .filter(|(key, _)| !example_vars.contains_key(*key))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        let extra_in_example = example_vars
            .iter()
            .filter(|(key, _)| !env_vars.contains_key(*key))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        let common = env_vars
            .iter()
            .filter(|(key, _)| example_vars.contains_key(*key))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        Ok(FileComparison {
            missing_in_example,
            extra_in_example,
            common,
            env_count: env_vars.len(),
            example_count: example_vars.len(),
        })
    }

    /// Produce a detailed report on the sync state of both files
    pub fn report(&self) -> AppResult<SyncReport> {
        if !self.env_file_exists() {
            return Ok(SyncReport {
                status: SyncStatus::MissingEnv,
                message: ".env file not found".to_string(),
                missing_by_category: BTreeMap::new(),
                extra_in_example: Vec::new(),
                suggestions: vec!["Create a .env file first".to_string()],
                total_env_keys: 0,
                total_example_keys: 0,
            });
        }

        if !self.example_file_exists() {
            return Ok(SyncReport {
                status: SyncStatus::MissingExample,
                message: ".env.example file not found".to_string(),
                missing_by_category: BTreeMap::new(),
                extra_in_example: Vec::new(),
                suggestions: vec!["Create .env.example file from .env template".to_string()],
                total_env_keys: parse_env_file(&self.env_path)?.len(),
                total_example_keys: 0,
            });
        }

        let comparison = self.compare()?;
        let mut issues = Vec::new();
        let mut suggestions = Vec::new();

        if !comparison.missing_in_example.is_empty() {
            issues.push(format!(
                "{} key(s) missing in .env.example",
                comparison.missing_in_example.len()
            ));
            suggestions.push("Add missing keys to .env.example".to_string());
        }

        if !comparison.extra_in_example.is_empty() {
            issues.push(format!(
                "{} extra key(s) in .env.example",
                comparison.extra_in_example.len()
            ));
            suggestions.push("Remove unused keys from .env.example or add them to .env".to_string());
        }

        let status = if issues.is_empty() {
            SyncStatus::Synced
        } else {
            SyncStatus::OutOfSync
        };

        Ok(SyncReport {
            status,
            message: if issues.is_empty() {
                "Files are synchronized".to_string()
            } else {
                issues.join(", ")
            },
            missing_by_category: Self::categorize_keys(&comparison.missing_in_example),
            extra_in_example: comparison.extra_in_example.keys().cloned().collect(),
            suggestions,
            total_env_keys: comparison.env_count,
            total_example_keys: comparison.example_count,
        })
    }

    /// Synchronize the example file with the env file.
    ///
    /// Creates the example file from scratch when it does not exist yet.
    pub fn sync_to_example(&self, options: &SyncOptions) -> AppResult<SyncOutcome> {
        if !self.env_file_exists() {
            return Err(crate::shared::error::AppError::Config(
                ".env file not found".to_string(),
            ));
        }

        if !self.example_file_exists() {
            self.create_example_from_env(options.generate_values)?;
            info!(path = %self.example_path.display(), "Created example file from env template");
            return Ok(SyncOutcome {
                created_file: true,
                ..SyncOutcome::default()
            });
        }

        let comparison = self.compare()?;
        let mut content = std::fs::read_to_string(&self.example_path)?;
        let mut outcome = SyncOutcome::default();

        if options.add_missing {
            for (key, value) in &comparison.missing_in_example {
                let example_value = if options.generate_values {
                    Self::generate_example_value(key, value)
                } else {
                    String::new()
                };
                content.push_str(&format!("\n{key}={example_value}"));
                outcome.added.push(key.clone());
            }
        }

        if options.remove_extra {
            for key in comparison.extra_in_example.keys() {
                let filtered: Vec<&str> = content
                    .lines()
                    .filter(|line| {
                        line.trim()
                            .split_once('=')
                            .map(|(k, _)| k.trim() != key)
                            .unwrap_or(true)
                    })
                    .collect();
                content = filtered.join("\n");
                outcome.removed.push(key.clone());
            }
        }

        // Collapse runs of blank lines left behind by removals.
        while content.contains("\n\n\n") {
            content = content.replace("\n\n\n", "\n\n");
        }
        let content = format!("{}\n", content.trim_end());

        std::fs::write(&self.example_path, content)?;
        info!(
            added = %outcome.added.len(),
            removed = %outcome.removed.len(),
            "Synchronized example file"
        );

        Ok(outcome)
    }

    /// Suggest validation rules for keys from name and value heuristics
    pub fn suggest_rules(keys: &BTreeMap<String, String>) -> RuleSet {
        let mut rules = RuleSet::new();

        for (key, value) in keys {
            let mut units = vec![RuleUnit::token("required")];

            if key.contains("EMAIL") || value.validate_email() {
                units.push(RuleUnit::rule(EmailRule::new()));
            } else if key.contains("URL") || value.validate_url() {
                units.push(RuleUnit::rule(UrlRule::new()));
            } else if key.contains("DEBUG") || matches!(value.to_lowercase().as_str(), "true" | "false") {
                units.push(RuleUnit::rule(BooleanRule::new()));
            } else if key == "APP_ENV" {
                units.push(RuleUnit::rule(InRule::of([
                    "local",
                    "development",
                    "staging",
                    "production",
                ])));
            } else if key.contains("PORT") && value.parse::<f64>().is_ok() {
                units.push(RuleUnit::token("integer"));
                units.push(RuleUnit::token("min:1"));
                units.push(RuleUnit::token("max:65535"));
            } else {
                units.push(RuleUnit::token("string"));
            }

            rules.insert(key.clone(), RuleSpec::List(units));
        }

        rules
    }

    /// Generate a safe placeholder value for an example entry
    pub fn generate_example_value(key: &str, value: &str) -> String {
        if Self::is_sensitive_key(key) {
            return String::new();
        }

        if matches!(
            value.to_lowercase().as_str(),
            "true" | "false" | "1" | "0" | "yes" | "no"
        ) {
            return "true".to_string();
        }

        if value.validate_url() {
            let scheme = value.split("://").next().unwrap_or("https");
            return format!("{scheme}://example.com");
        }

        if value.validate_email() {
            return "user@example.com".to_string();
        }

        if value.parse::<f64>().is_ok() {
            return value.to_string();
        }

        if key == "APP_ENV" || key == "NODE_ENV" {
            return "production".to_string();
        }

        if key.contains("PORT") {
            return "3000".to_string();
        }

        if key.contains("HOST") {
            return "localhost".to_string();
        }

        if key.contains("DATABASE") || key.contains("DB_") {
            if key.contains("NAME") {
                return "app_database".to_string();
            }
            if key.contains("USER") {
                return "app_user".to_string();
            }
            return "your_database_value_here".to_string();
        }

        "your_value_here".to_string()
    }

    /// Whether a key name looks like it holds sensitive data
    pub fn is_sensitive_key(key: &str) -> bool {
        let upper = key.to_uppercase();
        SENSITIVE_KEY_PATTERNS
            .iter()
            .any(|pattern| upper.contains(pattern))
    }

    fn create_example_from_env(&self, generate_values: bool) -> AppResult<()> {
        let env_vars = parse_env_file(&self.env_path)?;

        let mut content = String::from(
            "# Environment Configuration Example\n# Copy this file to .env and update with your actual values\n\n",
        );
        for (key, value) in &env_vars {
            let example_value = if generate_values {
                Self::generate_example_value(key, value)
            } else {
                String::new()
            };
            content.push_str(&format!("{key}={example_value}\n"));
        }

        std::fs::write(&self.example_path, content)?;
        Ok(())
    }

    /// Group keys by rough purpose for reporting
    fn categorize_keys(keys: &BTreeMap<String, String>) -> BTreeMap<String, Vec<String>> {
        let mut categories: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for key in keys.keys() {
            let category = if Self::is_sensitive_key(key) {
                "sensitive"
            } else if key.starts_with("DB_") || key.contains("DATABASE") {
                "database"
            } else if key.starts_with("MAIL_") || key.contains("SMTP") {
                "mail"
            } else if key.contains("CACHE") || key.contains("REDIS") || key.contains("MEMCACHE") {
                "cache"
            } else if key.starts_with("APP_") {
                "application"
            } else if key.contains("AWS_") || key.contains("STRIPE_") || key.contains("PAYPAL_") {
                "third_party"
            } else {
                "other"
            };

            categories
                .entry(category.to_string())
                .or_default()
                .push(key.clone());
        }

        categories
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// Unique scratch directory per test to keep file assertions isolated
    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join("env-validator-tests")
            .join(format!("{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write(path: &Path, content: &str) {
        fs::write(path, content).unwrap();
    }

    #[test]
    fn compare_reports_missing_extra_and_common() {
        let dir = scratch_dir("compare");
        let env = dir.join(".env");
        let example = dir.join(".env.example");
        write(&env, "APP_NAME=demo\nDB_HOST=localhost\nNEW_KEY=x\n");
        write(&example, "APP_NAME=\nDB_HOST=\nOLD_KEY=\n");

        let service = EnvSyncService::new(&env, &example);
        let comparison = service.compare().unwrap();

        assert_eq!(comparison.missing_in_example.len(), 1);
        assert!(comparison.missing_in_example.contains_key("NEW_KEY"));
        assert_eq!(comparison.extra_in_example.len(), 1);
        assert!(comparison.extra_in_example.contains_key("OLD_KEY"));
        assert_eq!(comparison.common.len(), 2);
        assert_eq!(comparison.env_count, 3);
        assert_eq!(comparison.example_count, 3);
    }

    #[test]
    fn report_flags_out_of_sync_files() {
        let dir = scratch_dir("report");
        let env = dir.join(".env");
        let example = dir.join(".env.example");
        write(&env, "APP_NAME=demo\nDB_PASSWORD=secret\n");
        write(&example, "APP_NAME=\n");

        let service = EnvSyncService::new(&env, &example);
        let report = service.report().unwrap();

        assert_eq!(report.status, SyncStatus::OutOfSync);
        assert!(report.message.contains("1 key(s) missing"));
        assert!(report.missing_by_category.contains_key("sensitive"));
        assert!(!report.suggestions.is_empty());
    }

    #[test]
    fn report_detects_synced_files() {
        let dir = scratch_dir("synced");
        let env = dir.join(".env");
        let example = dir.join(".env.example");
        write(&env, "APP_NAME=demo\n");
        write(&example, "APP_NAME=\n");

        let report = EnvSyncService::new(&env, &example).report().unwrap();
        assert_eq!(report.status, SyncStatus::Synced);
        assert_eq!(report.message, "Files are synchronized");
    }

    #[test]
    fn report_handles_missing_files() {
        let dir = scratch_dir("missing");
        let service = EnvSyncService::new(dir.join(".env"), dir.join(".env.example"));
        let report = service.report().unwrap();
        assert_eq!(report.status, SyncStatus::MissingEnv);
    }

    #[test]
    fn sync_appends_missing_keys_with_placeholders() {
        let dir = scratch_dir("append");
        let env = dir.join(".env");
        let example = dir.join(".env.example");
        write(
            &env,
            "APP_NAME=demo\nAPP_URL=https://demo.test\nJWT_SECRET=abc123\n",
        );
        write(&example, "APP_NAME=\n");

        let service = EnvSyncService::new(&env, &example);
        let outcome = service.sync_to_example(&SyncOptions::default()).unwrap();

        assert_eq!(outcome.added.len(), 2);
        let content = fs::read_to_string(&example).unwrap();
        assert!(content.contains("APP_URL=https://example.com"));
        // Sensitive keys are masked to an empty value.
        assert!(content.contains("JWT_SECRET=\n") || content.ends_with("JWT_SECRET="));
    }

    #[test]
    fn sync_removes_extra_keys_when_asked() {
        let dir = scratch_dir("remove");
        let env = dir.join(".env");
        let example = dir.join(".env.example");
        write(&env, "APP_NAME=demo\n");
        write(&example, "APP_NAME=\nSTALE_KEY=old\n");

        let options = SyncOptions {
            remove_extra: true,
            ..SyncOptions::default()
        };
        let outcome = EnvSyncService::new(&env, &example)
            .sync_to_example(&options)
            .unwrap();

        assert_eq!(outcome.removed, vec!["STALE_KEY".to_string()]);
        let content = fs::read_to_string(&example).unwrap();
        assert!(!content.contains("STALE_KEY"));
        assert!(content.contains("APP_NAME"));
    }

    #[test]
    fn sync_creates_example_when_absent() {
        let dir = scratch_dir("create");
        let env = dir.join(".env");
        let example = dir.join(".env.example");
        write(&env, "APP_ENV=local\nDB_PORT=5432\n");

        let outcome = EnvSyncService::new(&env, &example)
            .sync_to_example(&SyncOptions::default())
            .unwrap();

        assert!(outcome.created_file);
        let content = fs::read_to_string(&example).unwrap();
        assert!(content.starts_with("# Environment Configuration Example"));
        assert!(content.contains("APP_ENV=production"));
        assert!(content.contains("DB_PORT=5432"));
    }

    #[test]
    fn sync_without_env_file_fails() {
        let dir = scratch_dir("noenv");
        let service = EnvSyncService::new(dir.join(".env"), dir.join(".env.example"));
        assert!(service.sync_to_example(&SyncOptions::default()).is_err());
    }

    #[test]
    fn placeholder_generation_heuristics() {
        assert_eq!(EnvSyncService::generate_example_value("DB_PASSWORD", "hunter2"), "");
        assert_eq!(EnvSyncService::generate_example_value("APP_DEBUG", "false"), "true");
        assert_eq!(
            EnvSyncService::generate_example_value("APP_URL", "http://10.0.0.5:8080"),
            "http://example.com"
        );
        assert_eq!(
            EnvSyncService::generate_example_value("ADMIN_MAIL", "ops@corp.io"),
            "user@example.com"
        );
        assert_eq!(EnvSyncService::generate_example_value("WORKERS", "4"), "4");
        assert_eq!(EnvSyncService::generate_example_value("APP_ENV", "local"), "production");
        assert_eq!(EnvSyncService::generate_example_value("REDIS_PORT_MAP", "x"), "3000");
        assert_eq!(EnvSyncService::generate_example_value("DB_HOST", "10.1.2.3"), "localhost");
        assert_eq!(
            EnvSyncService::generate_example_value("DB_NAME", "prod_db"),
            "app_database"
        );
        assert_eq!(EnvSyncService::generate_example_value("MISC", "x"), "your_value_here");
    }

    #[test]
    fn sensitive_key_detection_is_case_insensitive() {
        assert!(EnvSyncService::is_sensitive_key("stripe_secret"));
        assert!(EnvSyncService::is_sensitive_key("MY_API_TOKEN"));
        assert!(!EnvSyncService::is_sensitive_key("APP_NAME"));
    }

    #[test]
    fn suggest_rules_matches_key_shapes() {
        let mut keys = BTreeMap::new();
        keys.insert("ADMIN_EMAIL".to_string(), "a@b.com".to_string());
        keys.insert("APP_URL".to_string(), "https://x.io".to_string());
        keys.insert("APP_DEBUG".to_string(), "true".to_string());
        keys.insert("APP_ENV".to_string(), "local".to_string());
        keys.insert("DB_PORT".to_string(), "5432".to_string());
        keys.insert("APP_NAME".to_string(), "demo".to_string());

        let rules = EnvSyncService::suggest_rules(&keys);
        assert_eq!(rules.len(), 6);

        let port_units = match rules.get("DB_PORT").unwrap() {
            RuleSpec::List(units) => units,
            other => panic!("unexpected spec {other:?}"),
        };
        assert!(port_units.iter().any(|u| u.token_name() == Some("integer")));
    }
}
