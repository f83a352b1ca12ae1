use env_validator::application::sync_service::SyncOptions;
use env_validator::shared::LoggingUtils;
use env_validator::{AppConfig, AppError, EnvSyncService, EnvValidator, SyncStatus};
use tracing::{error, info};

fn main() {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(2);
        }
    };

    if let Err(e) = LoggingUtils::initialize(
        &config.logging.level,
        &config.logging.format,
        config.logging.structured,
    ) {
        eprintln!("Failed to initialize logging: {e}");
        std::process::exit(2);
    }

    let args: Vec<String> = std::env::args().skip(1).collect();

    let exit_code = match args.first().map(String::as_str) {
        None | Some("validate") => {
            let keys = args.iter().skip(1).map(String::as_str).collect::<Vec<_>>();
            run_validate(&config, &keys)
        }
        Some("sync") => {
            // Boot-time validation guards every other command when enabled.
            if config.auto_validate {
                let code = run_validate(&config, &[]);
                if code != 0 {
                    std::process::exit(code);
                }
            }
            run_sync(&config, &args[1..])
        }
        Some(other) => {
            error!("Unknown command: {other} (expected 'validate' or 'sync')");
            2
        }
    };

    std::process::exit(exit_code);
}

fn run_validate(config: &AppConfig, keys: &[&str]) -> i32 {
    let validator = match EnvValidator::new().with_config(config) {
        Ok(validator) => validator,
        Err(e) => {
            error!("Invalid configuration: {e}");
            return 2;
        }
    };

    // Explicit CLI keys win over the configured boot scope.
    let scope: Vec<&str> = if keys.is_empty() {
        config.validate_on_boot.iter().map(String::as_str).collect()
    } else {
        keys.to_vec()
    };

    let result = if scope.is_empty() {
        info!("Validating all environment variables...");
        validator.validate()
    } else {
        info!("Validating environment variables: {}", scope.join(", "));
        validator.validate_only(&scope)
    };

    match result {
        Ok(()) => {
            info!("Environment variables are valid.");
            0
        }
        Err(AppError::Environment(e)) => {
            LoggingUtils::log_validation_failure(&e);
            1
        }
        Err(e) => {
            error!("Validation aborted: {e}");
            2
        }
    }
}

fn run_sync(config: &AppConfig, args: &[String]) -> i32 {
    let service = EnvSyncService::new(&config.sync.env_path, &config.sync.example_path);

    if args.iter().any(|a| a == "--check") {
        return match service.report() {
            Ok(report) => {
                info!("Sync status: {:?} - {}", report.status, report.message);
                for (category, keys) in &report.missing_by_category {
                    info!("  missing [{category}]: {}", keys.join(", "));
                }
                if !report.extra_in_example.is_empty() {
                    info!("  extra in example: {}", report.extra_in_example.join(", "));
                }
                for suggestion in &report.suggestions {
                    info!("  suggestion: {suggestion}");
                }
                if report.status == SyncStatus::Synced {
                    0
                } else {
                    1
                }
            }
            Err(e) => {
                error!("Sync check failed: {e}");
                2
            }
        };
    }

    let options = SyncOptions {
        add_missing: true,
        remove_extra: args.iter().any(|a| a == "--remove-extra"),
        generate_values: !args.iter().any(|a| a == "--no-values"),
    };

    match service.sync_to_example(&options) {
        Ok(outcome) => {
            if outcome.created_file {
                info!("Created {} from {}", config.sync.example_path, config.sync.env_path);
            } else {
                info!(
                    "Synchronized {} (added: {}, removed: {})",
                    config.sync.example_path,
                    outcome.added.len(),
                    outcome.removed.len()
                );
            }
            0
        }
        Err(e) => {
            error!("Sync failed: {e}");
            1
        }
    }
}
