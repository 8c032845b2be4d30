//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `MEMBERSHIP_JOB` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use membership_status_job::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Excluding by default: {:?}", config.job.excluded_status_names());
//! ```

mod database;
mod error;
mod job;
mod logging;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use job::JobConfig;
pub use logging::LoggingConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Database configuration (PostgreSQL connection)
    pub database: DatabaseConfig,

    /// Recalculation defaults
    #[serde(default)]
    pub job: JobConfig,

    /// Log level and format
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `MEMBERSHIP_JOB` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `MEMBERSHIP_JOB__DATABASE__URL=...` -> `database.url = ...`
    /// - `MEMBERSHIP_JOB__JOB__EXCLUDE_MEMBERSHIP_STATUS_IDS=5,6` -> `job.exclude_membership_status_ids`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Required environment variables are missing
    /// - Values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("MEMBERSHIP_JOB")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.database.validate()?;
        self.job.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::MembershipStatusId;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn set_minimal_env() {
        env::set_var("MEMBERSHIP_JOB__DATABASE__URL", "postgresql://test@localhost/test");
    }

    fn clear_env() {
        env::remove_var("MEMBERSHIP_JOB__DATABASE__URL");
        env::remove_var("MEMBERSHIP_JOB__DATABASE__RUN_MIGRATIONS");
        env::remove_var("MEMBERSHIP_JOB__JOB__EXCLUDE_TEST_MEMBERSHIPS");
        env::remove_var("MEMBERSHIP_JOB__JOB__EXCLUDE_MEMBERSHIP_STATUS_IDS");
        env::remove_var("MEMBERSHIP_JOB__LOGGING__JSON");
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.database.connection_url(), "postgresql://test@localhost/test");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_section_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.job.exclude_test_memberships);
        assert!(config.job.only_active_membership_types);
        assert_eq!(
            config.job.excluded_status_names(),
            vec!["Pending", "Cancelled", "Expired"]
        );
        assert_eq!(config.logging.level, "info");
        assert!(!config.database.run_migrations);
    }

    #[test]
    fn test_job_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("MEMBERSHIP_JOB__JOB__EXCLUDE_TEST_MEMBERSHIPS", "false");
        env::set_var("MEMBERSHIP_JOB__JOB__EXCLUDE_MEMBERSHIP_STATUS_IDS", "5,6");
        env::set_var("MEMBERSHIP_JOB__LOGGING__JSON", "true");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(!config.job.exclude_test_memberships);
        assert!(config.logging.json);
        assert_eq!(
            config.job.request().unwrap().exclude_membership_status_ids,
            Some(vec![MembershipStatusId::from_raw(5), MembershipStatusId::from_raw(6)])
        );
    }

    #[test]
    fn test_missing_database_url_fails() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        assert!(AppConfig::load().is_err());
    }
}
