//! Configuration management for pipebox
//!
//! This module provides a layered configuration system that loads settings from:
//! 1. Default values (embedded in structs)
//! 2. TOML configuration file
//! 3. Environment variables (highest priority)
//!
//! # Usage
//!
//! ```no_run
//! use pipebox::config::Config;
//!
//! let config = Config::load().expect("Failed to load configuration");
//! println!("Not-found path: {}", config.routing.not_found_path);
//! ```
//!
//! # Environment Variables
//!
//! Configuration can be overridden using environment variables with the pattern:
//! `PIPEBOX__<section>__<key>`
//!
//! Examples:
//! - `PIPEBOX__TIMING__HANDLER_LATENCY_MS=0`
//! - `PIPEBOX__SOURCE__ROOT=/srv/pages`
//! - `PIPEBOX_CREDENTIAL="Basic ..."` (secret, never needs to live in TOML)
//!
//! # Configuration File
//!
//! By default, the configuration is loaded from `config/pipebox.toml`.
//! This can be overridden using the `PIPEBOX_CONFIG` environment variable.

mod models;
mod sources;
mod validation;

pub use models::{
    AuthConfig, Config, PagesConfig, RoutingConfig, SourceConfig, SourceProvider, TimingConfig,
};
pub use validation::ValidationError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] ValidationError),
}

impl Config {
    /// Load configuration from all sources (file + environment)
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables (`PIPEBOX__*`, `PIPEBOX_CREDENTIAL`)
    /// 2. TOML file (default: `config/pipebox.toml`)
    /// 3. Default values
    ///
    /// # Errors
    ///
    /// Returns an error if the file is malformed or validation fails.
    pub fn load() -> Result<Self, ConfigError> {
        let config = sources::load()?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific path
    ///
    /// Useful for testing with custom configuration files.
    pub fn load_from_path(path: std::path::PathBuf) -> Result<Self, ConfigError> {
        let config = sources::load_from_path(path)?;
        validation::validate(&config)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_full_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let toml_content = format!(
            r#"
[auth]
credential = "Basic dXNlcm5hbWU6cGFzc3dvcmQ="

[routing]
not_found_path = "/http/vrhvevnd.com"

[timing]
handler_latency_ms = 2000
chunk_interval_ms = 500

[pages]
authorized = "authorization.html"
not_found = "not_found.html"
unauthorized = "unauthorization.html"

[source]
provider = "local"
root = "{}"
            "#,
            temp_dir.path().display()
        );

        fs::write(&config_path, toml_content).unwrap();

        let config = Config::load_from_path(config_path).unwrap();
        assert_eq!(config.source.provider, SourceProvider::Local);
        assert_eq!(config.source.root, temp_dir.path());
        assert_eq!(config.timing.chunk_interval_ms, 500);
    }

    #[test]
    fn test_validation_catches_bad_path() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let toml_content = r#"
[routing]
not_found_path = "nope"
        "#;

        fs::write(&config_path, toml_content).unwrap();

        let result = Config::load_from_path(config_path);
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::ValidationError(ValidationError::InvalidNotFoundPath { .. })
        ));
    }
}
