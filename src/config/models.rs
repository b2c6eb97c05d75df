use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub routing: RoutingConfig,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub pages: PagesConfig,
    #[serde(default)]
    pub source: SourceConfig,
}

/// Shared-secret authorization
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Exact value expected in the authorization field
    #[serde(default = "default_credential")]
    pub credential: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            credential: default_credential(),
        }
    }
}

fn default_credential() -> String {
    // "username:password"
    "Basic dXNlcm5hbWU6cGFzc3dvcmQ=".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RoutingConfig {
    #[serde(default = "default_not_found_path")]
    pub not_found_path: String,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            not_found_path: default_not_found_path(),
        }
    }
}

fn default_not_found_path() -> String {
    "/http/vrhvevnd.com".to_string()
}

/// Artificial delays, in milliseconds
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TimingConfig {
    #[serde(default = "default_handler_latency_ms")]
    pub handler_latency_ms: u64,
    #[serde(default = "default_chunk_interval_ms")]
    pub chunk_interval_ms: u64,
}

impl TimingConfig {
    pub fn handler_latency(&self) -> Duration {
        Duration::from_millis(self.handler_latency_ms)
    }

    pub fn chunk_interval(&self) -> Duration {
        Duration::from_millis(self.chunk_interval_ms)
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            handler_latency_ms: default_handler_latency_ms(),
            chunk_interval_ms: default_chunk_interval_ms(),
        }
    }
}

fn default_handler_latency_ms() -> u64 {
    2000
}

fn default_chunk_interval_ms() -> u64 {
    500
}

/// Page names resolved through the byte source
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PagesConfig {
    #[serde(default = "default_authorized_page")]
    pub authorized: String,
    #[serde(default = "default_not_found_page")]
    pub not_found: String,
    #[serde(default = "default_unauthorized_page")]
    pub unauthorized: String,
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            authorized: default_authorized_page(),
            not_found: default_not_found_page(),
            unauthorized: default_unauthorized_page(),
        }
    }
}

fn default_authorized_page() -> String {
    "authorization.html".to_string()
}

fn default_not_found_page() -> String {
    "not_found.html".to_string()
}

fn default_unauthorized_page() -> String {
    "unauthorization.html".to_string()
}

/// Byte source provider type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceProvider {
    #[default]
    Local,
    Memory,
}

/// Byte source configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourceConfig {
    #[serde(default)]
    pub provider: SourceProvider,
    /// Directory holding the pages (local provider only)
    #[serde(default = "default_source_root")]
    pub root: PathBuf,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            provider: SourceProvider::Local,
            root: default_source_root(),
        }
    }
}

fn default_source_root() -> PathBuf {
    PathBuf::from(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.auth.credential, "Basic dXNlcm5hbWU6cGFzc3dvcmQ=");
        assert_eq!(config.routing.not_found_path, "/http/vrhvevnd.com");
        assert_eq!(config.timing.handler_latency(), Duration::from_secs(2));
        assert_eq!(config.timing.chunk_interval(), Duration::from_millis(500));
        assert_eq!(config.source.provider, SourceProvider::Local);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
[timing]
chunk_interval_ms = 10

[source]
provider = "memory"
            "#,
        )
        .unwrap();

        assert_eq!(config.timing.chunk_interval_ms, 10);
        assert_eq!(config.timing.handler_latency_ms, 2000);
        assert_eq!(config.source.provider, SourceProvider::Memory);
        assert_eq!(config.pages.unauthorized, "unauthorization.html");
    }
}
