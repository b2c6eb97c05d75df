use std::time::Duration;

use crate::config::Config;

/// Names of the pages looked up in the byte source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageNames {
    pub authorized: String,
    pub not_found: String,
    pub unauthorized: String,
}

/// Handler-facing view of the configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerSettings {
    pub pages: PageNames,
    /// Path that always resolves to 404
    pub not_found_path: String,
    /// Artificial work time of the GET handler
    pub get_latency: Duration,
    /// Delay between consecutive body chunks
    pub chunk_interval: Duration,
}

impl HandlerSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            pages: PageNames {
                authorized: config.pages.authorized.clone(),
                not_found: config.pages.not_found.clone(),
                unauthorized: config.pages.unauthorized.clone(),
            },
            not_found_path: config.routing.not_found_path.clone(),
            get_latency: config.timing.handler_latency(),
            chunk_interval: config.timing.chunk_interval(),
        }
    }
}

impl Default for HandlerSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = HandlerSettings::default();
        assert_eq!(settings.not_found_path, "/http/vrhvevnd.com");
        assert_eq!(settings.get_latency, Duration::from_secs(2));
        assert_eq!(settings.chunk_interval, Duration::from_millis(500));
        assert_eq!(settings.pages.authorized, "authorization.html");
        assert_eq!(settings.pages.not_found, "not_found.html");
        assert_eq!(settings.pages.unauthorized, "unauthorization.html");
    }
}
