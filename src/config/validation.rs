use super::models::{Config, SourceProvider};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Authorization credential must not be empty")]
    EmptyCredential,

    #[error("Not-found path '{path}' must start with '/'")]
    InvalidNotFoundPath { path: String },

    #[error("Page name must not be empty: pages.{field}")]
    EmptyPageName { field: String },

    #[error("Source root '{root}' is not a directory")]
    MissingSourceRoot { root: String },
}

/// Validate the entire configuration
pub fn validate(config: &Config) -> Result<(), ValidationError> {
    validate_auth(config)?;
    validate_routing(config)?;
    validate_pages(config)?;
    validate_source(config)?;
    Ok(())
}

fn validate_auth(config: &Config) -> Result<(), ValidationError> {
    if config.auth.credential.trim().is_empty() {
        return Err(ValidationError::EmptyCredential);
    }
    Ok(())
}

fn validate_routing(config: &Config) -> Result<(), ValidationError> {
    if !config.routing.not_found_path.starts_with('/') {
        return Err(ValidationError::InvalidNotFoundPath {
            path: config.routing.not_found_path.clone(),
        });
    }
    Ok(())
}

fn validate_pages(config: &Config) -> Result<(), ValidationError> {
    let pages = [
        ("authorized", &config.pages.authorized),
        ("not_found", &config.pages.not_found),
        ("unauthorized", &config.pages.unauthorized),
    ];

    for (field, name) in pages {
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyPageName {
                field: field.to_string(),
            });
        }
    }
    Ok(())
}

/// Local sources need an existing directory; missing pages are fine
fn validate_source(config: &Config) -> Result<(), ValidationError> {
    if config.source.provider == SourceProvider::Local && !config.source.root.is_dir() {
        return Err(ValidationError::MissingSourceRoot {
            root: config.source.root.display().to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_default_config() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_empty_credential() {
        let mut config = Config::default();
        config.auth.credential = "  ".to_string();

        assert!(matches!(validate(&config), Err(ValidationError::EmptyCredential)));
    }

    #[test]
    fn test_relative_not_found_path() {
        let mut config = Config::default();
        config.routing.not_found_path = "http/vrhvevnd.com".to_string();

        assert!(matches!(
            validate(&config),
            Err(ValidationError::InvalidNotFoundPath { .. })
        ));
    }

    #[test]
    fn test_empty_page_name() {
        let mut config = Config::default();
        config.pages.not_found = String::new();

        match validate(&config) {
            Err(ValidationError::EmptyPageName { field }) => assert_eq!(field, "not_found"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_missing_local_root() {
        let mut config = Config::default();
        config.source.root = "/definitely/not/a/dir".into();
        assert!(matches!(
            validate(&config),
            Err(ValidationError::MissingSourceRoot { .. })
        ));

        config.source.provider = SourceProvider::Memory;
        assert!(validate(&config).is_ok());
    }
}
