//! Configuration validation and error reporting

use super::types::{Config, LOG_LEVELS};
use crate::error::{Result, SnippetError};

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(level) = &config.log_level {
            if !LOG_LEVELS.contains(&level.trim().to_ascii_lowercase().as_str()) {
                return Err(SnippetError::Config(format!(
                    "Invalid log_level `{level}` (expected one of: {})",
                    LOG_LEVELS.join(", ")
                )));
            }
        }

        if let Some(output) = &config.output {
            if output.to_string_lossy().trim().is_empty() {
                return Err(SnippetError::Config("Output path cannot be empty".to_string()));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_validate_empty_config() {
        assert!(ConfigValidator::validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_log_level() {
        let mut config = Config {
            log_level: Some("DEBUG".to_string()),
            ..Config::default()
        };
        assert!(ConfigValidator::validate(&config).is_ok());

        config.log_level = Some("loud".to_string());
        let err = ConfigValidator::validate(&config).unwrap_err();
        assert!(err.to_string().contains("Invalid log_level `loud`"));
    }

    #[test]
    fn test_validate_blank_output() {
        let config = Config {
            output: Some(PathBuf::from("  ")),
            ..Config::default()
        };

        let err = ConfigValidator::validate(&config).unwrap_err();
        assert!(err.to_string().contains("cannot be empty"));
    }
}
