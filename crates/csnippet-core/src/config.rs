//! Configuration file parsing and merging
//!
//! This module handles:
//! - Config file discovery from multiple locations
//! - TOML parsing with serde
//! - Config merging with precedence rules
//! - Validation and error reporting

mod discovery;
mod merge;
mod types;
mod validation;


use std::path::Path;

pub use discovery::{ConfigDiscovery, ConfigFiles};
pub use merge::ConfigMerger;
pub use types::{Config, LOG_LEVELS};
pub use validation::ConfigValidator;

use crate::error::{Result, SnippetError};

/// Configuration manager that coordinates discovery, parsing, merging, and validation
pub struct ConfigManager;

impl ConfigManager {
    /// Load and merge configuration from all sources
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit config path does not exist, or if a
    /// config file is invalid or cannot be read.
    pub fn load(cli_config_path: Option<&Path>) -> Result<Config> {
        if let Some(path) = cli_config_path {
            if !path.is_file() {
                return Err(SnippetError::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
        }

        let config_files = ConfigDiscovery::discover(cli_config_path);
        tracing::debug!(?config_files, "discovered config files");

        let merged = ConfigMerger::merge(&config_files)?;
        ConfigValidator::validate(&merged)?;

        Ok(merged)
    }
}
