//! Configuration types and structures

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::dialect::Dialect;

/// Accepted `log_level` values
pub const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Source dialect; sniffed from the input when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Dialect>,

    /// Target dialects
    #[serde(default)]
    pub targets: Vec<Dialect>,

    /// Output directory or file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,

    /// Replace existing files
    #[serde(default)]
    pub overwrite: bool,

    /// Dry run mode (don't write anything)
    #[serde(default)]
    pub dry_run: bool,

    /// Non-interactive mode (no prompts)
    #[serde(default)]
    pub non_interactive: bool,

    /// Log level used when neither `RUST_LOG` nor `-v` is given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

impl Config {
    /// Render as TOML
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
