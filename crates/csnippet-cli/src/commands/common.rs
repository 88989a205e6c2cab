//! Common types and utilities for command execution

use std::io::IsTerminal;
use std::path::Path;

use anyhow::Context;
use csnippet_core::{Config, ConfigManager};

/// Execution options shared by all commands
pub struct CommandOptions<'a> {
    /// Verbosity level from `-v` flags
    pub verbose: u8,
    /// Never prompt
    pub non_interactive: bool,
    /// Path to custom config file
    pub config_path: Option<&'a Path>,
    /// Skip loading all config files
    pub no_config: bool,
}

impl<'a> CommandOptions<'a> {
    /// Create new command options
    #[must_use]
    pub const fn new(
        verbose: u8,
        non_interactive: bool,
        config_path: Option<&'a Path>,
        no_config: bool,
    ) -> Self {
        Self {
            verbose,
            non_interactive,
            config_path,
            no_config,
        }
    }

    /// Load the merged configuration, or defaults with `--no-config`
    pub fn load_config(&self) -> anyhow::Result<Config> {
        if self.no_config {
            return Ok(Config::default());
        }

        ConfigManager::load(self.config_path).context("Failed to load configuration")
    }

    /// Whether prompts may be shown: not disabled and attached to a terminal
    #[must_use]
    pub fn is_interactive(&self, config: &Config) -> bool {
        !self.non_interactive
            && !config.non_interactive
            && std::io::stdin().is_terminal()
            && std::io::stdout().is_terminal()
    }
}
