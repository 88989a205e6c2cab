//! Configuration merging with precedence rules
//!
//! # Merging Semantics
//!
//! - **Scalars** (source, output, log_level): the highest-precedence file that sets one wins
//! - **Targets**: additive, duplicates removed, first-seen order kept
//! - **Booleans**: OR semantics - if any config sets to `true`, result is `true`

use std::path::Path;

use super::discovery::ConfigFiles;
use super::types::Config;
use crate::error::{Result, SnippetError};
use crate::files::SnippetFiles;

/// Configuration merger
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge multiple config files with precedence rules
    ///
    /// Precedence order (highest to lowest):
    /// 1. CLI config
    /// 2. .csnippet.local.toml
    /// 3. .csnippet.toml
    /// 4. Global config
    ///
    /// # Errors
    ///
    /// Returns an error if config files cannot be read or parsed.
    pub fn merge(files: &ConfigFiles) -> Result<Config> {
        let mut merged = Config::default();

        // Lowest precedence first
        for path in [&files.global, &files.project, &files.local, &files.cli]
            .into_iter()
            .flatten()
        {
            Self::merge_into(&mut merged, path)?;
        }

        Ok(merged)
    }

    /// Load and merge a single config file into the existing config
    fn merge_into(base: &mut Config, path: &Path) -> Result<()> {
        let content = SnippetFiles::new().read_text_file(path)?;
        let config: Config = toml::from_str(&content).map_err(|source| SnippetError::ConfigFile {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "merging config file");

        if config.source.is_some() {
            base.source = config.source;
        }
        if config.output.is_some() {
            base.output = config.output;
        }
        if config.log_level.is_some() {
            base.log_level = config.log_level;
        }

        for target in config.targets {
            if !base.targets.contains(&target) {
                base.targets.push(target);
            }
        }

        base.overwrite |= config.overwrite;
        base.dry_run |= config.dry_run;
        base.non_interactive |= config.non_interactive;

        Ok(())
    }
}
