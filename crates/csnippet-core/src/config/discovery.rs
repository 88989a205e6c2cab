//! Configuration file discovery from multiple locations

use std::path::{Path, PathBuf};

/// Project-local config file, meant to stay out of version control
pub const LOCAL_CONFIG: &str = ".csnippet.local.toml";

/// Project config file
pub const PROJECT_CONFIG: &str = ".csnippet.toml";

/// Configuration file locations in order of precedence
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigFiles {
    /// Config from CLI flag (highest precedence)
    pub cli: Option<PathBuf>,
    /// Project-local config (.csnippet.local.toml)
    pub local: Option<PathBuf>,
    /// Project config (.csnippet.toml)
    pub project: Option<PathBuf>,
    /// Global config directory
    pub global: Option<PathBuf>,
}

/// Config file discovery
pub struct ConfigDiscovery;

impl ConfigDiscovery {
    /// Discover all available configuration files from the working directory
    pub fn discover(cli_path: Option<&Path>) -> ConfigFiles {
        match std::env::current_dir() {
            Ok(dir) => Self::discover_from(cli_path, &dir),
            Err(_) => ConfigFiles {
                cli: Self::existing(cli_path),
                global: Self::find_global_config(),
                ..ConfigFiles::default()
            },
        }
    }

    /// Discover configuration files, searching project files upward from `start`
    pub fn discover_from(cli_path: Option<&Path>, start: &Path) -> ConfigFiles {
        ConfigFiles {
            cli: Self::existing(cli_path),
            local: Self::find_file(start, LOCAL_CONFIG),
            project: Self::find_file(start, PROJECT_CONFIG),
            global: Self::find_global_config(),
        }
    }

    fn existing(path: Option<&Path>) -> Option<PathBuf> {
        path.filter(|p| p.is_file()).map(Path::to_path_buf)
    }

    /// Find a config file in `start` or its parent directories
    fn find_file(start: &Path, name: &str) -> Option<PathBuf> {
        let mut current = start.to_path_buf();

        loop {
            let candidate = current.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Find the global config in the platform config directory
    fn find_global_config() -> Option<PathBuf> {
        let global_config = dirs::config_dir()?.join("csnippet").join("config.toml");
        global_config.is_file().then_some(global_config)
    }
}
