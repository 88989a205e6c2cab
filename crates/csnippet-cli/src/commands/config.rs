use anyhow::Context;
use csnippet_core::config::ConfigDiscovery;
use csnippet_core::Config as ActiveConfig;

use crate::commands::CommandOptions;

pub struct Config;

impl Config {
    pub fn execute(config: &ActiveConfig, options: &CommandOptions) -> anyhow::Result<()> {
        if options.no_config {
            println!("Config files: ignored (--no-config)");
        } else {
            let files = ConfigDiscovery::discover(options.config_path);
            let sources = [
                ("cli", &files.cli),
                ("local", &files.local),
                ("project", &files.project),
                ("global", &files.global),
            ];

            println!("Config files:");
            for (label, path) in sources {
                match path {
                    Some(path) => println!("  {label:<8} {}", path.display()),
                    None if options.verbose > 0 => println!("  {label:<8} (none)"),
                    None => {}
                }
            }
        }

        let rendered = config.to_toml().context("Failed to render configuration")?;

        println!("\nActive configuration:");
        println!("{rendered}");

        Ok(())
    }
}
