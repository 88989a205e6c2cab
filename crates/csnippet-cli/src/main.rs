mod cli;
mod commands;
mod interactive;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Commands};
use commands::CommandOptions;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Set up Ctrl+C handler for graceful interruption
    ctrlc::set_handler(|| {
        eprintln!("\n\nInterrupted by user (Ctrl+C)");
        std::process::exit(130); // Standard exit code for SIGINT
    })
    .context("Failed to set Ctrl+C handler")?;

    let cli = Cli::parse();

    let options = CommandOptions::new(
        cli.verbose,
        cli.non_interactive,
        cli.config.as_deref(),
        cli.no_config,
    );

    let config = options.load_config()?;
    init_logging(cli.verbose, config.log_level.as_deref());

    match &cli.command {
        Commands::Convert {
            source,
            targets,
            input,
            output,
            overwrite,
            dry_run,
        } => {
            let args = commands::ConvertArgs {
                source: source.map(Into::into),
                targets: targets.iter().copied().map(Into::into).collect(),
                input: input.clone(),
                output: output.clone(),
                overwrite: *overwrite,
                dry_run: *dry_run,
            };
            commands::Convert::execute(args, &config, &options)
                .context("Failed to execute convert command")?;
        }
        Commands::Detect { input } => {
            commands::Detect::execute(input).context("Failed to execute detect command")?;
        }
        Commands::Config => {
            commands::Config::execute(&config, &options)
                .context("Failed to execute config command")?;
        }
    }

    Ok(())
}

/// `RUST_LOG` wins, then `-v`/`-vv`, then the configured level, then `warn`
fn init_logging(verbose: u8, configured: Option<&str>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = match verbose {
            0 => configured.unwrap_or("warn"),
            1 => "debug",
            _ => "trace",
        };
        EnvFilter::new(level.to_ascii_lowercase())
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
