use std::path::PathBuf;

use anyhow::{Context, bail};
use csnippet_core::{
    Config, ConversionPipeline, ConversionReporter, ConversionRequest, Dialect, OutputAction,
    SnippetError,
};

use crate::commands::CommandOptions;
use crate::interactive::{ConversionWizard, InteractivePrompter};

/// Convert arguments as given on the command line
#[derive(Debug, Clone, Default)]
pub struct ConvertArgs {
    pub source: Option<Dialect>,
    pub targets: Vec<Dialect>,
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub overwrite: bool,
    pub dry_run: bool,
}

pub struct Convert;

impl Convert {
    pub fn execute(
        args: ConvertArgs,
        config: &Config,
        options: &CommandOptions,
    ) -> anyhow::Result<()> {
        let interactive = options.is_interactive(config);
        let request = Self::build_request(args, config, interactive)?;
        tracing::debug!(?request, "conversion request");

        let pipeline = ConversionPipeline::new();

        // Existing files only need approval when they would actually be replaced
        let result = if interactive && !request.overwrite && !request.dry_run {
            let mut prompter = InteractivePrompter::new();
            pipeline.run_with_approver(
                &request,
                Some(Box::new(move |action: &OutputAction| {
                    prompter.prompt(action).map_err(|e| {
                        tracing::debug!("approval stopped: {e:#}");
                        SnippetError::Aborted
                    })
                })),
            )
        } else {
            pipeline.run(&request)
        };

        let report = match result {
            Ok(report) => report,
            Err(SnippetError::Aborted) => {
                eprintln!("\nConversion cancelled by user.");
                std::process::exit(0); // Clean exit, not an error
            }
            Err(e) => return Err(e).context("Conversion failed"),
        };

        let summary = ConversionReporter::generate_summary(&report);
        println!("{summary}");

        if !report.is_success() {
            bail!("Conversion completed with {} error(s)", report.errors.len());
        }

        Ok(())
    }

    /// CLI flags override config values; anything still missing is prompted for
    fn build_request(
        args: ConvertArgs,
        config: &Config,
        interactive: bool,
    ) -> anyhow::Result<ConversionRequest> {
        let input = match args.input {
            Some(input) => input,
            None if interactive => ConversionWizard::input_path()?,
            None => bail!("No input given (use --input)"),
        };

        let mut source = args.source.or(config.source);
        if source.is_none() && interactive {
            source = ConversionWizard::select_source()?;
        }

        let mut targets = if args.targets.is_empty() {
            config.targets.clone()
        } else {
            args.targets
        };
        if targets.is_empty() {
            if !interactive {
                bail!("No target given (use --to)");
            }
            targets = ConversionWizard::select_targets(source)?;
        }

        let output = match args.output.or_else(|| config.output.clone()) {
            Some(output) => output,
            None if interactive => ConversionWizard::output_path()?,
            None => PathBuf::from("."),
        };

        Ok(ConversionRequest {
            input,
            output,
            source,
            targets,
            overwrite: args.overwrite || config.overwrite,
            dry_run: args.dry_run || config.dry_run,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_flags_override_config() {
        let config = Config {
            source: Some(Dialect::Atom),
            targets: vec![Dialect::Sublime],
            output: Some(PathBuf::from("from-config")),
            ..Config::default()
        };
        let args = ConvertArgs {
            source: Some(Dialect::VsCode),
            targets: vec![Dialect::Dreamweaver],
            input: Some(PathBuf::from("in.code-snippets")),
            output: Some(PathBuf::from("from-cli")),
            ..ConvertArgs::default()
        };

        let request = Convert::build_request(args, &config, false).unwrap();

        assert_eq!(request.source, Some(Dialect::VsCode));
        assert_eq!(request.targets, vec![Dialect::Dreamweaver]);
        assert_eq!(request.output, PathBuf::from("from-cli"));
    }

    #[test]
    fn test_config_fills_missing_flags() {
        let config = Config {
            targets: vec![Dialect::Sublime, Dialect::Atom],
            overwrite: true,
            ..Config::default()
        };
        let args = ConvertArgs {
            input: Some(PathBuf::from("snippets")),
            ..ConvertArgs::default()
        };

        let request = Convert::build_request(args, &config, false).unwrap();

        assert_eq!(request.source, None);
        assert_eq!(request.targets, vec![Dialect::Sublime, Dialect::Atom]);
        assert_eq!(request.output, PathBuf::from("."));
        assert!(request.overwrite);
        assert!(!request.dry_run);
    }

    #[test]
    fn test_missing_arguments_fail_without_prompts() {
        let err = Convert::build_request(ConvertArgs::default(), &Config::default(), false)
            .unwrap_err();
        assert!(err.to_string().contains("No input given"));

        let args = ConvertArgs {
            input: Some(PathBuf::from("in.csn")),
            ..ConvertArgs::default()
        };
        let err = Convert::build_request(args, &Config::default(), false).unwrap_err();
        assert!(err.to_string().contains("No target given"));
    }
}
