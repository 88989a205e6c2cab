use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use csnippet_core::Dialect;
use std::path::PathBuf;

/// Code snippet converter
///
/// Convert snippets between VS Code, Sublime Text, Dreamweaver and Atom formats
#[derive(Parser, Debug)]
#[command(name = "csnippet")]
#[command(about = "Code snippet converter", long_about = None, version)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Use specific config file
    #[arg(long, global = true, value_name = "PATH", conflicts_with = "no_config")]
    pub config: Option<PathBuf>,

    /// Ignore all config files
    #[arg(long, global = true, conflicts_with = "config")]
    pub no_config: bool,

    /// Never prompt; missing arguments are errors
    #[arg(long, global = true)]
    pub non_interactive: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert a snippet file or directory into one or more editor formats
    Convert {
        /// Source format (detected from the input when omitted)
        #[arg(short = 'f', long = "from", value_enum)]
        source: Option<EditorArg>,

        /// Target format(s)
        #[arg(short = 't', long = "to", value_enum)]
        targets: Vec<EditorArg>,

        /// Snippet file, or directory of single-snippet files
        #[arg(short, long, value_name = "PATH")]
        input: Option<PathBuf>,

        /// Output directory, or output file for VS Code / Atom targets
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Replace existing files without asking
        #[arg(long)]
        overwrite: bool,

        /// Preview changes without writing anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Detect the format of a snippet file
    Detect {
        /// Snippet file or directory
        input: PathBuf,
    },

    /// Show active configuration
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EditorArg {
    /// VS Code (.code-snippets)
    #[value(name = "vscode")]
    VsCode,
    /// Sublime Text (.sublime-snippet)
    Sublime,
    /// Dreamweaver (.csn)
    Dreamweaver,
    /// Atom (.cson)
    Atom,
}

impl From<EditorArg> for Dialect {
    fn from(arg: EditorArg) -> Self {
        match arg {
            EditorArg::VsCode => Self::VsCode,
            EditorArg::Sublime => Self::Sublime,
            EditorArg::Dreamweaver => Self::Dreamweaver,
            EditorArg::Atom => Self::Atom,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_convert_with_multiple_targets() {
        let cli = Cli::parse_from([
            "csnippet", "-vv", "convert", "-f", "vscode", "-t", "sublime", "-t", "atom", "-i",
            "in.code-snippets",
        ]);

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Convert {
                source, targets, ..
            } => {
                assert_eq!(source, Some(EditorArg::VsCode));
                assert_eq!(targets, vec![EditorArg::Sublime, EditorArg::Atom]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_editor_arg_maps_to_dialect() {
        assert_eq!(Dialect::from(EditorArg::Dreamweaver), Dialect::Dreamweaver);
        assert_eq!(Dialect::from(EditorArg::VsCode), Dialect::VsCode);
    }
}
