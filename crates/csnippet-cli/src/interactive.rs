//! Interactive prompting for conversions

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use csnippet_core::{Dialect, DiffGenerator, OutputAction};
use dialoguer::console::Term;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, MultiSelect, Select};

/// User's choice for an existing file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserChoice {
    /// Replace this file
    Yes,
    /// Keep this file
    No,
    /// Replace this and all remaining files
    All,
    /// Keep this and all remaining files
    None,
    /// Show diff and re-prompt
    Diff,
    /// Quit immediately
    Quit,
}

/// Session state tracking for "all" or "none" choices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionDecision {
    AskEach,
    ApproveAll,
    SkipAll,
}

/// Asks before existing files are replaced
pub struct InteractivePrompter {
    session_state: SessionDecision,
}

impl InteractivePrompter {
    /// Create a new interactive prompter
    #[must_use]
    pub const fn new() -> Self {
        Self {
            session_state: SessionDecision::AskEach,
        }
    }

    /// Prompt user for approval of an output action
    ///
    /// Returns true to replace the file, false to keep it.
    ///
    /// # Errors
    ///
    /// Returns an error if the user quits or terminal interaction fails.
    pub fn prompt(&mut self, action: &OutputAction) -> Result<bool> {
        match self.session_state {
            SessionDecision::ApproveAll => return Ok(true),
            SessionDecision::SkipAll => return Ok(false),
            SessionDecision::AskEach => {}
        }

        println!("\n{}", Self::describe_action(action));

        loop {
            match Self::show_prompt()? {
                UserChoice::Yes => return Ok(true),
                UserChoice::No => return Ok(false),
                UserChoice::All => {
                    self.session_state = SessionDecision::ApproveAll;
                    return Ok(true);
                }
                UserChoice::None => {
                    self.session_state = SessionDecision::SkipAll;
                    return Ok(false);
                }
                UserChoice::Diff => Self::show_diff(action),
                UserChoice::Quit => bail!("User aborted conversion"),
            }
        }
    }

    fn show_prompt() -> Result<UserChoice> {
        let term = Term::stderr();

        print!("Replace? [y/n/a/s/d/q] (yes/no/all/skip-all/diff/quit): ");
        std::io::Write::flush(&mut std::io::stdout()).context("Failed to flush stdout")?;

        loop {
            let key = term.read_char().context("Failed to read user input")?;
            println!("{key}");

            if let Some(choice) = Self::parse_key(key) {
                return Ok(choice);
            }

            if key == '\n' || key == '\r' {
                println!("(defaulted to 'no')");
                return Ok(UserChoice::No);
            }

            println!("Invalid key. Press y/n/a/s/d/q");
            print!("Replace? [y/n/a/s/d/q]: ");
            std::io::Write::flush(&mut std::io::stdout()).context("Failed to flush stdout")?;
        }
    }

    const fn parse_key(key: char) -> Option<UserChoice> {
        match key {
            'y' | 'Y' => Some(UserChoice::Yes),
            'n' | 'N' => Some(UserChoice::No),
            'a' | 'A' => Some(UserChoice::All),
            's' | 'S' => Some(UserChoice::None),
            'd' | 'D' => Some(UserChoice::Diff),
            'q' | 'Q' => Some(UserChoice::Quit),
            _ => None,
        }
    }

    fn describe_action(action: &OutputAction) -> String {
        match action {
            OutputAction::Create { file } => format!("📄 Create new file:\n  {}", file.path.display()),
            OutputAction::Overwrite { file, .. } => {
                format!("✏️  Overwrite file:\n  {}", file.path.display())
            }
            OutputAction::Conflict { file, .. } => {
                format!(
                    "⚠️  File exists with different content:\n  {}",
                    file.path.display()
                )
            }
            OutputAction::Skip { file, reason } => {
                format!("⊘ Skip file ({reason}):\n  → {}", file.path.display())
            }
        }
    }

    fn show_diff(action: &OutputAction) {
        match action {
            OutputAction::Create { file } => {
                println!("\n--- New file ---");
                println!("+++ {}", file.path.display());
                println!();
                for line in file.content.lines() {
                    println!("\x1b[32m+{line}\x1b[0m");
                }
            }
            OutputAction::Overwrite { file, existing } | OutputAction::Conflict { file, existing } => {
                println!(
                    "\n{}",
                    DiffGenerator::generate_from_content(&file.content, existing, &file.path)
                );
            }
            OutputAction::Skip { .. } => {
                println!("\n--- No diff (file will be skipped) ---");
            }
        }
    }
}

impl Default for InteractivePrompter {
    fn default() -> Self {
        Self::new()
    }
}

/// Prompts for convert arguments missing from the command line and config
pub struct ConversionWizard;

impl ConversionWizard {
    /// Ask for the input path
    pub fn input_path() -> Result<PathBuf> {
        let path: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Snippet file or directory to convert")
            .interact_text()
            .context("Failed to read input path")?;
        Ok(PathBuf::from(path.trim()))
    }

    /// Ask for the output path, defaulting to the working directory
    pub fn output_path() -> Result<PathBuf> {
        let path: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Output directory")
            .default(".".to_string())
            .interact_text()
            .context("Failed to read output path")?;
        Ok(PathBuf::from(path.trim()))
    }

    /// Ask for the source format; `None` means detect it from the input
    pub fn select_source() -> Result<Option<Dialect>> {
        let mut items = vec!["Detect automatically".to_string()];
        items.extend(Dialect::ALL.iter().map(|d| Self::label(*d)));

        let index = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Source format")
            .items(&items)
            .default(0)
            .interact()
            .context("Failed to read source format")?;

        Ok(index.checked_sub(1).and_then(|i| Dialect::ALL.get(i).copied()))
    }

    /// Ask for one or more target formats, leaving out the source format
    pub fn select_targets(source: Option<Dialect>) -> Result<Vec<Dialect>> {
        let choices: Vec<Dialect> = Dialect::ALL
            .into_iter()
            .filter(|d| Some(*d) != source)
            .collect();
        let items: Vec<String> = choices.iter().map(|d| Self::label(*d)).collect();

        loop {
            let picked = MultiSelect::with_theme(&ColorfulTheme::default())
                .with_prompt("Target format(s) (space to toggle, enter to confirm)")
                .items(&items)
                .interact()
                .context("Failed to read target formats")?;

            if !picked.is_empty() {
                return Ok(picked.into_iter().filter_map(|i| choices.get(i).copied()).collect());
            }
            eprintln!("Pick at least one target format.");
        }
    }

    fn label(dialect: Dialect) -> String {
        format!("{} ({})", dialect.display_name(), dialect.file_extension())
    }
}
