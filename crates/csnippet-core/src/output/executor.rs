//! Output action executor

use super::ConversionReport;
use super::actions::OutputAction;
use super::diff::DiffGenerator;
use crate::error::Result;
use crate::files::{SnippetFiles, WriteOutcome};

/// Executes output actions, or describes them in dry-run mode
pub struct OutputExecutor {
    dry_run: bool,
    files: SnippetFiles,
}

impl OutputExecutor {
    /// Create a new executor
    #[must_use]
    pub const fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            files: SnippetFiles::new(),
        }
    }

    /// Execute an output action
    ///
    /// A [`OutputAction::Conflict`] that reaches the executor is skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn execute(&self, action: &OutputAction, report: &mut ConversionReport) -> Result<()> {
        match action {
            OutputAction::Create { file } => {
                if self.dry_run {
                    eprintln!("[DRY RUN] Would create: {}", file.path.display());
                    report.created += 1;
                } else {
                    let outcome = self.files.write_text_file(&file.path, &file.content, false)?;
                    Self::record(outcome, report);
                }
            }
            OutputAction::Overwrite { file, existing } => {
                if self.dry_run {
                    eprintln!("[DRY RUN] Would overwrite: {}", file.path.display());
                    eprint!(
                        "{}",
                        DiffGenerator::generate_from_content(&file.content, existing, &file.path)
                    );
                    report.overwritten += 1;
                } else {
                    let outcome = self.files.write_text_file(&file.path, &file.content, true)?;
                    Self::record(outcome, report);
                }
            }
            OutputAction::Conflict { file, .. } => {
                if self.dry_run {
                    eprintln!(
                        "[DRY RUN] Would skip existing file: {} (use --overwrite to replace)",
                        file.path.display()
                    );
                }
                report.record_skip("exists");
            }
            OutputAction::Skip { file, reason } => {
                if self.dry_run {
                    eprintln!("[DRY RUN] Would skip: {} ({reason})", file.path.display());
                }
                if reason == "identical content" {
                    report.unchanged += 1;
                } else {
                    report.record_skip(reason);
                }
            }
        }
        Ok(())
    }

    fn record(outcome: WriteOutcome, report: &mut ConversionReport) {
        match outcome {
            WriteOutcome::Created => report.created += 1,
            WriteOutcome::Overwritten => report.overwritten += 1,
            WriteOutcome::Unchanged => report.unchanged += 1,
            WriteOutcome::SkippedExisting => report.record_skip("exists"),
        }
    }
}
