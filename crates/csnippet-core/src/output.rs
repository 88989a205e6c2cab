//! Writing converted documents to disk
//!
//! This module handles:
//! - Planning output file names per target dialect
//! - Resolving each planned file into a create, overwrite or skip action
//! - Executing actions, or describing them in dry-run mode
//! - Summarising a conversion run

mod actions;
mod diff;
mod executor;
mod plan;
mod reporting;

use std::collections::HashMap;
use std::path::PathBuf;

pub use actions::{OutputAction, OutputActionResolver};
pub use diff::DiffGenerator;
pub use executor::OutputExecutor;
pub use plan::{COLLECTION_FILE_STEM, plan_outputs};
pub use reporting::ConversionReporter;

use crate::dialect::Dialect;

/// Outcome of one conversion run
#[derive(Debug, Clone, Default)]
pub struct ConversionReport {
    /// Source dialect the input was read as
    pub source: Option<Dialect>,
    /// Number of snippets parsed from the input
    pub snippets_read: usize,
    /// Documents produced per target, in request order
    pub targets: Vec<(Dialect, usize)>,
    /// Output location
    pub output: PathBuf,
    /// Files created
    pub created: usize,
    /// Files overwritten
    pub overwritten: usize,
    /// Files already holding the converted content
    pub unchanged: usize,
    /// Files skipped
    pub skipped: usize,
    /// Skip reasons with counts
    pub skip_reasons: HashMap<String, usize>,
    /// Errors encountered
    pub errors: Vec<String>,
}

impl ConversionReport {
    /// Files written or that would be written
    #[must_use]
    pub const fn total_writes(&self) -> usize {
        self.created + self.overwritten
    }

    /// Whether the run finished without errors
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    pub(crate) fn record_skip(&mut self, reason: &str) {
        self.skipped += 1;
        *self.skip_reasons.entry(reason.to_string()).or_insert(0) += 1;
    }
}
