//! Output action determination logic

use std::fs;

use crate::files::OutputFile;

/// Action to perform for one planned output file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputAction {
    /// Write a file that does not exist yet
    Create {
        /// File to write
        file: OutputFile,
    },
    /// Replace an existing file with different content
    Overwrite {
        /// File to write
        file: OutputFile,
        /// Current content on disk
        existing: String,
    },
    /// Existing file with different content while overwriting is off
    Conflict {
        /// File that would be written
        file: OutputFile,
        /// Current content on disk
        existing: String,
    },
    /// Nothing to do
    Skip {
        /// File left alone
        file: OutputFile,
        /// Reason for skipping
        reason: String,
    },
}

impl OutputAction {
    /// Planned file this action is about
    #[must_use]
    pub const fn file(&self) -> &OutputFile {
        match self {
            Self::Create { file }
            | Self::Overwrite { file, .. }
            | Self::Conflict { file, .. }
            | Self::Skip { file, .. } => file,
        }
    }

    /// Turn an approved conflict into an overwrite
    #[must_use]
    pub fn into_overwrite(self) -> Self {
        match self {
            Self::Conflict { file, existing } => Self::Overwrite { file, existing },
            other => other,
        }
    }
}

/// Resolves planned files into output actions
pub struct OutputActionResolver;

impl OutputActionResolver {
    /// Compare a planned file with what is on disk
    #[must_use]
    pub fn resolve(file: OutputFile, overwrite: bool) -> OutputAction {
        if !file.path.exists() {
            return OutputAction::Create { file };
        }

        match fs::read_to_string(&file.path) {
            Ok(existing) if existing == file.content => OutputAction::Skip {
                file,
                reason: "identical content".to_string(),
            },
            Ok(existing) if overwrite => OutputAction::Overwrite { file, existing },
            Ok(existing) => OutputAction::Conflict { file, existing },
            Err(_) if overwrite => OutputAction::Overwrite {
                file,
                existing: String::new(),
            },
            Err(_) => OutputAction::Conflict {
                file,
                existing: String::new(),
            },
        }
    }
}
