//! Error types for snippet detection, parsing and conversion

use std::path::PathBuf;

use thiserror::Error;

use crate::dialect::Dialect;

/// Result type alias using [`SnippetError`]
pub type Result<T> = std::result::Result<T, SnippetError>;

/// Boxed cause carried by parse and serialization failures
pub type Cause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Everything that can go wrong inside the conversion core
#[derive(Debug, Error)]
pub enum SnippetError {
    /// No dialect recognised the input
    #[error("Snippets not valid: no supported format recognised the input")]
    NotValid,

    /// The input is not a well-formed document of the given dialect
    #[error("Failed to parse {dialect} snippet: {source}")]
    Parse {
        /// Dialect the input was parsed as
        dialect: Dialect,
        /// Underlying cause
        #[source]
        source: Cause,
    },

    /// Building the output document failed
    #[error("Failed to stringify {dialect} snippet: {source}")]
    Serialize {
        /// Dialect being written
        dialect: Dialect,
        /// Underlying cause
        #[source]
        source: Cause,
    },

    /// `parse` was called without a declared or sniffed source
    #[error("No source found")]
    NoSource,

    /// `convert` was called without a target
    #[error("No target found")]
    NoTarget,

    /// The dialect tag is not present in the parser registry
    #[error("No parser found for `{0}`")]
    NoParser(String),

    /// A document contains the divider token and cannot be framed
    #[error("Snippet `{name}` contains the reserved divider token `{token}`")]
    DividerCollision {
        /// Name of the offending document
        name: String,
        /// The divider token
        token: &'static str,
    },

    /// File collaborator failure
    #[error("I/O error on {path}: {source}")]
    Io {
        /// Path being accessed
        path: PathBuf,
        /// Underlying cause
        #[source]
        source: std::io::Error,
    },

    /// A configuration file is not valid TOML for the expected keys
    #[error("Failed to parse config file {path}: {source}")]
    ConfigFile {
        /// Config file path
        path: PathBuf,
        /// Underlying cause
        #[source]
        source: toml::de::Error,
    },

    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// The approval callback asked to stop the run
    #[error("Conversion aborted by user")]
    Aborted,
}

impl SnippetError {
    /// Wrap any error as a parse failure of `dialect`
    pub fn parse(dialect: Dialect, source: impl Into<Cause>) -> Self {
        Self::Parse {
            dialect,
            source: source.into(),
        }
    }

    /// Wrap any error as a serialization failure of `dialect`
    pub fn serialize(dialect: Dialect, source: impl Into<Cause>) -> Self {
        Self::Serialize {
            dialect,
            source: source.into(),
        }
    }

    /// Wrap an I/O error with the path that caused it
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
