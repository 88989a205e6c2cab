//! # csnippet-core
//!
//! Core library for converting code snippets between editor formats.
//!
//! Snippets written for VS Code (`.code-snippets`), Sublime Text
//! (`.sublime-snippet`), Dreamweaver (`.csn`) and Atom (`.cson`) are parsed
//! into one neutral [`Snippet`] model and rendered back out in any other of
//! those formats. Formats that hold one snippet per file travel as a
//! [`DocumentBatch`], which can be joined into a single text blob with
//! [`DIVIDER`] lines or written out as separate files.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Configuration file parsing and management
pub mod config;

/// Format-agnostic conversion facade
pub mod converter;

/// Supported editor dialects
pub mod dialect;

/// Core error types for the csnippet library
pub mod error;

/// File-system helpers for reading and writing snippet files
pub mod files;

/// Per-dialect codecs and the format registry
pub mod formats;

/// Text helpers shared by the codecs: document dividers, escaping, HTML layout
pub mod markup;

/// Output planning, conflict resolution and reporting
pub mod output;

/// End-to-end conversion from an input path to written files
pub mod pipeline;

/// Source dialect detection
pub mod sniffer;

/// Neutral snippet model
pub mod snippet;

pub use config::{Config, ConfigManager};
pub use converter::Converter;
pub use dialect::Dialect;
pub use error::{Result, SnippetError};
pub use files::{OutputFile, SnippetFiles, SnippetInput, WriteOutcome};
pub use formats::{Detection, Registry};
pub use markup::{DIVIDER, Document, DocumentBatch};
pub use output::{ConversionReport, ConversionReporter, DiffGenerator, OutputAction};
pub use pipeline::{ApprovalCallback, ConversionPipeline, ConversionRequest};
pub use snippet::Snippet;
