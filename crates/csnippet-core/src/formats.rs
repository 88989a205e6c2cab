//! Dialect codecs and the registry the converter dispatches through
//!
//! Each dialect module exposes the same three operations:
//! - `detect`: cheap speculative check, never fails
//! - `parse`: native text into [`Snippet`]s
//! - `stringify`: [`Snippet`]s back into native text
//!
//! The [`Registry`] is a fixed table of those function sets keyed by
//! [`Dialect`], so dispatch needs neither trait objects nor reflection.

pub mod atom;
mod cson;
pub mod dreamweaver;
pub mod sublime;
pub mod vscode;
mod xml;

use std::collections::{HashMap, HashSet};

use crate::dialect::Dialect;
use crate::error::{Result, SnippetError};
use crate::markup::Document;
use crate::snippet::Snippet;

/// Outcome of probing a text against one dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detection {
    /// Well-formed and every snippet has a prefix and a body
    Match,
    /// Not a document of this dialect's family at all
    NoMatch,
    /// Right family (parses as JSON/XML/CSON) but not a usable snippet document
    Malformed,
}

impl Detection {
    /// Whether this outcome selects the dialect
    #[must_use]
    pub const fn is_match(self) -> bool {
        matches!(self, Self::Match)
    }
}

/// Parse and stringify functions of one dialect
#[derive(Debug, Clone, Copy)]
pub enum Codec {
    /// One document holds many snippets
    Collection {
        /// Parse a whole document
        parse: fn(&str) -> Result<Vec<Snippet>>,
        /// Serialize the whole collection into one document
        stringify: fn(&[Snippet]) -> Result<String>,
    },
    /// One document per snippet
    PerSnippet {
        /// Parse one document, with an optional out-of-band name
        parse: fn(&str, Option<&str>) -> Result<Snippet>,
        /// Serialize one snippet into a named document
        stringify: fn(&Snippet) -> Result<Document>,
    },
}

/// Registry entry for one dialect
#[derive(Debug, Clone, Copy)]
pub struct FormatEntry {
    /// Dialect served by this entry
    pub dialect: Dialect,
    /// Detection check
    pub detect: fn(&str) -> Detection,
    /// Parse and stringify functions
    pub codec: Codec,
}

impl FormatEntry {
    /// Entry for `dialect`
    #[must_use]
    pub fn for_dialect(dialect: Dialect) -> Self {
        match dialect {
            Dialect::VsCode => Self {
                dialect,
                detect: vscode::detect,
                codec: Codec::Collection {
                    parse: vscode::parse,
                    stringify: vscode::stringify,
                },
            },
            Dialect::Sublime => Self {
                dialect,
                detect: sublime::detect,
                codec: Codec::PerSnippet {
                    parse: sublime::parse,
                    stringify: sublime::to_document,
                },
            },
            Dialect::Dreamweaver => Self {
                dialect,
                detect: dreamweaver::detect,
                codec: Codec::PerSnippet {
                    parse: dreamweaver::parse,
                    stringify: dreamweaver::to_document,
                },
            },
            Dialect::Atom => Self {
                dialect,
                detect: atom::detect,
                codec: Codec::Collection {
                    parse: atom::parse,
                    stringify: atom::stringify,
                },
            },
        }
    }

    /// Speculative detection reduced to a boolean
    #[must_use]
    pub fn is_snippet(&self, text: &str) -> bool {
        (self.detect)(text).is_match()
    }
}

/// Ordered table of dialect codecs
///
/// Registration order doubles as the tie-break order when sniffing.
#[derive(Debug, Clone)]
pub struct Registry {
    entries: Vec<FormatEntry>,
}

impl Registry {
    /// All four dialects in [`Dialect::ALL`] order
    #[must_use]
    pub fn standard() -> Self {
        Self::with_dialects(&Dialect::ALL)
    }

    /// Registry restricted to `dialects`, in the given order
    #[must_use]
    pub fn with_dialects(dialects: &[Dialect]) -> Self {
        let mut entries: Vec<FormatEntry> = Vec::with_capacity(dialects.len());
        for &dialect in dialects {
            if !entries.iter().any(|e| e.dialect == dialect) {
                entries.push(FormatEntry::for_dialect(dialect));
            }
        }
        Self { entries }
    }

    /// Entry for `dialect`
    ///
    /// # Errors
    ///
    /// Returns [`SnippetError::NoParser`] if the dialect is not registered.
    pub fn get(&self, dialect: Dialect) -> Result<&FormatEntry> {
        self.entries
            .iter()
            .find(|e| e.dialect == dialect)
            .ok_or_else(|| SnippetError::NoParser(dialect.to_string()))
    }

    /// Entries in registration order
    pub fn iter(&self) -> impl Iterator<Item = &FormatEntry> {
        self.entries.iter()
    }

    /// Registered dialects in registration order
    #[must_use]
    pub fn dialects(&self) -> Vec<Dialect> {
        self.entries.iter().map(|e| e.dialect).collect()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::standard()
    }
}

/// Names for a collection document, renaming later duplicates `"<name> (n)"`
///
/// A rename never takes a name that appears anywhere in the input.
pub(crate) fn unique_names(snippets: &[Snippet]) -> Vec<String> {
    let reserved: HashSet<&str> = snippets.iter().map(Snippet::name_or_default).collect();
    let mut used: HashSet<String> = HashSet::with_capacity(snippets.len());
    let mut next_suffix: HashMap<String, usize> = HashMap::new();

    snippets
        .iter()
        .map(|snippet| {
            let base = snippet.name_or_default();
            if used.insert(base.to_string()) {
                return base.to_string();
            }

            let suffix = next_suffix.entry(base.to_string()).or_insert(2);
            let renamed = loop {
                let candidate = format!("{base} ({suffix})");
                *suffix += 1;
                if !reserved.contains(candidate.as_str()) && !used.contains(&candidate) {
                    break candidate;
                }
            };
            tracing::warn!(name = %base, renamed = %renamed, "duplicate snippet name renamed");
            used.insert(renamed.clone());
            renamed
        })
        .collect()
}

/// Split a native multi-line string into body lines
pub(crate) fn split_body(text: &str) -> Vec<String> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_registry_order() {
        assert_eq!(Registry::standard().dialects(), Dialect::ALL.to_vec());
    }

    #[test]
    fn test_missing_dialect_has_no_parser() {
        let registry = Registry::with_dialects(&[Dialect::VsCode]);
        let err = registry.get(Dialect::Atom).unwrap_err();
        assert_eq!(err.to_string(), "No parser found for `atom`");
    }

    #[test]
    fn test_with_dialects_ignores_repeats() {
        let registry = Registry::with_dialects(&[Dialect::Atom, Dialect::VsCode, Dialect::Atom]);
        assert_eq!(registry.dialects(), vec![Dialect::Atom, Dialect::VsCode]);
    }

    #[test]
    fn test_codec_shapes_follow_framing() {
        for entry in Registry::standard().iter() {
            let collection = matches!(entry.codec, Codec::Collection { .. });
            assert_eq!(collection, !entry.dialect.is_multi_file());
        }
    }

    #[test]
    fn test_unique_names() {
        let snippets = vec![
            Snippet::new("a", vec![]).with_name("loop"),
            Snippet::new("b", vec![]).with_name("loop"),
            Snippet::new("c", vec![]),
            Snippet::new("d", vec![]).with_name("loop"),
        ];
        assert_eq!(
            unique_names(&snippets),
            vec!["loop", "loop (2)", "unnamed-snippet", "loop (3)"]
        );
    }

    #[test]
    fn test_renames_skip_names_already_taken() {
        let snippets = vec![
            Snippet::new("a", vec![]).with_name("loop"),
            Snippet::new("b", vec![]).with_name("loop"),
            Snippet::new("c", vec![]).with_name("loop (2)"),
        ];
        assert_eq!(unique_names(&snippets), vec!["loop", "loop (3)", "loop (2)"]);
    }

    #[test]
    fn test_renames_skip_earlier_renames() {
        let snippets = vec![
            Snippet::new("a", vec![]).with_name("loop (2)"),
            Snippet::new("b", vec![]).with_name("loop (2)"),
            Snippet::new("c", vec![]).with_name("loop"),
            Snippet::new("d", vec![]).with_name("loop"),
        ];
        assert_eq!(
            unique_names(&snippets),
            vec!["loop (2)", "loop (2) (2)", "loop", "loop (3)"]
        );
    }

    #[test]
    fn test_split_body_handles_crlf() {
        assert_eq!(split_body("a\r\nb"), vec!["a", "b"]);
    }
}
