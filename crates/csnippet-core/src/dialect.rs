//! Supported editor snippet dialects

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SnippetError;

/// One of the four editor snippet formats
///
/// The declaration order is the registration order used to break ties
/// when sniffing an unlabeled input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// VS Code JSON (`.code-snippets`)
    VsCode,
    /// Sublime Text XML (`.sublime-snippet`)
    Sublime,
    /// Dreamweaver XML (`.csn`)
    Dreamweaver,
    /// Atom CSON (`.cson`)
    Atom,
}

/// How a dialect lays snippets out in files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framing {
    /// Many snippets in one document
    Collection,
    /// Exactly one snippet per document
    PerSnippet,
}

impl Dialect {
    /// All dialects in registration order
    pub const ALL: [Self; 4] = [Self::VsCode, Self::Sublime, Self::Dreamweaver, Self::Atom];

    /// Lowercase tag used on the command line and in config files
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::VsCode => "vscode",
            Self::Sublime => "sublime",
            Self::Dreamweaver => "dreamweaver",
            Self::Atom => "atom",
        }
    }

    /// Human readable editor name
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::VsCode => "VS Code",
            Self::Sublime => "Sublime",
            Self::Dreamweaver => "Dreamweaver",
            Self::Atom => "Atom",
        }
    }

    /// File extension including the leading dot
    #[must_use]
    pub const fn file_extension(self) -> &'static str {
        match self {
            Self::VsCode => ".code-snippets",
            Self::Sublime => ".sublime-snippet",
            Self::Dreamweaver => ".csn",
            Self::Atom => ".cson",
        }
    }

    /// Document framing of this dialect
    #[must_use]
    pub const fn framing(self) -> Framing {
        match self {
            Self::VsCode | Self::Atom => Framing::Collection,
            Self::Sublime | Self::Dreamweaver => Framing::PerSnippet,
        }
    }

    /// Whether this dialect writes one file per snippet
    #[must_use]
    pub const fn is_multi_file(self) -> bool {
        matches!(self.framing(), Framing::PerSnippet)
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = SnippetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vscode" | "code" => Ok(Self::VsCode),
            "sublime" => Ok(Self::Sublime),
            "dreamweaver" | "dw" => Ok(Self::Dreamweaver),
            "atom" => Ok(Self::Atom),
            _ => Err(SnippetError::NoParser(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_order() {
        assert_eq!(
            Dialect::ALL,
            [
                Dialect::VsCode,
                Dialect::Sublime,
                Dialect::Dreamweaver,
                Dialect::Atom
            ]
        );
    }

    #[test]
    fn test_from_str_roundtrips_tags() {
        for dialect in Dialect::ALL {
            assert_eq!(dialect.as_str().parse::<Dialect>().unwrap(), dialect);
        }
    }

    #[test]
    fn test_unknown_tag_has_no_parser() {
        let err = "emacs".parse::<Dialect>().unwrap_err();
        assert!(matches!(err, SnippetError::NoParser(tag) if tag == "emacs"));
    }

    #[test]
    fn test_framing() {
        assert!(Dialect::Sublime.is_multi_file());
        assert!(Dialect::Dreamweaver.is_multi_file());
        assert!(!Dialect::VsCode.is_multi_file());
        assert!(!Dialect::Atom.is_multi_file());
    }

    #[test]
    fn test_dialect_serde() {
        let json = serde_json::to_string(&Dialect::VsCode).unwrap();
        assert_eq!(json, r#""vscode""#);

        let parsed: Dialect = serde_json::from_str(r#""dreamweaver""#).unwrap();
        assert_eq!(parsed, Dialect::Dreamweaver);
    }
}
