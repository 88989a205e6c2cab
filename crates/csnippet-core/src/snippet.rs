//! Intermediate snippet model shared by every dialect

use serde::{Deserialize, Serialize};

use crate::dialect::Dialect;
use crate::error::{Result, SnippetError};

/// Name used when a snippet's name cannot be recovered
pub const UNNAMED_SNIPPET: &str = "unnamed-snippet";

/// Name used by the file collaborator when a document carries no name marker
pub const NO_NAME: &str = "No Name";

/// Description used when the source format has none
pub const NO_DESCRIPTION: &str = "No description provided";

const NAME_MARKER_START: &str = "#{NAME:";
const NAME_MARKER_END: char = '}';

/// Format-agnostic snippet record
///
/// Tab-stops and placeholders (`$1`, `${1:label}`) inside `body` are carried
/// through verbatim; no dialect reinterprets them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Snippet {
    /// Identifier or title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Human readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Trigger text typed in the editor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// Insertable lines
    #[serde(default)]
    pub body: Vec<String>,
    /// Language or context selector
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

impl Snippet {
    /// Create a snippet from its trigger and body
    #[must_use]
    pub fn new(prefix: impl Into<String>, body: Vec<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
            body,
            ..Self::default()
        }
    }

    /// Set the name
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the scope
    #[must_use]
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Name, or [`UNNAMED_SNIPPET`]
    #[must_use]
    pub fn name_or_default(&self) -> &str {
        non_blank(self.name.as_deref()).unwrap_or(UNNAMED_SNIPPET)
    }

    /// Description, or [`NO_DESCRIPTION`]
    #[must_use]
    pub fn description_or_default(&self) -> &str {
        non_blank(self.description.as_deref()).unwrap_or(NO_DESCRIPTION)
    }

    /// Prefix, or the empty string
    #[must_use]
    pub fn prefix_or_default(&self) -> &str {
        self.prefix.as_deref().unwrap_or_default()
    }

    /// Scope if it is set and not blank
    #[must_use]
    pub fn scope(&self) -> Option<&str> {
        non_blank(self.scope.as_deref())
    }

    /// Body lines joined with `\n`
    #[must_use]
    pub fn body_text(&self) -> String {
        self.body.join("\n")
    }

    /// Copy of this snippet with its body passed through [`trim_lines`]
    #[must_use]
    pub fn trimmed(&self, deep: bool) -> Self {
        Self {
            body: trim_lines(&self.body, deep),
            ..self.clone()
        }
    }

    /// Fail unless a prefix or a non-empty body has been established
    ///
    /// # Errors
    ///
    /// Returns a parse error for `dialect` when both are missing.
    pub fn ensure_convertible(&self, dialect: Dialect) -> Result<()> {
        if self.prefix.is_none() && self.body.is_empty() {
            return Err(SnippetError::parse(
                dialect,
                format!("snippet `{}` has neither a prefix nor a body", self.name_or_default()),
            ));
        }
        Ok(())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Trim every line and drop the ones left empty
///
/// In `deep` mode literal tab characters are removed from the remaining lines too.
#[must_use]
pub fn trim_lines<S: AsRef<str>>(lines: &[S], deep: bool) -> Vec<String> {
    lines
        .iter()
        .map(|line| line.as_ref().trim())
        .filter(|line| !line.is_empty())
        .map(|line| {
            if deep {
                line.replace('\t', "")
            } else {
                line.to_string()
            }
        })
        .collect()
}

/// Render the `#{NAME:<name>}` marker
#[must_use]
pub fn name_marker(name: &str) -> String {
    format!("{NAME_MARKER_START}{name}{NAME_MARKER_END}")
}

/// Remove the first `#{NAME:<text>}` marker from `text`
///
/// The marker ends at the last `}` before the document markup starts (the
/// first `<` or line break), so names may contain braces.
///
/// Returns the trimmed name (if a non-empty one was found) and the remaining text.
#[must_use]
pub fn split_name_marker(text: &str) -> (Option<String>, String) {
    let Some(start) = text.find(NAME_MARKER_START) else {
        return (None, text.to_string());
    };
    let name_start = start + NAME_MARKER_START.len();
    let tail = &text[name_start..];
    let markup_start = tail.find(['<', '\n']).unwrap_or(tail.len());
    let Some(len) = tail[..markup_start].rfind(NAME_MARKER_END) else {
        return (None, text.to_string());
    };

    let name = text[name_start..name_start + len].trim();
    let rest = format!(
        "{}{}",
        &text[..start],
        &text[name_start + len + NAME_MARKER_END.len_utf8()..]
    );

    let name = (!name.is_empty()).then(|| name.to_string());
    (name, rest)
}

/// File stem for a snippet name: trimmed, with whitespace runs and path
/// separators replaced by `-`
///
/// A stem made only of dots falls back to `No-Name`, so the result is always a
/// single plain path component.
#[must_use]
pub fn file_stem(name: &str) -> String {
    let stem = name
        .split(|c: char| c.is_whitespace() || c == '/' || c == '\\')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");
    if stem.chars().all(|c| c == '.') {
        NO_NAME.replace(' ', "-")
    } else {
        stem
    }
}
