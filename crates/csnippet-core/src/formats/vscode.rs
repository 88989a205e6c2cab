//! VS Code snippets: one JSON object keyed by snippet name
//!
//! ```json
//! {
//!   "Comment divider": {
//!     "prefix": "cmt-divider",
//!     "body": ["line1", "line2"],
//!     "description": "d"
//!   }
//! }
//! ```
//!
//! `prefix` and `body` may each be a string or an array of strings. Line and
//! block comments are accepted, as VS Code itself reads the files as JSONC.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Detection, split_body, unique_names};
use crate::dialect::Dialect;
use crate::error::{Result, SnippetError};
use crate::files::SnippetFiles;
use crate::snippet::Snippet;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    #[serde(default)]
    prefix: Option<OneOrMany>,
    #[serde(default)]
    body: Option<OneOrMany>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    scope: Option<String>,
}

#[derive(Debug, Serialize)]
struct EntryOut<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    prefix: Option<&'a str>,
    body: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scope: Option<&'a str>,
}

/// Whether `text` is a VS Code snippet collection
#[must_use]
pub fn detect(text: &str) -> Detection {
    let Ok(Value::Object(entries)) = serde_json::from_str::<Value>(&strip_comments(text)) else {
        return Detection::NoMatch;
    };
    if entries.is_empty() {
        return Detection::Malformed;
    }

    // Same shape check as `parse`, so a match always parses
    let complete = entries.values().all(|entry| {
        RawEntry::deserialize(entry)
            .is_ok_and(|raw| raw.prefix.is_some() && raw.body.is_some())
    });
    if complete {
        Detection::Match
    } else {
        Detection::Malformed
    }
}

/// Parse a VS Code collection, in document order
///
/// # Errors
///
/// Returns a parse error if the text is not a JSON object of snippet entries.
pub fn parse(text: &str) -> Result<Vec<Snippet>> {
    let entries: Map<String, Value> = serde_json::from_str(&strip_comments(text))
        .map_err(|e| SnippetError::parse(Dialect::VsCode, e))?;

    entries
        .into_iter()
        .map(|(name, value)| {
            let raw: RawEntry = serde_json::from_value(value).map_err(|e| {
                SnippetError::parse(Dialect::VsCode, format!("entry `{name}`: {e}"))
            })?;
            Ok(into_snippet(name, raw))
        })
        .collect()
}

fn into_snippet(name: String, raw: RawEntry) -> Snippet {
    let prefix = raw.prefix.and_then(|prefix| match prefix {
        OneOrMany::One(prefix) => Some(prefix),
        OneOrMany::Many(prefixes) => prefixes.into_iter().next(),
    });
    let body = match raw.body {
        Some(OneOrMany::One(body)) => split_body(&body),
        Some(OneOrMany::Many(lines)) => lines,
        None => Vec::new(),
    };

    Snippet {
        name: Some(name),
        description: raw.description,
        prefix,
        body,
        scope: raw.scope,
    }
}

/// Read and parse a `.code-snippets` file
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read, or a parse error.
pub fn parse_file(path: &Path) -> Result<Vec<Snippet>> {
    parse(&SnippetFiles::new().read_text_file(path)?)
}

/// Serialize snippets into one pretty-printed JSON object
///
/// # Errors
///
/// Returns a serialization error if JSON encoding fails.
pub fn stringify(snippets: &[Snippet]) -> Result<String> {
    let mut entries = Map::new();
    for (name, snippet) in unique_names(snippets).into_iter().zip(snippets) {
        let entry = EntryOut {
            prefix: snippet.prefix.as_deref(),
            body: &snippet.body,
            description: snippet.description.as_deref(),
            scope: snippet.scope(),
        };
        let value =
            serde_json::to_value(entry).map_err(|e| SnippetError::serialize(Dialect::VsCode, e))?;
        entries.insert(name, value);
    }

    serde_json::to_string_pretty(&Value::Object(entries))
        .map_err(|e| SnippetError::serialize(Dialect::VsCode, e))
}

/// Remove `//` and `/* */` comments outside of string literals
fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match (c, chars.peek()) {
            ('"', _) => {
                in_string = true;
                out.push(c);
            }
            ('/', Some('/')) => {
                for skipped in chars.by_ref() {
                    if skipped == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut prev = '\0';
                for skipped in chars.by_ref() {
                    if prev == '*' && skipped == '/' {
                        break;
                    }
                    prev = skipped;
                }
                out.push(' ');
            }
            _ => out.push(c),
        }
    }
    out
}
