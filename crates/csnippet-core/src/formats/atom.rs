//! Atom snippets: CSON objects keyed by scope selector, then by snippet name
//!
//! ```cson
//! '.source.js':
//!   'Log':
//!     'prefix': 'log'
//!     'body': 'console.log($1)'
//! ```
//!
//! Parsing flattens every `.source*` scope (and the `'*'` wildcard) into one
//! list. Writing groups everything under `'*'`, so per-scope grouping does
//! not survive a round trip.

use std::collections::BTreeSet;
use std::path::Path;

use serde_json::{Map, Value};

use super::{Detection, cson, split_body, unique_names};
use crate::dialect::Dialect;
use crate::error::{Result, SnippetError};
use crate::files::SnippetFiles;
use crate::snippet::{NO_DESCRIPTION, Snippet};

/// Scope key prefix recognised as a snippet group
pub const SOURCE_SCOPE_PREFIX: &str = ".source";

/// Wildcard scope used when writing
pub const WILDCARD_SCOPE: &str = "*";

const INDENT: &str = "  ";

fn is_scope_key(key: &str) -> bool {
    key.starts_with(SOURCE_SCOPE_PREFIX) || key == WILDCARD_SCOPE
}

fn scopes(document: &Map<String, Value>) -> impl Iterator<Item = (&String, &Value)> {
    document.iter().filter(|(key, _)| is_scope_key(key))
}

/// Whether `text` is an Atom snippet document
#[must_use]
pub fn detect(text: &str) -> Detection {
    let Ok(value) = cson::parse(text) else {
        return Detection::NoMatch;
    };
    let Value::Object(document) = value else {
        return Detection::Malformed;
    };

    let mut groups = scopes(&document).peekable();
    if groups.peek().is_none() {
        return Detection::Malformed;
    }

    let complete = groups.all(|(_, group)| {
        group.as_object().is_some_and(|snippets| {
            snippets
                .values()
                .all(|entry| entry.get("prefix").is_some() && entry.get("body").is_some())
        })
    });
    if complete {
        Detection::Match
    } else {
        Detection::Malformed
    }
}

/// Parse an Atom document into one flat list, stamping each snippet's scope
///
/// Snippets under the `'*'` wildcard get no scope. A missing description
/// becomes [`NO_DESCRIPTION`].
///
/// # Errors
///
/// Returns a parse error for invalid CSON or entries that are not objects.
pub fn parse(text: &str) -> Result<Vec<Snippet>> {
    let value = cson::parse(text).map_err(|e| SnippetError::parse(Dialect::Atom, e))?;
    let Value::Object(document) = value else {
        return Err(SnippetError::parse(
            Dialect::Atom,
            "top level is not an object",
        ));
    };

    let mut snippets = Vec::new();
    for (scope, group) in scopes(&document) {
        let group = group.as_object().ok_or_else(|| {
            SnippetError::parse(Dialect::Atom, format!("scope `{scope}` is not an object"))
        })?;
        for (name, entry) in group {
            let snippet = into_snippet(scope, name, entry)?;
            snippet.ensure_convertible(Dialect::Atom)?;
            snippets.push(snippet);
        }
    }

    tracing::debug!(count = snippets.len(), "parsed atom snippets");
    Ok(snippets)
}

fn into_snippet(scope: &str, name: &str, entry: &Value) -> Result<Snippet> {
    let entry = entry.as_object().ok_or_else(|| {
        SnippetError::parse(Dialect::Atom, format!("snippet `{name}` is not an object"))
    })?;
    let text = |key: &str| entry.get(key).and_then(Value::as_str);

    let body = match entry.get("body") {
        Some(Value::String(body)) => split_body(body),
        Some(Value::Array(lines)) => lines
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    };

    Ok(Snippet {
        name: Some(name.to_string()),
        description: Some(text("description").unwrap_or(NO_DESCRIPTION).to_string()),
        prefix: text("prefix").map(str::to_string),
        body,
        scope: (scope != WILDCARD_SCOPE).then(|| scope.to_string()),
    })
}

/// Read and parse a `.cson` file
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read, or a parse error.
pub fn parse_file(path: &Path) -> Result<Vec<Snippet>> {
    parse(&SnippetFiles::new().read_text_file(path)?)
}

/// Serialize snippets under the single `'*'` scope
///
/// Bodies are written as `'''` block strings when that reads back to the
/// same lines, otherwise as one quoted string.
///
/// # Errors
///
/// This function does not currently fail.
pub fn stringify(snippets: &[Snippet]) -> Result<String> {
    let distinct: BTreeSet<&str> = snippets.iter().filter_map(Snippet::scope).collect();
    if distinct.len() > 1 {
        tracing::warn!(
            scopes = ?distinct,
            "atom output groups every scope under '*'"
        );
    }

    let entry_indent = INDENT.repeat(2);
    let content_indent = INDENT.repeat(3);

    let mut lines = vec![format!("{}:", cson::quote(WILDCARD_SCOPE))];
    for (name, snippet) in unique_names(snippets).iter().zip(snippets) {
        let body = cson::block(&snippet.body, &content_indent, &entry_indent)
            .unwrap_or_else(|| cson::quote(&snippet.body_text()));

        lines.push(format!("{INDENT}{}:", cson::quote(name)));
        lines.push(format!(
            "{entry_indent}'prefix': {}",
            cson::quote(snippet.prefix_or_default())
        ));
        lines.push(format!("{entry_indent}'body': {body}"));
        lines.push(format!(
            "{entry_indent}'description': {}",
            cson::quote(snippet.description_or_default())
        ));
    }
    Ok(lines.join("\n"))
}
