//! Sublime Text snippets: one XML document per snippet
//!
//! The schema has no name field, so the name travels either in a
//! `#{NAME:...}` marker in front of the document or out-of-band (the file
//! name when reading from disk).

use std::path::Path;

use quick_xml::events::{BytesCData, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::Detection;
use super::xml::{self, Element, XmlError};
use crate::dialect::Dialect;
use crate::error::{Result, SnippetError};
use crate::files::SnippetFiles;
use crate::markup::{Document, escape_special_characters, prettify_html};
use crate::snippet::{NO_DESCRIPTION, Snippet, UNNAMED_SNIPPET, split_name_marker, trim_lines};

const ROOT: &str = "snippet";

fn read_root(text: &str) -> std::result::Result<Element, XmlError> {
    xml::parse_document(text)?.expect_name(ROOT)
}

/// Whether `text` is a single Sublime snippet
#[must_use]
pub fn detect(text: &str) -> Detection {
    let (_, markup) = split_name_marker(text);
    match xml::parse_document(&markup) {
        Err(_) => Detection::NoMatch,
        Ok(root)
            if root.name == ROOT
                && root.child("tabTrigger").is_some()
                && root.child("content").is_some() =>
        {
            Detection::Match
        }
        Ok(_) => Detection::Malformed,
    }
}

/// Parse one Sublime snippet
///
/// The name comes from a leading name marker, else `name_hint`, else
/// [`UNNAMED_SNIPPET`]. Body lines are trimmed and blank lines dropped.
///
/// # Errors
///
/// Returns a parse error for malformed XML, a root other than `<snippet>`,
/// or a snippet with neither trigger nor content.
pub fn parse(text: &str, name_hint: Option<&str>) -> Result<Snippet> {
    let (marker, markup) = split_name_marker(text);
    let root = read_root(&markup).map_err(|e| SnippetError::parse(Dialect::Sublime, e))?;

    let name = marker
        .or_else(|| name_hint.map(str::to_string))
        .unwrap_or_else(|| UNNAMED_SNIPPET.to_string());
    let body = root
        .child_text("content")
        .map(|content| trim_lines(&content.split('\n').collect::<Vec<_>>(), false))
        .unwrap_or_default();
    let non_empty = |value: &str| {
        let value = value.trim();
        (!value.is_empty()).then(|| value.to_string())
    };

    let snippet = Snippet {
        name: Some(name),
        description: root.child_text("description").and_then(non_empty),
        prefix: root.child_text("tabTrigger").map(|t| t.trim().to_string()),
        body,
        scope: root.child_text("scope").and_then(non_empty),
    };
    snippet.ensure_convertible(Dialect::Sublime)?;
    Ok(snippet)
}

/// Read and parse a `.sublime-snippet` file, naming it after the file stem
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read, or a parse error.
pub fn parse_file(path: &Path) -> Result<Snippet> {
    let text = SnippetFiles::new().read_text_file(path)?;
    let stem = path.file_stem().map(|s| s.to_string_lossy().into_owned());
    parse(&text, stem.as_deref())
}

/// Serialize one snippet into a named Sublime document
///
/// # Errors
///
/// Returns a serialization error if the XML writer fails.
pub fn to_document(snippet: &Snippet) -> Result<Document> {
    let content = format!(
        "\n{}\n",
        escape_special_characters(&prettify_html(&snippet.body_text()))
    );

    let markup = xml::write_document(|writer| {
        writer.write_event(Event::Start(BytesStart::new(ROOT)))?;
        writer.write_event(Event::Start(BytesStart::new("content")))?;
        writer.write_event(Event::CData(BytesCData::new(content.as_str())))?;
        writer.write_event(Event::End(BytesEnd::new("content")))?;
        write_text_element(writer, "tabTrigger", snippet.prefix_or_default())?;
        write_text_element(writer, "description", snippet.description_or_default())?;
        write_text_element(writer, "scope", snippet.scope().unwrap_or_default())?;
        writer.write_event(Event::End(BytesEnd::new(ROOT)))?;
        Ok(())
    })
    .map_err(|e| SnippetError::serialize(Dialect::Sublime, e))?;

    Ok(Document::named(snippet.name_or_default(), markup))
}

fn write_text_element(
    writer: &mut Writer<Vec<u8>>,
    name: &str,
    text: &str,
) -> std::result::Result<(), quick_xml::Error> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// Serialize one snippet, name marker included
///
/// # Errors
///
/// Returns a serialization error if the XML writer fails.
pub fn stringify(snippet: &Snippet) -> Result<String> {
    to_document(snippet).map(|document| document.render())
}
