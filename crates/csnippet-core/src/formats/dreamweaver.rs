//! Dreamweaver snippets (`.csn`): one XML document per snippet
//!
//! Metadata lives in attributes of the `<snippet>` root (`name`,
//! `description`, `preview` holding the trigger); the body is split across
//! `beforeSelection` and `afterSelection` insert texts.

use std::path::Path;

use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, Event};

use super::Detection;
use super::xml::{self, Element};
use crate::dialect::Dialect;
use crate::error::{Result, SnippetError};
use crate::files::SnippetFiles;
use crate::markup::{Document, escape_special_characters, prettify_html};
use crate::snippet::{Snippet, UNNAMED_SNIPPET, split_name_marker, trim_lines};

const ROOT: &str = "snippet";
const INSERT_TEXT: &str = "insertText";
const BEFORE_SELECTION: &str = "beforeSelection";
const AFTER_SELECTION: &str = "afterSelection";

/// Whether `text` is a single Dreamweaver snippet
#[must_use]
pub fn detect(text: &str) -> Detection {
    let (_, markup) = split_name_marker(text);
    match xml::parse_document(&markup) {
        Err(_) => Detection::NoMatch,
        Ok(root)
            if root.name == ROOT
                && root.attr("preview").is_some()
                && root.child(INSERT_TEXT).is_some() =>
        {
            Detection::Match
        }
        Ok(_) => Detection::Malformed,
    }
}

fn insert_text_lines<'a>(
    root: &'a Element,
    location: &'static str,
) -> impl Iterator<Item = &'a str> {
    root.children_named(INSERT_TEXT)
        .filter(move |insert| insert.attr("location").unwrap_or(BEFORE_SELECTION) == location)
        .flat_map(|insert| insert.text.split('\n'))
}

/// Parse one Dreamweaver snippet
///
/// The `name` attribute wins over a name marker, which wins over
/// `name_hint`. `afterSelection` lines follow the `beforeSelection` lines.
///
/// # Errors
///
/// Returns a parse error for malformed XML, a root other than `<snippet>`,
/// or a snippet with neither trigger nor body.
pub fn parse(text: &str, name_hint: Option<&str>) -> Result<Snippet> {
    let (marker, markup) = split_name_marker(text);
    let root = xml::parse_document(&markup)
        .and_then(|root| root.expect_name(ROOT))
        .map_err(|e| SnippetError::parse(Dialect::Dreamweaver, e))?;

    let attr = |key: &str| {
        root.attr(key)
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    };

    let lines: Vec<&str> = insert_text_lines(&root, BEFORE_SELECTION)
        .chain(insert_text_lines(&root, AFTER_SELECTION))
        .collect();

    let snippet = Snippet {
        name: attr("name")
            .or(marker)
            .or_else(|| name_hint.map(str::to_string))
            .or_else(|| Some(UNNAMED_SNIPPET.to_string())),
        description: attr("description"),
        prefix: root.attr("preview").map(|preview| preview.trim().to_string()),
        body: trim_lines(&lines, false),
        scope: None,
    };
    snippet.ensure_convertible(Dialect::Dreamweaver)?;
    Ok(snippet)
}

/// Read and parse a `.csn` file
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read, or a parse error.
pub fn parse_file(path: &Path) -> Result<Snippet> {
    let text = SnippetFiles::new().read_text_file(path)?;
    let stem = path.file_stem().map(|s| s.to_string_lossy().into_owned());
    parse(&text, stem.as_deref())
}

/// Serialize one snippet into a named Dreamweaver document
///
/// # Errors
///
/// Returns a serialization error if the XML writer fails.
pub fn to_document(snippet: &Snippet) -> Result<Document> {
    let name = snippet.name_or_default();
    let body = format!(
        "\n{}\n",
        escape_special_characters(&prettify_html(&snippet.body_text()))
    );

    let markup = xml::write_document(|writer| {
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        writer.write_event(Event::Start(BytesStart::new(ROOT).with_attributes([
            ("name", name),
            ("description", snippet.description_or_default()),
            ("preview", snippet.prefix_or_default()),
            ("type", "block"),
        ])))?;
        for (location, text) in [(BEFORE_SELECTION, body.as_str()), (AFTER_SELECTION, "")] {
            writer.write_event(Event::Start(
                BytesStart::new(INSERT_TEXT).with_attributes([("location", location)]),
            ))?;
            writer.write_event(Event::CData(BytesCData::new(text)))?;
            writer.write_event(Event::End(BytesEnd::new(INSERT_TEXT)))?;
        }
        writer.write_event(Event::End(BytesEnd::new(ROOT)))?;
        Ok(())
    })
    .map_err(|e| SnippetError::serialize(Dialect::Dreamweaver, e))?;

    Ok(Document::named(name, markup))
}

/// Serialize one snippet, name marker included
///
/// # Errors
///
/// Returns a serialization error if the XML writer fails.
pub fn stringify(snippet: &Snippet) -> Result<String> {
    to_document(snippet).map(|document| document.render())
}
