//! Divider framing for batches of single-snippet documents
//!
//! Inside the library documents travel as an ordered [`DocumentBatch`]. The
//! `#{DIVIDER}` joined string only exists at the outer boundary, where a
//! batch has to be handed over as one piece of text.

use crate::error::{Result, SnippetError};
use crate::snippet::{name_marker, split_name_marker};

/// Sentinel placed between concatenated documents
pub const DIVIDER: &str = "#{DIVIDER}";

/// Split a blob on the divider token
///
/// Text without a divider yields a single fragment. Whitespace-only
/// fragments (e.g. after a trailing divider) are dropped.
#[must_use]
pub fn split_documents(text: &str) -> Vec<&str> {
    if !text.contains(DIVIDER) {
        return vec![text];
    }
    text.split(DIVIDER)
        .filter(|fragment| !fragment.trim().is_empty())
        .collect()
}

/// One serialized document, optionally carrying the snippet name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    name: Option<String>,
    content: String,
}

impl Document {
    /// Document whose name travels in a `#{NAME:...}` marker
    #[must_use]
    pub fn named(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            content: content.into(),
        }
    }

    /// Document without a name marker (collection dialects)
    #[must_use]
    pub fn unnamed(content: impl Into<String>) -> Self {
        Self {
            name: None,
            content: content.into(),
        }
    }

    /// Parse one fragment, lifting a leading name marker off the content
    #[must_use]
    pub fn from_fragment(fragment: &str) -> Self {
        let (name, content) = split_name_marker(fragment);
        Self { name, content }
    }

    /// Snippet name carried by this document
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Native document text, without any marker
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Text with the name marker prepended when the document is named
    #[must_use]
    pub fn render(&self) -> String {
        match &self.name {
            Some(name) => format!("{}{}", name_marker(name), self.content),
            None => self.content.clone(),
        }
    }
}

/// Ordered list of documents produced by one conversion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentBatch {
    documents: Vec<Document>,
}

impl DocumentBatch {
    /// Create an empty batch
    #[must_use]
    pub const fn new() -> Self {
        Self {
            documents: Vec::new(),
        }
    }

    /// Split a divider-joined blob into documents
    #[must_use]
    pub fn split(text: &str) -> Self {
        split_documents(text)
            .into_iter()
            .map(Document::from_fragment)
            .collect()
    }

    /// Append a document
    pub fn push(&mut self, document: Document) {
        self.documents.push(document);
    }

    /// Number of documents
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the batch holds no documents
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Iterate documents in order
    pub fn iter(&self) -> std::slice::Iter<'_, Document> {
        self.documents.iter()
    }

    /// Join rendered documents with the divider
    ///
    /// # Errors
    ///
    /// Returns [`SnippetError::DividerCollision`] if a document already contains
    /// the divider token, since the joined text could not be split back apart.
    pub fn join(&self) -> Result<String> {
        let mut rendered = Vec::with_capacity(self.documents.len());
        for document in &self.documents {
            let text = document.render();
            if text.contains(DIVIDER) {
                return Err(SnippetError::DividerCollision {
                    name: document.name().unwrap_or_default().to_string(),
                    token: DIVIDER,
                });
            }
            rendered.push(text);
        }
        Ok(rendered.join(DIVIDER))
    }
}

impl FromIterator<Document> for DocumentBatch {
    fn from_iter<I: IntoIterator<Item = Document>>(iter: I) -> Self {
        Self {
            documents: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for DocumentBatch {
    type Item = Document;
    type IntoIter = std::vec::IntoIter<Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.documents.into_iter()
    }
}

impl<'a> IntoIterator for &'a DocumentBatch {
    type Item = &'a Document;
    type IntoIter = std::slice::Iter<'a, Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.documents.iter()
    }
}
