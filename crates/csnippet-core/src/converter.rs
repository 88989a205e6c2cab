//! Conversion orchestrator
//!
//! A [`Converter`] owns the raw input, the source and target dialects and
//! the codec registry. Calls move it from uninitialized, to source
//! resolved ([`Converter::init`]), to parsed and converted; `parse` and
//! `convert` may be called without `init` when explicit arguments are given.


use crate::dialect::Dialect;
use crate::error::{Result, SnippetError};
use crate::files::SnippetInput;
use crate::formats::{Codec, Registry};
use crate::markup::{Document, DocumentBatch};
use crate::sniffer;
use crate::snippet::Snippet;

/// Drives detection, parsing and serialization of one input
pub struct Converter {
    input: SnippetInput,
    source: Option<Dialect>,
    target: Option<Dialect>,
    registry: Registry,
}

impl Converter {
    /// Converter over a raw text, possibly several divider-joined documents
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self::from_input(SnippetInput::Text(text.into()))
    }

    /// Converter over documents that already travel separately
    #[must_use]
    pub fn from_documents(documents: DocumentBatch) -> Self {
        Self::from_input(SnippetInput::Documents(documents))
    }

    /// Converter over input read by the file collaborator
    #[must_use]
    pub fn from_input(input: SnippetInput) -> Self {
        Self {
            input,
            source: None,
            target: None,
            registry: Registry::standard(),
        }
    }

    /// Declare the source dialect
    #[must_use]
    pub const fn with_source(mut self, source: Dialect) -> Self {
        self.source = Some(source);
        self
    }

    /// Declare the target dialect
    #[must_use]
    pub const fn with_target(mut self, target: Dialect) -> Self {
        self.target = Some(target);
        self
    }

    /// Replace the codec registry
    #[must_use]
    pub fn with_registry(mut self, registry: Registry) -> Self {
        self.registry = registry;
        self
    }

    /// Declared or sniffed source dialect
    #[must_use]
    pub const fn source(&self) -> Option<Dialect> {
        self.source
    }

    /// Declared target dialect
    #[must_use]
    pub const fn target(&self) -> Option<Dialect> {
        self.target
    }

    /// Sniff the source unless one is already declared
    ///
    /// Calling it again once a source is known does nothing.
    ///
    /// # Errors
    ///
    /// Returns [`SnippetError::NotValid`] if no dialect recognises the input.
    pub fn init(&mut self) -> Result<Dialect> {
        if let Some(source) = self.source {
            return Ok(source);
        }
        let source = self.find_source()?;
        self.source = Some(source);
        Ok(source)
    }

    /// Sniff the input without changing state
    ///
    /// Separate documents are recognised by their first document.
    ///
    /// # Errors
    ///
    /// Returns [`SnippetError::NotValid`] if no dialect recognises the input.
    pub fn find_source(&self) -> Result<Dialect> {
        match &self.input {
            SnippetInput::Text(text) => sniffer::find_source(&self.registry, text),
            SnippetInput::Documents(documents) => {
                let first = documents.iter().next().ok_or(SnippetError::NotValid)?;
                sniffer::find_source(&self.registry, first.content())
            }
        }
    }

    /// Parse the input as `source`, else as the converter's source
    ///
    /// Collection dialects parse every document whole; single-snippet
    /// dialects parse each document, recovering names from markers or
    /// document names.
    ///
    /// # Errors
    ///
    /// Returns [`SnippetError::NoSource`] without a source,
    /// [`SnippetError::NoParser`] for an unregistered dialect, or the
    /// codec's parse error.
    pub fn parse(&self, source: Option<Dialect>) -> Result<Vec<Snippet>> {
        let source = source.or(self.source).ok_or(SnippetError::NoSource)?;
        let entry = self.registry.get(source)?;

        let snippets = match (entry.codec, &self.input) {
            (Codec::Collection { parse, .. }, SnippetInput::Text(text)) => parse(text)?,
            (Codec::Collection { parse, .. }, SnippetInput::Documents(documents)) => {
                let mut snippets = Vec::new();
                for document in documents {
                    snippets.extend(parse(document.content())?);
                }
                snippets
            }
            (Codec::PerSnippet { parse, .. }, SnippetInput::Text(text)) => {
                parse_each(parse, &DocumentBatch::split(text))?
            }
            (Codec::PerSnippet { parse, .. }, SnippetInput::Documents(documents)) => {
                parse_each(parse, documents)?
            }
        };

        tracing::debug!(%source, count = snippets.len(), "parsed snippets");
        Ok(snippets)
    }

    /// Convert into one text, divider-joined for single-snippet targets
    ///
    /// Without `snippets` the input is parsed first.
    ///
    /// # Errors
    ///
    /// Returns [`SnippetError::NoTarget`] without a target, any parse or
    /// serialization error, or [`SnippetError::DividerCollision`] if a
    /// document cannot be framed.
    pub fn convert(&self, snippets: Option<&[Snippet]>, target: Option<Dialect>) -> Result<String> {
        let batch = self.convert_documents(snippets, target)?;
        let target = target.or(self.target).ok_or(SnippetError::NoTarget)?;
        if target.is_multi_file() {
            batch.join()
        } else {
            Ok(batch
                .into_iter()
                .next()
                .map(|document| document.content().to_string())
                .unwrap_or_default())
        }
    }

    /// Convert into an ordered batch of documents
    ///
    /// Collection targets produce one unnamed document; single-snippet
    /// targets produce one named document per snippet, in input order.
    ///
    /// # Errors
    ///
    /// Returns [`SnippetError::NoTarget`] without a target, or any parse or
    /// serialization error.
    pub fn convert_documents(
        &self,
        snippets: Option<&[Snippet]>,
        target: Option<Dialect>,
    ) -> Result<DocumentBatch> {
        let target = target.or(self.target).ok_or(SnippetError::NoTarget)?;
        let entry = self.registry.get(target)?;

        let parsed;
        let snippets = match snippets {
            Some(snippets) => snippets,
            None => {
                parsed = self.parse(None)?;
                &parsed
            }
        };

        let batch: DocumentBatch = match entry.codec {
            Codec::Collection { stringify, .. } => {
                std::iter::once(Document::unnamed(stringify(snippets)?)).collect()
            }
            Codec::PerSnippet { stringify, .. } => {
                snippets.iter().map(stringify).collect::<Result<DocumentBatch>>()?
            }
        };

        tracing::debug!(%target, documents = batch.len(), "converted snippets");
        Ok(batch)
    }
}

fn parse_each(
    parse: fn(&str, Option<&str>) -> Result<Snippet>,
    documents: &DocumentBatch,
) -> Result<Vec<Snippet>> {
    tracing::debug!(fragments = documents.len(), "parsing single-snippet documents");
    documents
        .iter()
        .map(|document| parse(document.content(), document.name()))
        .collect()
}
