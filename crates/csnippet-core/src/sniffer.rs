//! Source dialect sniffing
//!
//! Every registered dialect checks the text; the first match in
//! registration order wins. A divider-joined blob of single-snippet
//! documents never matches as a whole, so its first fragment is checked
//! as a fallback.

use crate::dialect::Dialect;
use crate::error::{Result, SnippetError};
use crate::formats::{Detection, Registry};
use crate::markup::{DIVIDER, split_documents};

/// Detection outcome of every registered dialect, in registration order
#[must_use]
pub fn detect_all(registry: &Registry, text: &str) -> Vec<(Dialect, Detection)> {
    registry
        .iter()
        .map(|entry| {
            let detection = (entry.detect)(text);
            tracing::debug!(dialect = %entry.dialect, ?detection, "checked dialect");
            (entry.dialect, detection)
        })
        .collect()
}

fn first_match(registry: &Registry, text: &str) -> Option<Dialect> {
    detect_all(registry, text)
        .into_iter()
        .find(|(_, detection)| detection.is_match())
        .map(|(dialect, _)| dialect)
}

/// Guess the dialect of an unlabeled text
///
/// # Errors
///
/// Returns [`SnippetError::NotValid`] if no registered dialect matches.
pub fn find_source(registry: &Registry, text: &str) -> Result<Dialect> {
    if let Some(dialect) = first_match(registry, text) {
        tracing::debug!(%dialect, "sniffed source dialect");
        return Ok(dialect);
    }

    if text.contains(DIVIDER) {
        let fragments = split_documents(text);
        tracing::debug!(fragments = fragments.len(), "probing first divider fragment");
        if let Some(dialect) = fragments
            .first()
            .and_then(|fragment| first_match(registry, fragment))
        {
            tracing::debug!(%dialect, "sniffed source dialect from fragment");
            return Ok(dialect);
        }
    }

    Err(SnippetError::NotValid)
}
