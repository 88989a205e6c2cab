//! Text and markup utilities shared by the dialect codecs
//!
//! This module handles:
//! - Divider framing of several single-snippet documents in one blob
//! - HTML pretty-printing of snippet bodies embedded in XML
//! - Escaping of sequences that cannot appear inside a CDATA section

mod divider;
mod escape;
mod html;

pub use divider::{DIVIDER, Document, DocumentBatch, split_documents};
pub use escape::escape_special_characters;
pub use html::prettify_html;
