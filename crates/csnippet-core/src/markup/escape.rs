//! Escaping of body text embedded in CDATA sections

const CDATA_END: &str = "]]>";
const CDATA_END_SPLIT: &str = "]]]]><![CDATA[>";

/// Escape sequences that would terminate the surrounding CDATA section
///
/// Every `]]>` is split across two adjacent CDATA sections, which XML
/// readers concatenate back into the original text. The snippet's own
/// escape convention (`\$`, `\}`, `\\`) is shared by all four dialects and
/// is left untouched.
///
/// Not idempotent: escaping already-escaped text splits it again. Call it
/// exactly once per body.
#[must_use]
pub fn escape_special_characters(text: &str) -> String {
    text.replace(CDATA_END, CDATA_END_SPLIT)
}
