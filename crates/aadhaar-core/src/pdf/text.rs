//! Text layer extraction.

use tracing::{debug, trace};

use super::{PdfHandle, Result};
use crate::error::PdfError;

/// Concatenate the text of every page, in page order, separated by `\n`.
///
/// The text is returned as laid out by the document; line breaks matter to
/// the field patterns, so nothing is normalized.
pub fn extract_text(handle: &PdfHandle) -> Result<String> {
    let doc = handle.document();
    let mut pages = Vec::new();

    for page_num in doc.get_pages().into_keys() {
        let text = doc
            .extract_text(&[page_num])
            .map_err(|e| PdfError::TextExtraction {
                page: page_num,
                reason: e.to_string(),
            })?;
        trace!("Page {}: {} chars", page_num, text.len());
        pages.push(text);
    }

    let text = pages.join("\n");
    debug!("Extracted {} chars of text from {} pages", text.len(), pages.len());
    Ok(text)
}
