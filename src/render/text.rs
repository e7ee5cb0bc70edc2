//! Plain text rendering for formatted documents.

use crate::error::Result;
use crate::model::Document;

/// Convert a document to plain text, one block per paragraph.
pub fn to_text(doc: &Document) -> Result<String> {
    let output = doc
        .blocks
        .iter()
        .map(|block| block.plain_text())
        .filter(|text| !text.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n\n");

    Ok(output.trim().to_string())
}
