//! Document-level types.

use super::StyledBlock;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A laid-out document: metadata plus the ordered block sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Document metadata (title, author, etc.)
    pub metadata: Metadata,

    /// Blocks in reading order
    pub blocks: Vec<StyledBlock>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a block to the document.
    pub fn add_block(&mut self, block: StyledBlock) {
        self.blocks.push(block);
    }

    /// Get the number of blocks.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Check if the document has any blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Texts of all section banners, in order.
    pub fn section_titles(&self) -> Vec<&str> {
        self.blocks
            .iter()
            .filter_map(|block| match block {
                StyledBlock::SectionBanner { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(|block| block.plain_text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Document metadata written to the package properties.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Document title
    pub title: Option<String>,

    /// Document author
    pub author: Option<String>,

    /// Creation date; left unset so repeated renders stay byte-identical
    pub created: Option<DateTime<Utc>>,
}

impl Metadata {
    /// Metadata for a document owned by `name`.
    pub fn for_owner(name: &str) -> Self {
        let name = name.trim();
        if name.is_empty() {
            return Self::default();
        }
        Self {
            title: Some(format!("{} - Resume", name)),
            author: Some(name.to_string()),
            created: None,
        }
    }

    /// Set the creation timestamp.
    pub fn with_created(mut self, created: DateTime<Utc>) -> Self {
        self.created = Some(created);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_new() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.block_count(), 0);
    }

    #[test]
    fn test_section_titles() {
        let mut doc = Document::new();
        doc.add_block(StyledBlock::SectionBanner {
            text: "EXPERIENCE".into(),
            bottom_border: true,
        });
        doc.add_block(StyledBlock::Plain {
            text: "x".into(),
            italic: false,
        });
        assert_eq!(doc.section_titles(), vec!["EXPERIENCE"]);
    }

    #[test]
    fn test_metadata_for_owner() {
        let meta = Metadata::for_owner("Jane Doe");
        assert_eq!(meta.author.as_deref(), Some("Jane Doe"));
        assert_eq!(meta.title.as_deref(), Some("Jane Doe - Resume"));
        assert_eq!(Metadata::for_owner("  "), Metadata::default());
    }
}
