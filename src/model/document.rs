//! Document-level types.

use super::Paragraph;
use crate::classify::DocumentType;
use serde::{Deserialize, Serialize};

/// A segmented document ready for structural recognition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Template family, determined once and immutable afterward.
    pub doc_type: DocumentType,

    /// Paragraphs in reading order.
    pub paragraphs: Vec<Paragraph>,
}

impl Document {
    /// Create a document from classified, segmented text.
    pub fn new(doc_type: DocumentType, paragraphs: Vec<Paragraph>) -> Self {
        Self {
            doc_type,
            paragraphs,
        }
    }

    /// Number of paragraphs.
    pub fn paragraph_count(&self) -> usize {
        self.paragraphs.len()
    }

    /// Whether the document has any paragraphs.
    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    /// Flatten back to plain text with blank-line separators. Re-running
    /// segmentation on this output must not change paragraph boundaries.
    pub fn plain_text(&self) -> String {
        self.paragraphs
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
