//! Data model: raw document, paragraphs, and formatted output blocks.

mod block;
mod document;
mod paragraph;

pub use block::{CenteredBlock, FormattedBlock, ParagraphBlock, TableBlock, TableCell, TableRow};
pub use document::Document;
pub use paragraph::Paragraph;
