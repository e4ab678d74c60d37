//! Salutation normalization.

use super::{Recognized, Recognizer};
use crate::classify::DocumentType;
use crate::model::{FormattedBlock, Paragraph, ParagraphBlock};

/// The single canonical salutation form.
pub const CANONICAL_SALUTATION: &str = "Dear {[Salutation]},";

/// Normalizes salutation paragraphs to `Dear {[Salutation]},` followed by
/// extra vertical spacing. Triggers on "Dear " with either the generic
/// salutation field or the joint-mortgagor name fields; any other "Dear"
/// variant falls through and is removed by the assembler whenever a
/// canonical salutation exists elsewhere in the document.
pub struct SalutationRecognizer;

impl Recognizer for SalutationRecognizer {
    fn name(&self) -> &'static str {
        "salutation"
    }

    fn recognize(&self, window: &[Paragraph], _doc_type: DocumentType) -> Option<Recognized> {
        let para = window.first()?;
        if !para.text.trim_start().starts_with("Dear ") {
            return None;
        }
        let joint_names = para.contains_field("M558") && para.contains_field("M559");
        if !(para.contains_field("Salutation") || joint_names) {
            return None;
        }
        Some(Recognized {
            blocks: vec![
                // Tight: the spacer supplies the vertical gap.
                FormattedBlock::Paragraph(ParagraphBlock::new(CANONICAL_SALUTATION).tight()),
                FormattedBlock::Spacer { breaks: 2 },
            ],
            consumed: 1,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str) -> Option<Recognized> {
        SalutationRecognizer.recognize(&[Paragraph::new(text)], DocumentType::Generic)
    }

    #[test]
    fn test_generic_salutation_normalized() {
        let found = run("Dear {[Salutation]},").unwrap();
        assert_eq!(found.blocks[0].plain_text(), CANONICAL_SALUTATION);
        assert!(matches!(found.blocks[1], FormattedBlock::Spacer { breaks: 2 }));
    }

    #[test]
    fn test_joint_mortgagor_salutation_normalized() {
        let found = run("Dear {[M558]} and {[M559]}:").unwrap();
        assert_eq!(found.blocks[0].plain_text(), CANONICAL_SALUTATION);
    }

    #[test]
    fn test_plain_dear_falls_through() {
        assert!(run("Dear valued customer,").is_none());
        assert!(run("Dearest friend").is_none());
    }
}
