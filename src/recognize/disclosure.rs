//! Fixed debt-collection disclosure recognition.

use super::{Recognized, Recognizer};
use crate::classify::DocumentType;
use crate::model::{FormattedBlock, Paragraph, ParagraphBlock};

/// The fixed disclosure sentence, wrapped bold+italic wherever it stands
/// alone. Repeats are removed by the assembler.
pub const DISCLOSURE: &str =
    "This is an attempt to collect a debt and any information obtained will be used for that purpose.";

pub struct DisclosureRecognizer;

impl Recognizer for DisclosureRecognizer {
    fn name(&self) -> &'static str {
        "disclosure"
    }

    fn recognize(&self, window: &[Paragraph], _doc_type: DocumentType) -> Option<Recognized> {
        let para = window.first()?;
        let flattened = para
            .lines()
            .map(str::trim)
            .collect::<Vec<_>>()
            .join(" ");
        if flattened.trim() != DISCLOSURE {
            return None;
        }
        Some(Recognized::single(FormattedBlock::Paragraph(
            ParagraphBlock::new(DISCLOSURE).bold().italic(),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str) -> Option<Recognized> {
        DisclosureRecognizer.recognize(&[Paragraph::new(text)], DocumentType::Generic)
    }

    #[test]
    fn test_disclosure_recognized() {
        let found = run(DISCLOSURE).unwrap();
        match &found.blocks[0] {
            FormattedBlock::Paragraph(p) => {
                assert!(p.bold);
                assert!(p.italic);
                assert_eq!(p.text, DISCLOSURE);
            }
            other => panic!("expected paragraph, got {:?}", other),
        }
    }

    #[test]
    fn test_disclosure_with_line_break_recognized() {
        let broken = "This is an attempt to collect a debt and any information\n\
                      obtained will be used for that purpose.";
        assert!(run(broken).is_some());
    }

    #[test]
    fn test_other_text_falls_through() {
        assert!(run("This is an attempt to reach you by phone.").is_none());
    }
}
