//! Document-title header recognition.

use super::{Recognized, Recognizer};
use crate::classify::DocumentType;
use crate::model::{CenteredBlock, FormattedBlock, Paragraph};

/// Known document-title phrases. A single-line paragraph starting with one
/// of these renders as a centered bold header. The segmenter also treats
/// these as section boundaries.
pub const HEADER_PHRASES: &[&str] = &[
    "Notice of Intention to Foreclose Mortgage",
    "Notice of Default and Right to Cure",
    "Notice of Breach",
    "Trial Period Plan Notification",
    "Important Information About Your Privacy",
];

/// The foreclosure-notice title renders at a larger size.
const LARGE_HEADER: &str = "Notice of Intention to Foreclose Mortgage";
const LARGE_HEADER_PT: u8 = 14;

/// Renders known header phrases as centered bold blocks, and rewrites the
/// header token line to the form the document type requires.
pub struct HeaderRecognizer;

impl Recognizer for HeaderRecognizer {
    fn name(&self) -> &'static str {
        "header"
    }

    fn recognize(&self, window: &[Paragraph], doc_type: DocumentType) -> Option<Recognized> {
        let para = window.first()?;
        if para.line_count() != 1 {
            return None;
        }
        let line = para.text.trim();

        // The tag-header line becomes whichever token this template family
        // uses. For most families that is the identity rewrite.
        if line == "{[tagHeader]}" || line == "{Insert(H003 TagHeader)}" {
            return Some(Recognized::single(FormattedBlock::paragraph(
                doc_type.header_token(),
            )));
        }

        let phrase = HEADER_PHRASES.iter().find(|p| line.starts_with(*p))?;
        let mut block = CenteredBlock::header(line);
        if *phrase == LARGE_HEADER {
            block = block.font_size(LARGE_HEADER_PT);
        }
        Some(Recognized::single(FormattedBlock::CenteredBlock(block)))
    }
}
