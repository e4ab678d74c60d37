//! Standalone conditional-section recognition.

use super::{Recognized, Recognizer};
use crate::classify::DocumentType;
use crate::grammar::{self, PlaceholderToken};
use crate::model::{Document, FormattedBlock, Paragraph};

/// Recognizes `{If(...)}` / `{End If}` pairs that stand on their own lines
/// and wraps the enclosed content in a conditional section. Inner content
/// is recognized recursively. Inline conditionals (tokens embedded in a
/// sentence) stay where they are; this only handles block form.
pub struct ConditionalRecognizer;

fn standalone_open(line: &str) -> Option<String> {
    match grammar::recognize_function(line.trim())? {
        PlaceholderToken::ConditionalOpen { predicate } => Some(predicate),
        _ => None,
    }
}

fn standalone_close(line: &str) -> bool {
    matches!(
        grammar::recognize_function(line.trim()),
        Some(PlaceholderToken::ConditionalClose)
    )
}

impl Recognizer for ConditionalRecognizer {
    fn name(&self) -> &'static str {
        "conditional"
    }

    fn recognize(&self, window: &[Paragraph], doc_type: DocumentType) -> Option<Recognized> {
        let para = window.first()?;
        let lines: Vec<&str> = para.lines().collect();
        let first_line = lines.first()?;
        let predicate = standalone_open(first_line)?;

        // Closed within the same paragraph.
        if let Some(close_idx) = lines.iter().position(|l| standalone_close(l)) {
            let inner_text = lines[1..close_idx].join("\n");
            return Some(Recognized::single(section(
                predicate, &inner_text, doc_type,
            )));
        }

        // Open and close as their own paragraphs, body between them.
        if lines.len() == 1 {
            if let Some(offset) = window
                .iter()
                .skip(1)
                .position(|p| standalone_close(p.text.trim()))
            {
                let inner_text = window[1..offset + 1]
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect::<Vec<_>>()
                    .join("\n\n");
                return Some(Recognized {
                    blocks: vec![section(predicate, &inner_text, doc_type)],
                    consumed: offset + 2,
                });
            }
        }

        log::warn!("unterminated conditional block; leaving as text");
        None
    }
}

fn section(predicate: String, inner_text: &str, doc_type: DocumentType) -> FormattedBlock {
    let paragraphs = crate::segment::segment(inner_text);
    let inner = super::recognize_document(&Document::new(doc_type, paragraphs));
    FormattedBlock::ConditionalSection { predicate, inner }
}
