//! Trial-period payment schedule recognition.

use super::{Recognized, Recognizer};
use crate::classify::DocumentType;
use crate::model::{CenteredBlock, FormattedBlock, Paragraph};
use regex::Regex;

/// Underlined title line of the payment box.
pub const SCHEDULE_TITLE: &str = "Trial Period Plan";

const EXPECTED_PAYMENTS: usize = 3;

/// Renders the three trial-period payment lines as a centered, bordered
/// box with an underlined title. The lines may share one paragraph or
/// arrive as consecutive single-line paragraphs.
pub struct PaymentRecognizer;

fn payment_line_re() -> Regex {
    Regex::new(r"(?i)^\d+(?:st|nd|rd|th)\s+payment\b").unwrap()
}

fn is_payment_line(re: &Regex, line: &str) -> bool {
    let trimmed = line.trim();
    re.is_match(trimmed) && (trimmed.contains("{Money(") || trimmed.contains('$'))
}

impl Recognizer for PaymentRecognizer {
    fn name(&self) -> &'static str {
        "payment"
    }

    fn recognize(&self, window: &[Paragraph], _doc_type: DocumentType) -> Option<Recognized> {
        let re = payment_line_re();
        let first = window.first()?;

        // All three lines in one paragraph.
        let in_first: Vec<String> = first
            .lines()
            .filter(|l| is_payment_line(&re, l))
            .map(|l| l.trim().to_string())
            .collect();
        if in_first.len() >= EXPECTED_PAYMENTS {
            return Some(Recognized::single(schedule_block(in_first)));
        }

        // One payment line per paragraph across the window.
        if in_first.len() == 1 && first.line_count() == 1 {
            let mut lines = in_first;
            let mut consumed = 1;
            for para in window.iter().skip(1) {
                if para.line_count() == 1 && is_payment_line(&re, &para.text) {
                    lines.push(para.text.trim().to_string());
                    consumed += 1;
                    if lines.len() == EXPECTED_PAYMENTS {
                        return Some(Recognized {
                            blocks: vec![schedule_block(lines)],
                            consumed,
                        });
                    }
                } else {
                    break;
                }
            }
        }

        if !first.text.is_empty() && is_payment_line(&re, first.lines().next().unwrap_or("")) {
            log::warn!(
                "payment schedule with fewer than {} lines; leaving as text",
                EXPECTED_PAYMENTS
            );
        }
        None
    }
}

fn schedule_block(lines: Vec<String>) -> FormattedBlock {
    FormattedBlock::CenteredBlock(CenteredBlock::new(lines).with_title(SCHEDULE_TITLE).boxed())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(paras: &[&str]) -> Option<Recognized> {
        let window: Vec<Paragraph> = paras.iter().map(|p| Paragraph::new(*p)).collect();
        PaymentRecognizer.recognize(&window, DocumentType::Lm060)
    }

    #[test]
    fn test_single_paragraph_schedule() {
        let found = run(&["1st payment: {Money({[T045]})} by {[T048]}\n\
                           2nd payment: {Money({[T046]})} by {[T049]}\n\
                           3rd payment: {Money({[T047]})} by {[T050]}"])
        .unwrap();
        assert_eq!(found.consumed, 1);
        match &found.blocks[0] {
            FormattedBlock::CenteredBlock(c) => {
                assert!(c.boxed);
                assert_eq!(c.title.as_deref(), Some(SCHEDULE_TITLE));
                assert_eq!(c.lines.len(), 3);
            }
            other => panic!("expected centered block, got {:?}", other),
        }
    }

    #[test]
    fn test_schedule_across_paragraphs() {
        let found = run(&[
            "1st payment: {Money({[T045]})} by {[T048]}",
            "2nd payment: {Money({[T046]})} by {[T049]}",
            "3rd payment: {Money({[T047]})} by {[T050]}",
        ])
        .unwrap();
        assert_eq!(found.consumed, 3);
    }

    #[test]
    fn test_two_lines_fall_through() {
        assert!(run(&[
            "1st payment: {Money({[T045]})} by {[T048]}\n2nd payment: {Money({[T046]})} by {[T049]}"
        ])
        .is_none());
    }

    #[test]
    fn test_payment_line_needs_amount() {
        assert!(run(&["1st payment is late\n2nd payment is late\n3rd payment is late"]).is_none());
    }
}
