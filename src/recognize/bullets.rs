//! Bulleted list recognition.

use super::{Recognized, Recognizer};
use crate::classify::DocumentType;
use crate::model::{FormattedBlock, Paragraph, TableBlock, TableCell, TableRow};

/// Width of the bullet-marker column.
const BULLET_WIDTH_PCT: u8 = 3;

/// Agreement-clause lead-ins that form a bullet list even without literal
/// bullet characters.
const BULLET_LEADINS: &[&str] = &[
    "There may be homeownership assistance options",
    "Avoid Foreclosure Scams",
];

/// Renders bulleted items as table rows with a narrow bullet cell and a
/// content cell.
pub struct BulletRecognizer;

fn strip_bullet(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    trimmed
        .strip_prefix('•')
        .or_else(|| trimmed.strip_prefix("- "))
        .map(str::trim)
}

fn is_leadin(line: &str) -> bool {
    let trimmed = line.trim_start();
    BULLET_LEADINS.iter().any(|l| trimmed.starts_with(l))
}

impl Recognizer for BulletRecognizer {
    fn name(&self) -> &'static str {
        "bullets"
    }

    fn recognize(&self, window: &[Paragraph], _doc_type: DocumentType) -> Option<Recognized> {
        let para = window.first()?;
        let lines: Vec<&str> = para.lines().filter(|l| !l.trim().is_empty()).collect();

        let literal_bullets = lines.iter().any(|l| strip_bullet(l).is_some());
        let leadin_count = lines.iter().filter(|l| is_leadin(l)).count();
        if !literal_bullets && leadin_count < 2 {
            return None;
        }

        let mut rows = Vec::new();
        for line in lines {
            let content = strip_bullet(line).unwrap_or(line.trim());
            rows.push(TableRow::new(vec![
                TableCell::new("•")
                    .width(BULLET_WIDTH_PCT)
                    .valign_top()
                    .center(),
                TableCell::new(content),
            ]));
        }
        Some(Recognized::single(FormattedBlock::Table(
            TableBlock::borderless(rows),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str) -> Option<Recognized> {
        BulletRecognizer.recognize(&[Paragraph::new(text)], DocumentType::Generic)
    }

    #[test]
    fn test_literal_bullets() {
        let found = run("• First item\n• Second item").unwrap();
        match &found.blocks[0] {
            FormattedBlock::Table(t) => {
                assert_eq!(t.rows.len(), 2);
                assert_eq!(t.rows[0].cells[0].text, "•");
                assert_eq!(t.rows[0].cells[0].width_pct, Some(3));
                assert_eq!(t.rows[0].cells[1].text, "First item");
            }
            other => panic!("expected table, got {:?}", other),
        }
    }

    #[test]
    fn test_dash_bullets() {
        let found = run("- call {[plsMatrix.LoanCounselingPh]}\n- visit our office").unwrap();
        match &found.blocks[0] {
            FormattedBlock::Table(t) => {
                assert_eq!(t.rows[0].cells[1].text, "call {[plsMatrix.LoanCounselingPh]}");
            }
            other => panic!("expected table, got {:?}", other),
        }
    }

    #[test]
    fn test_leadin_pair_forms_list() {
        let found = run(
            "There may be homeownership assistance options available to you.\n\
             Avoid Foreclosure Scams by contacting us directly.",
        )
        .unwrap();
        match &found.blocks[0] {
            FormattedBlock::Table(t) => assert_eq!(t.rows.len(), 2),
            other => panic!("expected table, got {:?}", other),
        }
    }

    #[test]
    fn test_single_leadin_falls_through() {
        assert!(run("Avoid Foreclosure Scams by contacting us directly.").is_none());
        assert!(run("An ordinary paragraph.").is_none());
    }
}
