//! Document-wide post-processing passes.
//!
//! These run after per-paragraph recognition because the patterns they
//! handle only reveal themselves across block boundaries. Block passes
//! rewrite the block sequence; string passes rewrite the serialized HTML.

use crate::model::{FormattedBlock, ParagraphBlock, TableBlock, TableRow};
use regex::Regex;

/// Payment-related labels that consolidate into one two-column table.
const PAYMENT_LABELS: &[&str] = &[
    "Number of Payments Due:",
    "Net Payment Amount:",
    "Unpaid Late Charges:",
    "NSF & Other Fees:",
    "Unapplied/Suspense Funds:",
];

/// The fixed total-due arithmetic appended after a consolidated payment
/// table: cure amount + corporate advance - suspense balance.
const TOTAL_DUE: &str = "Total Due: {Math({[C001]} + {[M585]} - {[M013]}|Money)}";

/// Sentences wrapped in bold wherever they appear verbatim.
const BOLD_SENTENCES: &[&str] = &[
    "Time is of the essence.",
    "If you are in bankruptcy or received a bankruptcy discharge of this debt, \
     this letter is being sent for informational purposes only.",
    "Failure to bring the loan current may result in foreclosure.",
];

const PAYMENT_COLUMN_PCT: u8 = 50;

/// Replace each run of two or more adjacent payment-label paragraphs with
/// a 50/50 two-column table followed by the bold total-due line.
pub fn consolidate_payment_labels(blocks: Vec<FormattedBlock>) -> Vec<FormattedBlock> {
    let mut result = Vec::with_capacity(blocks.len());
    let mut run: Vec<(String, String)> = Vec::new();

    let flush = |run: &mut Vec<(String, String)>, result: &mut Vec<FormattedBlock>| {
        if run.len() >= 2 {
            log::debug!("consolidating {} payment-label blocks into a table", run.len());
            let rows: Vec<TableRow> = run
                .drain(..)
                .map(|(label, value)| TableRow::label_value(label, value, PAYMENT_COLUMN_PCT))
                .collect();
            result.push(FormattedBlock::Table(TableBlock::new(rows)));
            result.push(FormattedBlock::Paragraph(
                ParagraphBlock::new(TOTAL_DUE).bold(),
            ));
        } else {
            for (label, value) in run.drain(..) {
                result.push(FormattedBlock::paragraph(format!("{} {}", label, value)));
            }
        }
    };

    for block in blocks {
        match payment_label_parts(&block) {
            Some(parts) => run.push(parts),
            None => {
                flush(&mut run, &mut result);
                result.push(block);
            }
        }
    }
    flush(&mut run, &mut result);
    result
}

fn payment_label_parts(block: &FormattedBlock) -> Option<(String, String)> {
    let FormattedBlock::Paragraph(p) = block else {
        return None;
    };
    let text = p.text.trim();
    let label = PAYMENT_LABELS.iter().find(|l| text.starts_with(*l))?;
    let value = text[label.len()..].trim().to_string();
    Some((label.to_string(), value))
}

/// Keep exactly one salutation block. When a canonical
/// `Dear {[Salutation]},` block exists, the first one wins and every other
/// "Dear ..." paragraph is removed, on either side of it; otherwise the
/// first variant is kept. Trailing spacers go with the removed blocks.
pub fn dedupe_salutations(blocks: Vec<FormattedBlock>) -> Vec<FormattedBlock> {
    let has_canonical = blocks.iter().any(is_canonical_salutation);
    let mut result = Vec::with_capacity(blocks.len());
    let mut kept = false;
    let mut skip_spacer = false;
    for block in blocks {
        if skip_spacer {
            skip_spacer = false;
            if matches!(block, FormattedBlock::Spacer { .. }) {
                continue;
            }
        }
        let is_salutation = matches!(
            &block,
            FormattedBlock::Paragraph(p) if p.text.trim_start().starts_with("Dear ")
        );
        if is_salutation {
            let keep = !kept && (!has_canonical || is_canonical_salutation(&block));
            if !keep {
                log::debug!("removing duplicate or non-canonical salutation block");
                skip_spacer = true;
                continue;
            }
            kept = true;
        }
        result.push(block);
    }
    result
}

fn is_canonical_salutation(block: &FormattedBlock) -> bool {
    matches!(
        block,
        FormattedBlock::Paragraph(p)
            if p.text.trim() == crate::recognize::salutation::CANONICAL_SALUTATION
    )
}

/// Keep only the first occurrence of the fixed disclosure sentence.
pub fn dedupe_disclosures(blocks: Vec<FormattedBlock>) -> Vec<FormattedBlock> {
    let disclosure = crate::recognize::disclosure::DISCLOSURE;
    let mut result = Vec::with_capacity(blocks.len());
    let mut seen = false;
    for block in blocks {
        let is_disclosure = matches!(
            &block,
            FormattedBlock::Paragraph(p) if p.text.trim() == disclosure
        );
        if is_disclosure {
            if seen {
                continue;
            }
            seen = true;
        }
        result.push(block);
    }
    result
}

/// Wrap each fixed-emphasis sentence in `<b>` exactly once. Already-bolded
/// occurrences are left alone, so the pass is idempotent.
pub fn insert_bold_emphasis(html: &str) -> String {
    let mut result = html.to_string();
    for sentence in BOLD_SENTENCES {
        let bolded = format!("<b>{}</b>", sentence);
        result = result
            .split(&bolded)
            .map(|piece| piece.replace(sentence, &bolded))
            .collect::<Vec<_>>()
            .join(&bolded);
    }
    result
}

/// Repair whitespace artifacts left by earlier removals: runs of spaces
/// and a stray space before punctuation. Tag attributes and placeholder
/// tokens never contain these shapes.
pub fn repair_spacing(html: &str) -> String {
    let double_space = Regex::new(r"([^\s>]) {2,}").unwrap();
    let before_punct = Regex::new(r" +([,.;])").unwrap();
    let collapsed = double_space.replace_all(html, "$1 ");
    before_punct.replace_all(&collapsed, "$1").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_consolidation() {
        let blocks = vec![
            FormattedBlock::paragraph("Number of Payments Due: {[M555]}"),
            FormattedBlock::paragraph("Net Payment Amount: {Money({[M591]})}"),
            FormattedBlock::paragraph("Unpaid Late Charges: {Money({[M592]})}"),
            FormattedBlock::paragraph("Closing text."),
        ];
        let out = consolidate_payment_labels(blocks);
        assert_eq!(out.len(), 3);
        match &out[0] {
            FormattedBlock::Table(t) => {
                assert_eq!(t.rows.len(), 3);
                assert_eq!(t.rows[0].cells[0].text, "Number of Payments Due:");
                assert_eq!(t.rows[0].cells[0].width_pct, Some(50));
                assert_eq!(t.rows[1].cells[1].text, "{Money({[M591]})}");
            }
            other => panic!("expected table, got {:?}", other),
        }
        match &out[1] {
            FormattedBlock::Paragraph(p) => {
                assert!(p.bold);
                assert_eq!(p.text, TOTAL_DUE);
            }
            other => panic!("expected total-due paragraph, got {:?}", other),
        }
    }

    #[test]
    fn test_lone_payment_label_not_consolidated() {
        let blocks = vec![
            FormattedBlock::paragraph("Net Payment Amount: {Money({[M591]})}"),
            FormattedBlock::paragraph("Other text."),
        ];
        let out = consolidate_payment_labels(blocks);
        assert_eq!(out.len(), 2);
        assert!(matches!(&out[0], FormattedBlock::Paragraph(_)));
    }

    #[test]
    fn test_dedupe_salutations_keeps_first() {
        let blocks = vec![
            FormattedBlock::paragraph("Dear {[Salutation]},"),
            FormattedBlock::Spacer { breaks: 2 },
            FormattedBlock::paragraph("Body text."),
            FormattedBlock::paragraph("Dear {[Salutation]},"),
            FormattedBlock::Spacer { breaks: 2 },
            FormattedBlock::paragraph("Dear John and Jane,"),
        ];
        let out = dedupe_salutations(blocks);
        let salutations = out
            .iter()
            .filter(|b| b.plain_text().starts_with("Dear "))
            .count();
        assert_eq!(salutations, 1);
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn test_canonical_salutation_wins_over_earlier_variant() {
        let blocks = vec![
            FormattedBlock::paragraph("Dear valued customer,"),
            FormattedBlock::paragraph("Dear {[Salutation]},"),
            FormattedBlock::Spacer { breaks: 2 },
            FormattedBlock::paragraph("Body text."),
        ];
        let out = dedupe_salutations(blocks);
        assert_eq!(out.len(), 3);
        assert_eq!(out[0].plain_text(), "Dear {[Salutation]},");
    }

    #[test]
    fn test_first_variant_kept_without_canonical() {
        let blocks = vec![
            FormattedBlock::paragraph("Dear valued customer,"),
            FormattedBlock::paragraph("Dear John,"),
        ];
        let out = dedupe_salutations(blocks);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].plain_text(), "Dear valued customer,");
    }

    #[test]
    fn test_bold_emphasis_idempotent() {
        let html = "<div>Time is of the essence.</div>";
        let once = insert_bold_emphasis(html);
        assert_eq!(once, "<div><b>Time is of the essence.</b></div>");
        assert_eq!(insert_bold_emphasis(&once), once);
    }

    #[test]
    fn test_repair_spacing() {
        assert_eq!(repair_spacing("two  spaces , and"), "two spaces, and");
    }

    #[test]
    fn test_dedupe_disclosures() {
        let d = crate::recognize::disclosure::DISCLOSURE;
        let blocks = vec![
            FormattedBlock::paragraph(d),
            FormattedBlock::paragraph("Middle."),
            FormattedBlock::paragraph(d),
        ];
        let out = dedupe_disclosures(blocks);
        assert_eq!(out.len(), 2);
    }
}
