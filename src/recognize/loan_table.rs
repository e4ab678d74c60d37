//! Loan/property identifier table recognition.

use super::{compress_value, Recognized, Recognizer};
use crate::classify::DocumentType;
use crate::model::{FormattedBlock, Paragraph, TableBlock, TableRow};

/// Fixed width of the label column.
const LABEL_WIDTH_PCT: u8 = 20;

const LOAN_LABELS: &[&str] = &["Loan Number:", "Mortgage Loan No:"];
const PROPERTY_FIELDS: &[&str] = &["M567", "M583", "M568"];

/// Renders the loan-number / property-address identifier block as a
/// two-column table. Property lines missing from the triggering paragraph
/// are pulled in from the lookahead window.
pub struct LoanTableRecognizer;

fn has_loan_number(para: &Paragraph) -> bool {
    para.contains_field("M594") || LOAN_LABELS.iter().any(|l| para.contains(l))
}

fn has_property(para: &Paragraph) -> bool {
    PROPERTY_FIELDS.iter().any(|f| para.contains_field(f)) || para.contains("Property Address:")
}

impl Recognizer for LoanTableRecognizer {
    fn name(&self) -> &'static str {
        "loan_table"
    }

    fn recognize(&self, window: &[Paragraph], _doc_type: DocumentType) -> Option<Recognized> {
        let first = window.first()?;
        // Reference blocks carry their own loan-number line; those belong
        // to the RE: recognizer.
        if first.text.trim_start().starts_with("RE:") {
            return None;
        }
        if !has_loan_number(first) {
            return None;
        }

        // Property paragraphs must immediately follow the loan-number
        // paragraph; the first non-property paragraph ends the run and is
        // left to the default renderer.
        let consumed = if has_property(first) {
            1
        } else {
            let run = window.iter().skip(1).take_while(|p| has_property(p)).count();
            if run == 0 {
                log::warn!("loan number without adjacent property fields; leaving as text");
                return None;
            }
            run + 1
        };

        let mut table = TableBlock::new(Vec::new());
        for para in &window[..consumed] {
            for line in para.lines().filter(|l| !l.trim().is_empty()) {
                table.add_row(row_for_line(line));
            }
        }
        if table.rows.is_empty() {
            return None;
        }
        Some(Recognized {
            blocks: vec![FormattedBlock::Table(table)],
            consumed,
        })
    }
}

fn row_for_line(line: &str) -> TableRow {
    match line.split_once(':') {
        Some((label, value)) => TableRow::label_value(
            format!("{}:", label.trim()),
            compress_value(value),
            LABEL_WIDTH_PCT,
        ),
        // A bare property line gets the conventional label.
        None => TableRow::label_value("Property Address:", compress_value(line), LABEL_WIDTH_PCT),
    }
}
