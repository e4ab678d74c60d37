//! `RE:` reference block recognition.

use super::{compress_value, Recognized, Recognizer};
use crate::classify::DocumentType;
use crate::model::{FormattedBlock, Paragraph, TableBlock, TableCell, TableRow};

/// Fixed width of the `RE:` label column.
const LABEL_WIDTH_PCT: u8 = 20;

/// Renders the `RE:` reference block (mortgagor names, loan number,
/// property address) as a borderless label/value table. The label appears
/// on the first row only; continuation lines get an empty label cell.
pub struct ReBlockRecognizer;

impl Recognizer for ReBlockRecognizer {
    fn name(&self) -> &'static str {
        "re_block"
    }

    fn recognize(&self, window: &[Paragraph], _doc_type: DocumentType) -> Option<Recognized> {
        let para = window.first()?;
        if !para.text.trim_start().starts_with("RE:") {
            return None;
        }

        let mut rows = Vec::new();
        for (idx, line) in para.lines().filter(|l| !l.trim().is_empty()).enumerate() {
            let value = if idx == 0 {
                line.trim_start().trim_start_matches("RE:").trim()
            } else {
                line.trim()
            };
            let label = if idx == 0 { "RE:" } else { "" };
            rows.push(TableRow::new(vec![
                TableCell::new(label).width(LABEL_WIDTH_PCT).bold().valign_top(),
                TableCell::new(compress_labeled(value)),
            ]));
        }
        if rows.is_empty() {
            return None;
        }
        Some(Recognized::single(FormattedBlock::Table(
            TableBlock::borderless(rows),
        )))
    }
}

/// Compress multi-token value lines; keep `Label: value` lines whole so
/// the label text survives inside the cell.
fn compress_labeled(value: &str) -> String {
    match value.split_once(':') {
        Some((label, rest)) => format!("{}: {}", label.trim(), compress_value(rest)),
        None => compress_value(value),
    }
}
