//! Remittance address block recognition.

use super::{Recognized, Recognizer};
use crate::classify::DocumentType;
use crate::model::{CenteredBlock, FormattedBlock, Paragraph};

const COMPANY_NAME_FIELDS: &[&str] = &["CompanyShortName", "CompanyLongName"];
const ADDRESS_FIELDS: &[&str] = &["PayoffAddr1", "PayoffAddr2"];

/// Renders the payment-remittance address (company name, Attention line,
/// address lines) as one centered block: all lines join into a single
/// `Compress` call so the downstream engine stacks the non-empty parts.
pub struct AddressRecognizer;

impl Recognizer for AddressRecognizer {
    fn name(&self) -> &'static str {
        "address"
    }

    fn recognize(&self, window: &[Paragraph], _doc_type: DocumentType) -> Option<Recognized> {
        let para = window.first()?;
        let has_company = COMPANY_NAME_FIELDS.iter().any(|f| para.contains_field(f));
        let has_attention = para.contains("Attention:");
        let has_address = ADDRESS_FIELDS.iter().any(|f| para.contains_field(f));
        if !(has_company && has_attention && has_address) {
            return None;
        }

        let parts: Vec<&str> = para
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        if parts.len() < 2 {
            log::warn!("address block with a single line; leaving as text");
            return None;
        }
        let compressed = format!("{{Compress({})}}", parts.join("|"));
        Some(Recognized::single(FormattedBlock::CenteredBlock(
            CenteredBlock::new(vec![compressed]),
        )))
    }
}
