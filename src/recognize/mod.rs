//! Structural recognition: pattern detectors that map paragraphs to
//! formatted blocks.
//!
//! Recognizers are predicate/renderer pairs tried in a fixed priority order
//! per paragraph; the first match wins. A recognizer may consume following
//! paragraphs through a bounded lookahead window. No recognizer fails:
//! anything unmatched falls through to the default paragraph renderer.

pub mod address;
pub mod bullets;
pub mod conditional;
pub mod disclosure;
pub mod header;
pub mod loan_table;
pub mod payment;
pub mod re_block;
pub mod salutation;

use crate::classify::DocumentType;
use crate::grammar;
use crate::model::{Document, FormattedBlock, Paragraph};

/// Maximum number of paragraphs a recognizer may look at beyond the
/// current one.
pub const LOOKAHEAD: usize = 3;

/// A successful recognition: the rendered blocks and how many paragraphs
/// from the window were consumed.
#[derive(Debug)]
pub struct Recognized {
    /// Rendered output blocks, in order.
    pub blocks: Vec<FormattedBlock>,
    /// Paragraphs consumed from the window, counting the current one.
    pub consumed: usize,
}

impl Recognized {
    /// One block rendered from the current paragraph alone.
    pub fn single(block: FormattedBlock) -> Self {
        Self {
            blocks: vec![block],
            consumed: 1,
        }
    }
}

/// A structural pattern detector with its renderer.
pub trait Recognizer {
    /// Name used in pass tracing.
    fn name(&self) -> &'static str;

    /// Try to recognize starting at `window[0]`. The window holds the
    /// current paragraph plus up to [`LOOKAHEAD`] following ones.
    fn recognize(&self, window: &[Paragraph], doc_type: DocumentType) -> Option<Recognized>;
}

fn recognizers() -> Vec<Box<dyn Recognizer>> {
    vec![
        Box::new(conditional::ConditionalRecognizer),
        Box::new(loan_table::LoanTableRecognizer),
        Box::new(re_block::ReBlockRecognizer),
        Box::new(header::HeaderRecognizer),
        Box::new(address::AddressRecognizer),
        Box::new(salutation::SalutationRecognizer),
        Box::new(payment::PaymentRecognizer),
        Box::new(bullets::BulletRecognizer),
        Box::new(disclosure::DisclosureRecognizer),
    ]
}

/// Run the recognizer chain over every paragraph of a document.
pub fn recognize_document(doc: &Document) -> Vec<FormattedBlock> {
    let chain = recognizers();
    let mut blocks = Vec::with_capacity(doc.paragraphs.len());
    let mut i = 0;
    while i < doc.paragraphs.len() {
        let end = (i + 1 + LOOKAHEAD).min(doc.paragraphs.len());
        let window = &doc.paragraphs[i..end];
        match try_chain(&chain, window, doc.doc_type) {
            Some(found) => {
                blocks.extend(found.blocks);
                i += found.consumed.max(1);
            }
            None => {
                blocks.push(default_paragraph(&doc.paragraphs[i]));
                i += 1;
            }
        }
    }
    blocks
}

fn try_chain(
    chain: &[Box<dyn Recognizer>],
    window: &[Paragraph],
    doc_type: DocumentType,
) -> Option<Recognized> {
    for recognizer in chain {
        if let Some(found) = recognizer.recognize(window, doc_type) {
            log::debug!(
                "recognizer '{}' matched, consumed {} paragraph(s)",
                recognizer.name(),
                found.consumed
            );
            return Some(found);
        }
    }
    None
}

/// The fallback renderer: a plain block with internal newlines flattened to
/// single spaces.
pub fn default_paragraph(para: &Paragraph) -> FormattedBlock {
    let text = para
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    FormattedBlock::paragraph(text)
}

/// Join a comma-separated run of simple field tokens into one `Compress`
/// call. Applies only when the value is nothing but field tokens and
/// comma/whitespace separators; anything else (prose, conditionals,
/// existing function calls) is returned verbatim.
pub(crate) fn compress_value(value: &str) -> String {
    let spans = grammar::token_spans(value);
    if spans.len() < 2 {
        return value.trim().to_string();
    }
    let all_simple = spans
        .iter()
        .all(|s| matches!(s.token, grammar::PlaceholderToken::SimpleField { .. }));
    if !all_simple {
        return value.trim().to_string();
    }
    let mut rest = value.to_string();
    for span in spans.iter().rev() {
        rest.replace_range(span.range.clone(), "");
    }
    if !rest.trim().chars().all(|c| c == ',' || c.is_whitespace()) {
        return value.trim().to_string();
    }
    let tokens: Vec<&str> = spans.iter().map(|s| s.text(value)).collect();
    format!("{{Compress({})}}", tokens.join("|"))
}
