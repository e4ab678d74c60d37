//! # letterform
//!
//! Template-aware conversion of extracted letter text into house-style
//! HTML. The input is plain Unicode text carrying placeholder tokens
//! (`{[M594]}`, `{Money(...)}`, `{If(...)} ... {End If}`); the output is an
//! HTML fragment using a small fixed tag vocabulary. Tokens are positioned
//! and canonicalized, never evaluated: a downstream template engine
//! resolves them.
//!
//! The pipeline: classify the document type from signature phrases,
//! segment and repair paragraphs, canonicalize field syntax, run the
//! structural recognizers (identifier tables, headers, address blocks,
//! payment schedules, bullets, conditionals), then assemble HTML and apply
//! the document-wide passes.
//!
//! ## Example
//!
//! ```
//! let text = "Loan Number: {[M594]}\nProperty Address: {[M567]}, {[M583]}, {[M568]}";
//! let html = letterform::convert_text(text).unwrap();
//! assert!(html.contains("{Compress({[M567]}|{[M583]}|{[M568]})}"));
//! ```

pub mod canon;
pub mod classify;
pub mod convert;
pub mod error;
pub mod grammar;
pub mod model;
pub mod recognize;
pub mod render;
pub mod segment;

pub use classify::{classify, DocumentType};
pub use convert::{
    convert, convert_batch, ConvertOptions, ConvertOutcome, ConvertResult, ExtractorRegistry,
    Metadata, PlainTextExtractor, TextExtractor,
};
pub use error::{Error, Result};
pub use render::{check_placeholders, RenderOptions};

/// Convert extracted text to HTML with default options.
pub fn convert_text(text: &str) -> Result<String> {
    convert(text, &ConvertOptions::default()).map(|r| r.html)
}

/// Convert extracted text to HTML with explicit options.
pub fn convert_text_with_options(text: &str, options: &ConvertOptions) -> Result<String> {
    convert(text, options).map(|r| r.html)
}

/// Builder-style entry point for configured conversions.
///
/// ```
/// use letterform::{DocumentType, Letterform};
///
/// let html = Letterform::new()
///     .doc_type(DocumentType::Br010)
///     .convert("{[tagHeader]}\n\nDear {[Salutation]},")
///     .unwrap()
///     .html;
/// assert!(html.contains("{Insert(H003 TagHeader)}"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Letterform {
    options: ConvertOptions,
}

impl Letterform {
    /// A converter with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Force the document type instead of classifying.
    pub fn doc_type(mut self, doc_type: DocumentType) -> Self {
        self.options.doc_type = Some(doc_type);
        self
    }

    /// Wrap the output in a container `<div>`.
    pub fn wrap_container(mut self, wrap: bool) -> Self {
        self.options.render.wrap_container = wrap;
        self
    }

    /// Enable or disable the document-wide post-processing passes.
    pub fn document_passes(mut self, enabled: bool) -> Self {
        self.options.render.document_passes = enabled;
        self
    }

    /// Convert extracted text.
    pub fn convert(&self, text: &str) -> Result<ConvertResult> {
        convert(text, &self.options)
    }

    /// Convert many documents in parallel.
    pub fn convert_batch(&self, texts: &[String]) -> Vec<Result<ConvertResult>> {
        convert_batch(texts, &self.options)
    }
}
