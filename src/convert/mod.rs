//! Conversion pipeline and delivery surface.

mod text;

pub use text::PlainTextExtractor;

use crate::canon::FieldCanonicalizer;
use crate::classify::{self, DocumentType};
use crate::error::{Error, Result};
use crate::model::{Document, Paragraph};
use crate::recognize;
use crate::render::{HtmlAssembler, RenderOptions};
use crate::segment;
use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use unicode_normalization::UnicodeNormalization;

/// Options for a conversion.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Explicit document type; when absent the classifier decides.
    pub doc_type: Option<DocumentType>,

    /// Rendering options passed to the assembler.
    pub render: RenderOptions,
}

/// Metadata about a completed conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    /// Classified (or overridden) document type.
    pub doc_type: DocumentType,

    /// Paragraphs after segmentation repair.
    pub paragraph_count: usize,

    /// Formatted blocks before document-wide passes.
    pub block_count: usize,

    /// When the conversion ran.
    pub converted_at: DateTime<Utc>,
}

/// The result of a successful conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertResult {
    /// The assembled HTML.
    pub html: String,

    /// Conversion metadata.
    pub metadata: Metadata,
}

/// The delivery envelope: what callers outside the library receive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertOutcome {
    /// Whether the conversion succeeded.
    pub success: bool,

    /// The HTML, present on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,

    /// The error message, present on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ConvertOutcome {
    /// Serialize the envelope to compact JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| Error::Other(e.to_string()))
    }

    /// Serialize the envelope to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Other(e.to_string()))
    }
}

impl From<Result<ConvertResult>> for ConvertOutcome {
    fn from(result: Result<ConvertResult>) -> Self {
        match result {
            Ok(converted) => Self {
                success: true,
                html: Some(converted.html),
                error: None,
            },
            Err(e) => Self {
                success: false,
                html: None,
                error: Some(e.to_string()),
            },
        }
    }
}

/// Convert extracted document text to HTML.
pub fn convert(text: &str, options: &ConvertOptions) -> Result<ConvertResult> {
    if text.trim().is_empty() {
        return Err(Error::InvalidText("document text is empty".to_string()));
    }
    let text: String = text.nfc().collect();

    let doc_type = match options.doc_type {
        Some(explicit) => explicit,
        None => classify::classify(&text),
    };
    log::debug!("converting as {}", doc_type);

    let canon = FieldCanonicalizer::new();
    let paragraphs: Vec<Paragraph> = segment::segment(&text)
        .into_iter()
        .map(|p| Paragraph::new(canon.apply(&p.text)))
        .filter(|p| !p.is_empty())
        .collect();
    let doc = Document::new(doc_type, paragraphs);

    let blocks = recognize::recognize_document(&doc);
    let block_count = blocks.len();
    let html = HtmlAssembler::new(options.render.clone()).assemble(blocks);

    Ok(ConvertResult {
        html,
        metadata: Metadata {
            doc_type,
            paragraph_count: doc.paragraph_count(),
            block_count,
            converted_at: Utc::now(),
        },
    })
}

/// Convert many independent documents in parallel.
pub fn convert_batch(texts: &[String], options: &ConvertOptions) -> Vec<Result<ConvertResult>> {
    texts
        .par_iter()
        .map(|text| convert(text, options))
        .collect()
}

/// Extracts plain Unicode text from document bytes. Binary Word parsing
/// lives behind this trait in external collaborators; the crate ships a
/// plain-text implementation.
pub trait TextExtractor: Send + Sync {
    /// Name used in logging.
    fn name(&self) -> &'static str;

    /// File extensions (lowercase, no dot) this extractor handles.
    fn extensions(&self) -> &[&'static str];

    /// Extract text from raw file bytes.
    fn extract(&self, bytes: &[u8]) -> Result<String>;
}

/// Registry of text extractors keyed by file extension.
pub struct ExtractorRegistry {
    extractors: HashMap<String, Arc<dyn TextExtractor>>,
}

impl ExtractorRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            extractors: HashMap::new(),
        }
    }

    /// A registry with the built-in extractors.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(PlainTextExtractor));
        registry
    }

    /// Register an extractor for all of its extensions.
    pub fn register(&mut self, extractor: Arc<dyn TextExtractor>) {
        for ext in extractor.extensions() {
            self.extractors
                .insert(ext.to_ascii_lowercase(), Arc::clone(&extractor));
        }
    }

    /// The extractor for a file extension, if any.
    pub fn get(&self, extension: &str) -> Option<Arc<dyn TextExtractor>> {
        self.extractors
            .get(&extension.to_ascii_lowercase())
            .cloned()
    }

    /// Read a file and extract its text through the matching extractor.
    pub fn extract_file(&self, path: &Path) -> Result<String> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        let extractor = self
            .get(&extension)
            .ok_or_else(|| Error::UnsupportedFormat(extension.clone()))?;
        log::debug!("extracting {} with '{}'", path.display(), extractor.name());
        let bytes = std::fs::read(path)?;
        extractor.extract(&bytes)
    }

    /// Extensions with a registered extractor, sorted.
    pub fn supported_extensions(&self) -> Vec<String> {
        let mut extensions: Vec<String> = self.extractors.keys().cloned().collect();
        extensions.sort();
        extensions
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
