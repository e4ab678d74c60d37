//! Plain-text extraction.

use super::TextExtractor;
use crate::error::{Error, Result};

/// Extractor for already-extracted `.txt` input. Strips a UTF-8 BOM and
/// normalizes line endings.
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn name(&self) -> &'static str {
        "plain-text"
    }

    fn extensions(&self) -> &[&'static str] {
        &["txt"]
    }

    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| Error::Extraction(format!("input is not valid UTF-8: {}", e)))?;
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        Ok(text.replace("\r\n", "\n"))
    }
}
