//! Error types for the letterform library.

use std::io;
use thiserror::Error;

/// Result type alias for letterform operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during document conversion.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The external extraction step could not produce text from the input.
    #[error("Extraction failed: {0}")]
    Extraction(String),

    /// No extractor is registered for the given file extension.
    #[error("Unsupported input format: {0}")]
    UnsupportedFormat(String),

    /// The extracted text is not valid for conversion (e.g. empty).
    #[error("Invalid document text: {0}")]
    InvalidText(String),

    /// A placeholder token from the input is missing or duplicated in the
    /// output. Raised only by the explicit verification entry point; the
    /// normal conversion path logs and returns best-effort HTML instead.
    #[error("Placeholder invariant violated: {0}")]
    PlaceholderInvariant(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}
