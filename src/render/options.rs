//! Rendering options.

use serde::{Deserialize, Serialize};

/// Options for the HTML assembler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Wrap the output in a single container `<div>`. The default emits a
    /// fragment, which is what the review tooling embeds.
    pub wrap_container: bool,

    /// Run the document-wide post-processing passes (payment
    /// consolidation, salutation de-duplication, bold emphasis, spacing
    /// repairs). Disabled only by tests that inspect raw per-paragraph
    /// output.
    pub document_passes: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            wrap_container: false,
            document_passes: true,
        }
    }
}
