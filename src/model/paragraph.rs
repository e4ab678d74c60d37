//! Paragraph type produced by segmentation.

use serde::{Deserialize, Serialize};

/// A contiguous run of text between blank-line separators, after
/// segmentation repair. Paragraphs are consumed, not mutated, by rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Raw paragraph text. Internal single newlines are significant for
    /// structural recognition (payment schedules, address blocks).
    pub text: String,
}

impl Paragraph {
    /// Create a paragraph from text.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Lines of the paragraph, trimmed of trailing whitespace.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines().map(|l| l.trim_end())
    }

    /// Number of non-empty lines.
    pub fn line_count(&self) -> usize {
        self.lines().filter(|l| !l.trim().is_empty()).count()
    }

    /// Whether the paragraph has no visible content.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Whether the paragraph contains the given field token, with or
    /// without a legacy suffix (`{[M591]}` matches `{[M591E6]}` too).
    pub fn contains_field(&self, name: &str) -> bool {
        crate::grammar::token_spans(&self.text).iter().any(|span| {
            matches!(
                &span.token,
                crate::grammar::PlaceholderToken::SimpleField { name: n, .. } if n == name
            )
        })
    }

    /// Whether the paragraph text contains the given literal.
    pub fn contains(&self, needle: &str) -> bool {
        self.text.contains(needle)
    }
}

impl From<&str> for Paragraph {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}
