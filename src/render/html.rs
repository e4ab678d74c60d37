//! HTML serialization of formatted blocks.

use super::escape::escape_with_tokens;
use super::options::RenderOptions;
use super::passes;
use crate::error::{Error, Result};
use crate::grammar;
use crate::model::{CenteredBlock, FormattedBlock, ParagraphBlock, TableBlock, TableCell};
use std::collections::HashMap;

const BOX_STYLE: &str = "border: 1px solid rgba(0, 0, 0, 1); padding: 10px;";

/// Serializes formatted blocks to the final HTML string and runs the
/// document-wide passes.
pub struct HtmlAssembler {
    options: RenderOptions,
}

impl HtmlAssembler {
    /// Create an assembler with the given options.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Assemble blocks into one HTML string.
    ///
    /// After assembly the placeholder-preservation check compares the
    /// tokens in the (post-pass) block sequence against the output; a
    /// mismatch is a formatter defect, logged and asserted in debug
    /// builds, but the best-effort HTML is still returned.
    pub fn assemble(&self, blocks: Vec<FormattedBlock>) -> String {
        let blocks = if self.options.document_passes {
            let blocks = passes::consolidate_payment_labels(blocks);
            let blocks = passes::dedupe_salutations(blocks);
            passes::dedupe_disclosures(blocks)
        } else {
            blocks
        };

        let mut html = self.serialize_blocks(&blocks);
        if self.options.document_passes {
            html = passes::insert_bold_emphasis(&html);
            html = passes::repair_spacing(&html);
        }
        if self.options.wrap_container {
            html = format!("<div style=\"width: 100%;\">\n{}\n</div>", html);
        }

        verify_placeholders(&blocks, &html);
        html
    }

    fn serialize_blocks(&self, blocks: &[FormattedBlock]) -> String {
        let mut parts = Vec::with_capacity(blocks.len() * 2);
        for (idx, block) in blocks.iter().enumerate() {
            parts.push(self.serialize_block(block));
            let last = idx + 1 == blocks.len();
            if !last && !block.is_tight() {
                parts.push("<br>".to_string());
            }
        }
        parts.join("\n")
    }

    fn serialize_block(&self, block: &FormattedBlock) -> String {
        match block {
            FormattedBlock::Paragraph(p) => serialize_paragraph(p),
            FormattedBlock::Table(t) => serialize_table(t),
            FormattedBlock::CenteredBlock(c) => serialize_centered(c),
            FormattedBlock::ConditionalSection { predicate, inner } => {
                format!(
                    "<div>{{If({})}}</div>\n{}\n<div>{{End If}}</div>",
                    predicate,
                    self.serialize_blocks(inner)
                )
            }
            FormattedBlock::Spacer { breaks } => "<br>".repeat(usize::from(*breaks)),
        }
    }
}

impl Default for HtmlAssembler {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}

fn serialize_paragraph(p: &ParagraphBlock) -> String {
    let mut content = escape_with_tokens(&p.text);
    if p.italic {
        content = format!("<i>{}</i>", content);
    }
    if p.bold {
        content = format!("<b>{}</b>", content);
    }
    format!("<div>{}</div>", content)
}

fn serialize_table(t: &TableBlock) -> String {
    let mut out = String::from("<table style=\"border-collapse: collapse; width: 100%;\">\n<tbody>\n");
    for row in &t.rows {
        out.push_str("<tr>\n");
        for cell in &row.cells {
            out.push_str(&serialize_cell(cell, t.borderless));
            out.push('\n');
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</tbody>\n</table>");
    out
}

fn serialize_cell(cell: &TableCell, borderless: bool) -> String {
    let mut styles = Vec::new();
    if let Some(pct) = cell.width_pct {
        styles.push(format!("width: {}%;", pct));
    }
    if cell.valign_top {
        styles.push("vertical-align: top;".to_string());
    }
    if cell.center {
        styles.push("text-align: center;".to_string());
    }
    if !borderless {
        styles.push("border: 1px solid rgba(0, 0, 0, 1);".to_string());
    }
    styles.push("padding: 2px;".to_string());

    let mut content = escape_with_tokens(&cell.text);
    if cell.bold {
        content = format!("<b>{}</b>", content);
    }
    format!("<td style=\"{}\">{}</td>", styles.join(" "), content)
}

fn serialize_centered(c: &CenteredBlock) -> String {
    let mut styles = vec!["text-align: center;".to_string()];
    if c.boxed {
        styles.push(BOX_STYLE.to_string());
    }
    if let Some(pt) = c.font_size_pt {
        styles.push(format!("font-size: {}pt;", pt));
    }

    let mut lines = Vec::new();
    if let Some(ref title) = c.title {
        lines.push(format!("<u>{}</u>", escape_with_tokens(title)));
    }
    for line in &c.lines {
        let mut content = escape_with_tokens(line);
        if c.bold {
            content = format!("<b>{}</b>", content);
        }
        lines.push(format!("<div>{}</div>", content));
    }
    format!(
        "<div style=\"{}\">\n{}\n</div>",
        styles.join(" "),
        lines.join("\n")
    )
}

/// Post-condition check: every placeholder token in the block sequence
/// appears in the HTML exactly as many times as in the blocks. A failure
/// is an internal defect; at runtime the best-effort HTML is preferred
/// over refusing output.
fn verify_placeholders(blocks: &[FormattedBlock], html: &str) {
    let mut expected: HashMap<String, usize> = HashMap::new();
    for block in blocks {
        for token in grammar::token_texts(&block.plain_text()) {
            *expected.entry(token).or_insert(0) += 1;
        }
    }
    let mut found: HashMap<String, usize> = HashMap::new();
    for token in grammar::token_texts(html) {
        *found.entry(token).or_insert(0) += 1;
    }
    for (token, count) in &expected {
        let got = found.get(token).copied().unwrap_or(0);
        if got != *count {
            log::error!(
                "placeholder preservation violated: {} expected {} time(s), found {}",
                token,
                count,
                got
            );
            debug_assert_eq!(got, *count, "placeholder preservation violated for {}", token);
        }
    }
}

/// Explicit verification entry point for tests and CI: compare the
/// placeholder tokens of a plain-text source against an HTML output and
/// fail on any count mismatch.
pub fn check_placeholders(source: &str, html: &str) -> Result<()> {
    let mut expected: HashMap<String, usize> = HashMap::new();
    for token in grammar::token_texts(source) {
        *expected.entry(token).or_insert(0) += 1;
    }
    let mut found: HashMap<String, usize> = HashMap::new();
    for token in grammar::token_texts(html) {
        *found.entry(token).or_insert(0) += 1;
    }
    for (token, count) in &expected {
        let got = found.get(token).copied().unwrap_or(0);
        if got != *count {
            return Err(Error::PlaceholderInvariant(format!(
                "{} expected {} time(s), found {}",
                token, count, got
            )));
        }
    }
    Ok(())
}
