//! Formatted output blocks, the unit of HTML assembly.

use serde::{Deserialize, Serialize};

/// The output unit produced by structural recognition. The HTML assembler
/// owns the serialization of each variant to markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FormattedBlock {
    /// A plain or styled paragraph div.
    Paragraph(ParagraphBlock),

    /// A table of label/value or bullet rows.
    Table(TableBlock),

    /// A centered block of stacked lines (headers, address blocks,
    /// payment schedules).
    CenteredBlock(CenteredBlock),

    /// Blocks wrapped in an `{If(...)} ... {End If}` conditional.
    ConditionalSection {
        /// Raw predicate of the `If` token
        predicate: String,
        /// Blocks inside the conditional
        inner: Vec<FormattedBlock>,
    },

    /// Extra vertical spacing (consecutive `<br>` tags).
    Spacer {
        /// Number of line breaks
        breaks: u8,
    },
}

impl FormattedBlock {
    /// A plain paragraph block.
    pub fn paragraph(text: impl Into<String>) -> Self {
        FormattedBlock::Paragraph(ParagraphBlock::new(text))
    }

    /// Plain-text view of the block, used for the segmentation idempotence
    /// property and the placeholder-preservation check.
    pub fn plain_text(&self) -> String {
        match self {
            FormattedBlock::Paragraph(p) => p.text.clone(),
            FormattedBlock::Table(t) => t.plain_text(),
            FormattedBlock::CenteredBlock(c) => c.plain_text(),
            FormattedBlock::ConditionalSection { predicate, inner } => {
                let body = inner
                    .iter()
                    .map(|b| b.plain_text())
                    .collect::<Vec<_>>()
                    .join("\n");
                format!("{{If({})}}\n{}\n{{End If}}", predicate, body)
            }
            FormattedBlock::Spacer { .. } => String::new(),
        }
    }

    /// Whether the assembler should omit the `<br>` separator after this
    /// block (consolidated payment lines, spacers).
    pub fn is_tight(&self) -> bool {
        match self {
            FormattedBlock::Paragraph(p) => p.tight,
            FormattedBlock::Spacer { .. } => true,
            _ => false,
        }
    }
}

/// A paragraph destined for a `<div>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParagraphBlock {
    /// Paragraph text, placeholder tokens intact.
    pub text: String,

    /// Wrap the whole paragraph in `<b>`.
    pub bold: bool,

    /// Wrap the whole paragraph in `<i>`.
    pub italic: bool,

    /// Suppress the `<br>` separator after this block.
    pub tight: bool,
}

impl ParagraphBlock {
    /// Create a plain paragraph block.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
            italic: false,
            tight: false,
        }
    }

    /// Set bold and return self.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Set italic and return self.
    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Suppress the trailing separator and return self.
    pub fn tight(mut self) -> Self {
        self.tight = true;
        self
    }
}

/// A table block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableBlock {
    /// Rows in the table.
    pub rows: Vec<TableRow>,

    /// Suppress cell borders (RE: blocks).
    pub borderless: bool,
}

impl TableBlock {
    /// Create a table from rows.
    pub fn new(rows: Vec<TableRow>) -> Self {
        Self {
            rows,
            borderless: false,
        }
    }

    /// Create a borderless table.
    pub fn borderless(rows: Vec<TableRow>) -> Self {
        Self {
            rows,
            borderless: true,
        }
    }

    /// Add a row.
    pub fn add_row(&mut self, row: TableRow) {
        self.rows.push(row);
    }

    /// Plain-text view, one row per line, cells tab-separated.
    pub fn plain_text(&self) -> String {
        self.rows
            .iter()
            .map(|r| {
                r.cells
                    .iter()
                    .map(|c| c.text.as_str())
                    .collect::<Vec<_>>()
                    .join("\t")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    /// Cells in the row.
    pub cells: Vec<TableCell>,
}

impl TableRow {
    /// Create a row from cells.
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self { cells }
    }

    /// A label/value pair with a fixed-width bold label column.
    pub fn label_value(label: impl Into<String>, value: impl Into<String>, width_pct: u8) -> Self {
        Self::new(vec![
            TableCell::new(label).width(width_pct).bold(),
            TableCell::new(value),
        ])
    }
}

/// A table cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCell {
    /// Cell content, placeholder tokens intact.
    pub text: String,

    /// Column width percentage, if fixed.
    pub width_pct: Option<u8>,

    /// Bold cell content.
    pub bold: bool,

    /// Anchor the cell content to the top of the row.
    pub valign_top: bool,

    /// Center the cell content (bullet cells).
    pub center: bool,
}

impl TableCell {
    /// Create a cell with text content.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            width_pct: None,
            bold: false,
            valign_top: false,
            center: false,
        }
    }

    /// Set width percentage and return self.
    pub fn width(mut self, pct: u8) -> Self {
        self.width_pct = Some(pct);
        self
    }

    /// Set bold and return self.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Set top vertical alignment and return self.
    pub fn valign_top(mut self) -> Self {
        self.valign_top = true;
        self
    }

    /// Set centered alignment and return self.
    pub fn center(mut self) -> Self {
        self.center = true;
        self
    }
}

/// A centered block of stacked lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CenteredBlock {
    /// Optional underlined title line.
    pub title: Option<String>,

    /// Lines of the block, top to bottom.
    pub lines: Vec<String>,

    /// Bold the lines.
    pub bold: bool,

    /// Draw a border box around the block (payment schedules).
    pub boxed: bool,

    /// Font size override in points (header variants).
    pub font_size_pt: Option<u8>,
}

impl CenteredBlock {
    /// Create a centered block from lines.
    pub fn new(lines: Vec<String>) -> Self {
        Self {
            title: None,
            lines,
            bold: false,
            boxed: false,
            font_size_pt: None,
        }
    }

    /// A single centered bold line (document headers).
    pub fn header(text: impl Into<String>) -> Self {
        Self {
            title: None,
            lines: vec![text.into()],
            bold: true,
            boxed: false,
            font_size_pt: None,
        }
    }

    /// Set the underlined title and return self.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Enable the border box and return self.
    pub fn boxed(mut self) -> Self {
        self.boxed = true;
        self
    }

    /// Set the font size and return self.
    pub fn font_size(mut self, pt: u8) -> Self {
        self.font_size_pt = Some(pt);
        self
    }

    /// Plain-text view, title first.
    pub fn plain_text(&self) -> String {
        let mut lines = Vec::new();
        if let Some(ref title) = self.title {
            lines.push(title.clone());
        }
        lines.extend(self.lines.iter().cloned());
        lines.join("\n")
    }
}
