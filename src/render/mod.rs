//! HTML assembly of recognized blocks.

mod escape;
mod html;
mod options;
mod passes;

pub use escape::escape_with_tokens;
pub use html::{check_placeholders, HtmlAssembler};
pub use options::RenderOptions;
pub use passes::{insert_bold_emphasis, repair_spacing};
