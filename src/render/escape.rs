//! Token-aware HTML escaping.

use crate::grammar;

/// Entity-escape HTML-special characters in free text while leaving
/// recognized placeholder tokens byte-for-byte intact. Conditional
/// predicates legitimately contain `<>`, so escaping inside a token span
/// would corrupt the template.
pub fn escape_with_tokens(text: &str) -> String {
    let spans = grammar::token_spans(text);
    let mut out = String::with_capacity(text.len() + 16);
    let mut pos = 0;
    for span in &spans {
        escape_into(&mut out, &text[pos..span.range.start]);
        out.push_str(span.text(text));
        pos = span.range.end;
    }
    escape_into(&mut out, &text[pos..]);
    out
}

fn escape_into(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}
