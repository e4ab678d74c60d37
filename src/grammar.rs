//! Placeholder grammar: recognition and canonicalization of template tokens.
//!
//! Tokens are never evaluated here. They are recognized so the rest of the
//! pipeline can position them, canonicalize field names, and keep them out
//! of HTML escaping. Resolution happens in a downstream template engine.

use std::ops::Range;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Function names understood by the downstream template engine.
pub const FUNCTION_NAMES: &[&str] = &[
    "Money", "Math", "Compress", "DateAdd", "Date", "Symbol", "Upper", "If", "Insert",
];

/// Field names that are company/contact scoped and require the
/// `plsMatrix.` namespace prefix.
pub const COMPANY_FIELDS: &[&str] = &[
    "CSPhoneNumber",
    "SPOCContactEmail",
    "PayoffAddr1",
    "PayoffAddr2",
    "CompanyShortName",
    "CompanyLongName",
    "CashMgmtDept",
    "LossMitHrs",
    "LoanCounselingPh",
    "SeeReverse",
];

/// Namespace prefix for company-scoped fields.
pub const COMPANY_NAMESPACE: &str = "plsMatrix";

/// A parsed unit of the placeholder grammar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlaceholderToken {
    /// `{[Name]}` or `{[namespace.Name]}`
    SimpleField {
        /// Canonical field name (suffix-stripped)
        name: String,
        /// Optional namespace, e.g. `plsMatrix`
        namespace: Option<String>,
    },

    /// `{FunctionName(arg1|arg2|...)}`
    FunctionCall {
        /// Function name, e.g. `Money`
        name: String,
        /// Pipe-separated arguments, verbatim
        args: Vec<String>,
    },

    /// `{If(predicate)}` opening a conditional block
    ConditionalOpen {
        /// The raw predicate text
        predicate: String,
    },

    /// `{End If}` closing a conditional block
    ConditionalClose,
}

impl PlaceholderToken {
    /// The canonical literal form of this token as it must appear in output.
    pub fn literal(&self) -> String {
        match self {
            PlaceholderToken::SimpleField { name, namespace } => match namespace {
                Some(ns) => format!("{{[{}.{}]}}", ns, name),
                None => format!("{{[{}]}}", name),
            },
            PlaceholderToken::FunctionCall { name, args } => {
                format!("{{{}({})}}", name, args.join("|"))
            }
            PlaceholderToken::ConditionalOpen { predicate } => format!("{{If({})}}", predicate),
            PlaceholderToken::ConditionalClose => "{End If}".to_string(),
        }
    }
}

/// A token occurrence inside a larger string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSpan {
    /// Byte range of the token in the source text, braces included.
    pub range: Range<usize>,
    /// The parsed token.
    pub token: PlaceholderToken,
}

impl TokenSpan {
    /// The raw text of the span.
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.range.clone()]
    }
}

/// Strip the legacy extraction-system suffix from a field name.
///
/// `M591E6` (money format code) and `L011E8` (date format code) both
/// canonicalize by dropping the trailing code: `M591`, `L011`.
pub fn canonical_field_name(name: &str) -> String {
    let re = Regex::new(r"^([A-Z]\d{3})E\d$").unwrap();
    match re.captures(name) {
        Some(caps) => caps[1].to_string(),
        None => name.to_string(),
    }
}

/// Whether a bare field name belongs to the company/contact scope and
/// needs the `plsMatrix.` prefix.
pub fn needs_namespace(name: &str) -> bool {
    COMPANY_FIELDS.contains(&name)
}

/// Match a whole string as a simple field token: `{[Name]}` or
/// `{[namespace.Name]}`. Returns the canonicalized token.
pub fn recognize_field(text: &str) -> Option<PlaceholderToken> {
    let re = Regex::new(r"^\{\[(?:([A-Za-z]+)\.)?([A-Za-z][A-Za-z0-9]*)\]\}$").unwrap();
    let caps = re.captures(text.trim())?;
    let name = canonical_field_name(&caps[2]);
    let namespace = match caps.get(1) {
        Some(ns) => Some(ns.as_str().to_string()),
        None if needs_namespace(&name) => Some(COMPANY_NAMESPACE.to_string()),
        None => None,
    };
    Some(PlaceholderToken::SimpleField { name, namespace })
}

/// Match a whole string as a function call: `FunctionName(arg|arg)` with or
/// without the outer braces. `{End If}` and `End If` are recognized as the
/// conditional close.
pub fn recognize_function(text: &str) -> Option<PlaceholderToken> {
    let trimmed = text.trim();
    let inner = trimmed
        .strip_prefix('{')
        .and_then(|s| s.strip_suffix('}'))
        .unwrap_or(trimmed);
    parse_function(inner)
}

fn parse_function(inner: &str) -> Option<PlaceholderToken> {
    if inner == "End If" {
        return Some(PlaceholderToken::ConditionalClose);
    }
    let open = inner.find('(')?;
    let name = &inner[..open];
    if !FUNCTION_NAMES.contains(&name) {
        return None;
    }
    let body = inner[open + 1..].strip_suffix(')')?;
    if name == "If" {
        return Some(PlaceholderToken::ConditionalOpen {
            predicate: body.to_string(),
        });
    }
    let args = split_args(body);
    Some(PlaceholderToken::FunctionCall {
        name: name.to_string(),
        args,
    })
}

/// Split pipe-separated function arguments, ignoring pipes nested inside
/// inner `{...}` groups.
fn split_args(body: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut depth = 0usize;
    let mut current = String::new();
    for c in body.chars() {
        match c {
            '{' => {
                depth += 1;
                current.push(c);
            }
            '}' => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            '|' if depth == 0 => {
                args.push(std::mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }
    args.push(current);
    args
}

/// Scan a string for all top-level placeholder token spans.
///
/// Brace groups are matched with depth counting, so tokens nested inside a
/// function call or an `If` predicate (`{If('{[M559]}'<>'')}`) belong to
/// the enclosing span. Brace groups that do not parse as grammar tokens are
/// not spans; they are ordinary text.
pub fn token_spans(text: &str) -> Vec<TokenSpan> {
    let bytes = text.as_bytes();
    let mut spans = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'{' {
            i += 1;
            continue;
        }
        match matching_brace(bytes, i) {
            Some(end) => {
                let raw = &text[i..=end];
                let inner = &raw[1..raw.len() - 1];
                let token = if inner.starts_with('[') {
                    recognize_field(raw)
                } else {
                    parse_function(inner)
                };
                if let Some(token) = token {
                    spans.push(TokenSpan {
                        range: i..end + 1,
                        token,
                    });
                    i = end + 1;
                    continue;
                }
                // Unrecognized brace group: step past the opening brace and
                // keep scanning so inner tokens are still found.
                i += 1;
            }
            // Unbalanced braces pass through verbatim.
            None => i += 1,
        }
    }
    spans
}

fn matching_brace(bytes: &[u8], start: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (offset, &b) in bytes[start..].iter().enumerate() {
        match b {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(start + offset);
                }
            }
            _ => {}
        }
    }
    None
}

/// Collect the literal text of every top-level token in a string, in order.
/// Used by the placeholder-preservation check.
pub fn token_texts(text: &str) -> Vec<String> {
    token_spans(text)
        .iter()
        .map(|s| s.text(text).to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognize_simple_field() {
        let token = recognize_field("{[M594]}").unwrap();
        assert_eq!(
            token,
            PlaceholderToken::SimpleField {
                name: "M594".into(),
                namespace: None,
            }
        );
    }

    #[test]
    fn test_recognize_namespaced_field() {
        let token = recognize_field("{[plsMatrix.CSPhoneNumber]}").unwrap();
        assert_eq!(
            token,
            PlaceholderToken::SimpleField {
                name: "CSPhoneNumber".into(),
                namespace: Some("plsMatrix".into()),
            }
        );
    }

    #[test]
    fn test_bare_company_field_gets_namespace() {
        let token = recognize_field("{[CompanyShortName]}").unwrap();
        assert_eq!(token.literal(), "{[plsMatrix.CompanyShortName]}");
    }

    #[test]
    fn test_suffix_stripping() {
        assert_eq!(canonical_field_name("M591E6"), "M591");
        assert_eq!(canonical_field_name("L011E8"), "L011");
        assert_eq!(canonical_field_name("M594"), "M594");
        // Not a legacy code shape
        assert_eq!(canonical_field_name("Salutation"), "Salutation");
    }

    #[test]
    fn test_suffix_stripping_idempotent() {
        let once = canonical_field_name("M591E6");
        assert_eq!(canonical_field_name(&once), once);
    }

    #[test]
    fn test_recognize_money_function() {
        let token = recognize_function("{Money({[M591]})}").unwrap();
        assert_eq!(
            token,
            PlaceholderToken::FunctionCall {
                name: "Money".into(),
                args: vec!["{[M591]}".into()],
            }
        );
    }

    #[test]
    fn test_recognize_math_with_format_specifier() {
        let token = recognize_function("Math({[C001]} + {[M585]} - {[M013]}|Money)").unwrap();
        match token {
            PlaceholderToken::FunctionCall { name, args } => {
                assert_eq!(name, "Math");
                assert_eq!(args.len(), 2);
                assert_eq!(args[1], "Money");
            }
            other => panic!("expected function call, got {:?}", other),
        }
    }

    #[test]
    fn test_recognize_compress_args() {
        let token = recognize_function("{Compress({[M567]}|{[M583]}|{[M568]})}").unwrap();
        match token {
            PlaceholderToken::FunctionCall { name, args } => {
                assert_eq!(name, "Compress");
                assert_eq!(args, vec!["{[M567]}", "{[M583]}", "{[M568]}"]);
            }
            other => panic!("expected function call, got {:?}", other),
        }
    }

    #[test]
    fn test_recognize_conditional() {
        let token = recognize_function("{If('{[M559]}'<>'')}").unwrap();
        assert_eq!(
            token,
            PlaceholderToken::ConditionalOpen {
                predicate: "'{[M559]}'<>''".into(),
            }
        );
        assert_eq!(
            recognize_function("{End If}").unwrap(),
            PlaceholderToken::ConditionalClose
        );
    }

    #[test]
    fn test_unknown_function_rejected() {
        assert!(recognize_function("{Frobnicate(a|b)}").is_none());
    }

    #[test]
    fn test_token_spans_nested() {
        let text = "pay {Money({[M591]})} by {[U027]} now";
        let spans = token_spans(text);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].text(text), "{Money({[M591]})}");
        assert_eq!(spans[1].text(text), "{[U027]}");
    }

    #[test]
    fn test_token_spans_conditional_predicate_is_one_span() {
        let text = "{[M558]}{If('{[M559]}'<>'')} and {[M559]}{End If}";
        let spans = token_spans(text);
        let texts: Vec<_> = spans.iter().map(|s| s.text(text)).collect();
        assert_eq!(
            texts,
            vec!["{[M558]}", "{If('{[M559]}'<>'')}", "{[M559]}", "{End If}"]
        );
    }

    #[test]
    fn test_token_spans_unbalanced_passes_through() {
        let text = "broken {Money({[M591]} token";
        let spans = token_spans(text);
        // The unterminated call is not a span, but the inner field is.
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text(text), "{[M591]}");
    }

    #[test]
    fn test_non_token_braces_ignored() {
        let text = "a set {1, 2, 3} of numbers";
        assert!(token_spans(text).is_empty());
    }
}
