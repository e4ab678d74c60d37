//! Field canonicalization: pure text-to-text rewrites applied to each
//! paragraph before structural recognition.
//!
//! Each rewrite is a separate pass; `FieldCanonicalizer::apply` composes
//! them in a fixed order. All passes are deterministic and idempotent.

use crate::grammar::{self, COMPANY_FIELDS};
use regex::Regex;

/// Source-system field descriptions that may trail a token in parentheses.
/// This is a closed list: a closed parenthetical is removed only when its
/// content equals one of these descriptions exactly. Anything else
/// ("(the Property)", "(State law may ...)") is genuine document content
/// and is preserved. Unclosed descriptions at line end match by prefix,
/// since the extractor drops the closing parenthesis there.
const DESCRIPTION_PHRASES: &[&str] = &[
    "Company Address Line 1",
    "Company Address Line 2",
    "Company Address Line 3",
    "System Date",
    "New Bill Line 1/ Mortgagor Name",
    "New Bill Line 2/Second Mortgagor",
    "New Bill Line 3/Third Mortgagor",
    "Additional Mailing Address",
    "Mailing Street Address",
    "Mailing City",
    "State",
    "5-Digit Zip",
    "4-Digit Zip",
    "Loan Number – No Dash",
    "Property Line 1/Street Address",
    "New Property Unit Number",
    "New Property Line 2/City State and Zip Code",
    "Delinquent Payment Count",
    "Delinquent Balance",
    "Late Fee Date",
    "Late Charge Fee",
    "Last Day This Month",
    "Today Plus 30 Days",
    "Foreign Address Indicator = 1",
    "Foreign Country Code",
    "Foreign Postal Code",
    "Total Amount Due",
    "Mtgr Rec Corp Adv Bal",
    "Total Monthly Payment",
    "Suspense Balance",
    "Accrued Late Charge Bal",
    "NSF Balance",
    "NSF Balance + Other Fees",
    "Other Fees",
    "Mortgagor Name",
    "Second Mortgagor",
];

/// Optional-middle-field triples and the guard field controlling the
/// middle. This is configuration, not inference: the association is fixed
/// by paragraph position in the source templates.
const OPTIONAL_TRIPLES: &[(&str, &str, &str, &str)] = &[
    // property street, unit number, city/state/zip; unit is optional
    ("M567", "M583", "M568", "M583"),
    // first, second, third mortgagor name lines; second is optional
    ("M558", "M559", "M560", "M559"),
];

/// Canonicalizes field syntax in paragraph text.
pub struct FieldCanonicalizer {
    suffix_re: Regex,
    money_re: Regex,
    dateadd_re: Regex,
    namespace_res: Vec<(Regex, String)>,
    triple_res: Vec<(Regex, String)>,
    name_pair_re: Regex,
    double_space_re: Regex,
    space_before_punct_re: Regex,
}

impl FieldCanonicalizer {
    /// Build the canonicalizer, compiling all pass patterns.
    pub fn new() -> Self {
        let namespace_res = COMPANY_FIELDS
            .iter()
            .map(|name| {
                (
                    Regex::new(&format!(r"\{{\[{}\]\}}", name)).unwrap(),
                    format!("{{[plsMatrix.{}]}}", name),
                )
            })
            .collect();

        let triple_res = OPTIONAL_TRIPLES
            .iter()
            .map(|(a, b, c, guard)| {
                let pattern = format!(
                    r"\{{\[{a}\]\}},\s*\{{\[{b}\]\}},\s*\{{\[{c}\]\}}",
                    a = a,
                    b = b,
                    c = c
                );
                let replacement = format!(
                    "{{[{a}]}},{{If('{{[{g}]}}'<>'')}} {{[{b}]}},{{End If}} {{[{c}]}}",
                    a = a,
                    b = b,
                    c = c,
                    g = guard
                );
                (Regex::new(&pattern).unwrap(), replacement)
            })
            .collect();

        Self {
            suffix_re: Regex::new(r"\{\[([A-Z]\d{3})E\d\]\}").unwrap(),
            money_re: Regex::new(r"\$\s*(\{\[[A-Za-z][A-Za-z0-9.]*\]\})").unwrap(),
            dateadd_re: Regex::new(r"(?i)(\{\[[A-Z]\d{3}\]\})\s+plus\s+(\d+)\s+days").unwrap(),
            namespace_res,
            triple_res,
            name_pair_re: Regex::new(r"\{\[M558\]\} and \{\[M559\]\}").unwrap(),
            double_space_re: Regex::new(r"[ \t]{2,}").unwrap(),
            space_before_punct_re: Regex::new(r" +([,.;:])").unwrap(),
        }
    }

    /// Apply all canonicalization passes in order.
    pub fn apply(&self, text: &str) -> String {
        let mut result = self.strip_descriptions(text);
        result = self.strip_directive_lines(&result);
        result = self.strip_suffixes(&result);
        result = self.insert_namespaces(&result);
        result = self.normalize_money(&result);
        result = self.normalize_dateadd(&result);
        result = self.rewrite_optional_triples(&result);
        self.tidy_spacing(&result)
    }

    /// Remove the first parenthetical group after each token when it is a
    /// known field description. Unclosed descriptions (the extractor drops
    /// the closing parenthesis at line end) are removed to end of line.
    fn strip_descriptions(&self, text: &str) -> String {
        let spans = grammar::token_spans(text);
        if spans.is_empty() {
            return text.to_string();
        }

        let mut result = String::with_capacity(text.len());
        let mut pos = 0;
        for span in &spans {
            if span.range.start < pos {
                continue;
            }
            result.push_str(&text[pos..span.range.end]);
            pos = span.range.end;

            let rest = &text[pos..];
            let after_ws = rest.len() - rest.trim_start_matches([' ', '\t']).len();
            let candidate = &rest[after_ws..];
            if let Some(stripped) = candidate.strip_prefix('(') {
                let content_end = stripped
                    .find(')')
                    .or_else(|| stripped.find('\n'))
                    .unwrap_or(stripped.len());
                let content = stripped[..content_end].trim();
                let closed = stripped[content_end..].starts_with(')');
                if is_description(content, closed) {
                    pos += after_ws + 1 + content_end + usize::from(closed);
                }
            }
        }
        result.push_str(&text[pos..]);
        result
    }

    /// Drop whole lines that are extraction-side directives, never letter
    /// content: business-rule references and inline branch annotations.
    fn strip_directive_lines(&self, text: &str) -> String {
        let kept: Vec<&str> = text
            .lines()
            .filter(|line| {
                let t = line.trim();
                let directive = (t.starts_with("(see \"") && t.ends_with(')'))
                    || (t.starts_with("(IF ") && t.ends_with(')'))
                    || t.starts_with("(\"OR\"");
                !directive
            })
            .collect();
        kept.join("\n")
    }

    fn strip_suffixes(&self, text: &str) -> String {
        self.suffix_re.replace_all(text, "{[$1]}").to_string()
    }

    fn insert_namespaces(&self, text: &str) -> String {
        let mut result = text.to_string();
        for (re, replacement) in &self.namespace_res {
            result = re.replace_all(&result, replacement.as_str()).to_string();
        }
        result
    }

    /// `${[M591]}` becomes `{Money({[M591]})}`.
    fn normalize_money(&self, text: &str) -> String {
        self.money_re.replace_all(text, "{Money($1)}").to_string()
    }

    /// `{[L001]} plus 30 days` becomes a canonical DateAdd call with
    /// explicit unit and format arguments.
    fn normalize_dateadd(&self, text: &str) -> String {
        self.dateadd_re
            .replace_all(text, "{DateAdd($1|$2|Days|MMMM d, yyyy)}")
            .to_string()
    }

    /// Labeled lines (containing a colon) are skipped: triples there belong
    /// to loan/property tables and are compressed by the recognizers, not
    /// made conditional.
    fn rewrite_optional_triples(&self, text: &str) -> String {
        text.lines()
            .map(|line| {
                if line.contains(':') {
                    return line.to_string();
                }
                let mut rewritten = line.to_string();
                for (re, replacement) in &self.triple_res {
                    rewritten = re.replace_all(&rewritten, replacement.as_str()).to_string();
                }
                self.name_pair_re
                    .replace_all(
                        &rewritten,
                        "{[M558]}{If('{[M559]}'<>'')} and {[M559]}{End If}",
                    )
                    .to_string()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Collapse artifacts left by removals: runs of spaces and a stray
    /// space before punctuation.
    fn tidy_spacing(&self, text: &str) -> String {
        let result = self.double_space_re.replace_all(text, " ");
        let result = self.space_before_punct_re.replace_all(&result, "$1");
        result
            .lines()
            .map(str::trim_end)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for FieldCanonicalizer {
    fn default() -> Self {
        Self::new()
    }
}

fn is_description(content: &str, closed: bool) -> bool {
    if closed {
        DESCRIPTION_PHRASES.iter().any(|p| content == *p)
    } else {
        DESCRIPTION_PHRASES.iter().any(|p| content.starts_with(p))
    }
}
