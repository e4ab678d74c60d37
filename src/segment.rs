//! Paragraph segmentation and repair.
//!
//! Extraction inserts blank lines mid-sentence and occasionally glues two
//! sections into one paragraph. Segmentation splits on blank lines, then
//! runs a merge pass and a split pass to undo both artifacts. The result is
//! stable: re-segmenting a flattened document finds nothing to repair.

use crate::model::Paragraph;
use crate::recognize::header::HEADER_PHRASES;
use regex::Regex;

/// Line-leading markers that start a new logical section. A paragraph with
/// one of these on an internal line was glued together by extraction and is
/// split; a paragraph starting with one is never merged into its
/// predecessor.
fn section_markers() -> Vec<&'static str> {
    let mut markers = vec!["Dear ", "Loan Number:", "Mortgage Loan No:", "RE:"];
    markers.extend_from_slice(HEADER_PHRASES);
    markers
}

/// Split raw text into a corrected ordered sequence of paragraphs.
pub fn segment(text: &str) -> Vec<Paragraph> {
    let blank_line = Regex::new(r"\r?\n[ \t]*\r?\n+").unwrap();
    let mut paragraphs: Vec<Paragraph> = blank_line
        .split(text)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(Paragraph::new)
        .collect();

    paragraphs = merge_broken_sentences(paragraphs);
    paragraphs = split_glued_sections(paragraphs);
    paragraphs
}

/// Repair pass 1: merge paragraph pairs that a spurious blank line broke
/// mid-sentence. A pair merges when the first ends in a bare word
/// character, the second begins with one, and the first is neither a
/// labeled line (contains a colon) nor a salutation. Paragraphs starting
/// at a section boundary (a marker, or a payment-schedule line) never
/// merge, and a marker paragraph never absorbs its successor; both keep
/// segmentation idempotent after the split pass.
fn merge_broken_sentences(paragraphs: Vec<Paragraph>) -> Vec<Paragraph> {
    let markers = section_markers();
    let schedule_line = Regex::new(r"^\d+(?:st|nd|rd|th)\s+payment\b").unwrap();
    let mut result: Vec<Paragraph> = Vec::with_capacity(paragraphs.len());
    for para in paragraphs {
        let mergeable = match result.last() {
            Some(prev) => {
                ends_in_word_char(&prev.text)
                    && starts_with_word_char(&para.text)
                    && !prev.text.contains(':')
                    && !prev.text.starts_with("Dear ")
                    && !markers.iter().any(|m| prev.text.starts_with(m))
                    && !markers.iter().any(|m| para.text.starts_with(m))
                    && !schedule_line.is_match(para.text.trim_start())
            }
            None => false,
        };
        if mergeable {
            let prev = result.last_mut().expect("checked above");
            log::debug!("merging mid-sentence paragraph break");
            prev.text.push(' ');
            prev.text.push_str(&para.text);
        } else {
            result.push(para);
        }
    }
    result
}

fn ends_in_word_char(text: &str) -> bool {
    text.trim_end()
        .chars()
        .last()
        .is_some_and(|c| c.is_alphanumeric())
}

fn starts_with_word_char(text: &str) -> bool {
    text.trim_start()
        .chars()
        .next()
        .is_some_and(|c| c.is_alphanumeric())
}

/// Repair pass 2: split paragraphs where a section marker starts an
/// internal line, which means two sections were glued into one paragraph.
fn split_glued_sections(paragraphs: Vec<Paragraph>) -> Vec<Paragraph> {
    let markers = section_markers();
    let mut result = Vec::with_capacity(paragraphs.len());
    for para in paragraphs {
        let mut current: Vec<&str> = Vec::new();
        for line in para.text.lines() {
            let starts_section = markers.iter().any(|m| line.trim_start().starts_with(m));
            if starts_section && !current.is_empty() {
                result.push(Paragraph::new(current.join("\n")));
                current = vec![line];
            } else {
                current.push(line);
            }
        }
        if !current.is_empty() {
            result.push(Paragraph::new(current.join("\n")));
        }
    }
    result
}
