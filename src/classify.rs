//! Document type classification from signature phrases.

use serde::{Deserialize, Serialize};

/// Letter template families recognized by the formatter.
///
/// The type selects the structural-recognizer profile and the header token
/// used at the top of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// Notice of breach / default on note and mortgage
    Sd002,
    /// Trial period plan notification
    Lm060,
    /// Notice of breach with demand-notice expiry (refinement of SD002)
    Ct102,
    /// Notice of intention to foreclose
    Br010,
    /// Privacy policy / FACTS form
    PrivacyForm,
    /// No signature phrase matched
    Generic,
}

impl DocumentType {
    /// The header token this template family uses.
    pub fn header_token(&self) -> &'static str {
        match self {
            DocumentType::Br010 | DocumentType::Ct102 => "{Insert(H003 TagHeader)}",
            _ => "{[tagHeader]}",
        }
    }

    /// Short code for logging and metadata.
    pub fn code(&self) -> &'static str {
        match self {
            DocumentType::Sd002 => "SD002",
            DocumentType::Lm060 => "LM060",
            DocumentType::Ct102 => "CT102",
            DocumentType::Br010 => "BR010",
            DocumentType::PrivacyForm => "PRIVACY",
            DocumentType::Generic => "GENERIC",
        }
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for DocumentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "SD002" => Ok(DocumentType::Sd002),
            "LM060" => Ok(DocumentType::Lm060),
            "CT102" => Ok(DocumentType::Ct102),
            "BR010" => Ok(DocumentType::Br010),
            "PRIVACY" | "PRIVACYFORM" => Ok(DocumentType::PrivacyForm),
            "GENERIC" => Ok(DocumentType::Generic),
            other => Err(format!("unknown document type: {}", other)),
        }
    }
}

/// Ordered classification rules. A rule matches when ALL of its phrases are
/// present. CT102 precedes SD002 because its phrase set is a strict
/// superset of SD002's.
const RULES: &[(&[&str], DocumentType)] = &[
    (&["Trial Period Plan"], DocumentType::Lm060),
    (
        &[
            "Notice of Breach",
            "default under the Note and Mortgage",
            "Demand Notice expires",
        ],
        DocumentType::Ct102,
    ),
    (
        &["Notice of Breach", "default under the Note and Mortgage"],
        DocumentType::Sd002,
    ),
    (&["Notice of Intention to Foreclose"], DocumentType::Br010),
    (&["Privacy Policy"], DocumentType::PrivacyForm),
    (&["FACTS"], DocumentType::PrivacyForm),
];

/// Classify raw extracted text into a document type.
///
/// Total and deterministic: the first rule whose phrases are all present
/// wins; no match yields [`DocumentType::Generic`].
pub fn classify(text: &str) -> DocumentType {
    for (phrases, doc_type) in RULES {
        if phrases.iter().all(|p| text.contains(p)) {
            log::debug!("classified as {}", doc_type);
            return *doc_type;
        }
    }
    log::debug!("no signature phrase matched; classified as GENERIC");
    DocumentType::Generic
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_sd002() {
        let text = "Notice of Breach\n\nYou are in default under the Note and Mortgage.";
        assert_eq!(classify(text), DocumentType::Sd002);
    }

    #[test]
    fn test_classify_ct102_refines_sd002() {
        let text = "Notice of Breach\n\nYou are in default under the Note and Mortgage.\n\n\
                    Demand Notice expires {[L011]}.";
        assert_eq!(classify(text), DocumentType::Ct102);
    }

    #[test]
    fn test_classify_br010() {
        let text = "Notice of Intention to Foreclose Mortgage\n\nDear {[Salutation]},";
        assert_eq!(classify(text), DocumentType::Br010);
    }

    #[test]
    fn test_classify_lm060() {
        let text = "Trial Period Plan\n\n1st payment: {Money({[T045]})}";
        assert_eq!(classify(text), DocumentType::Lm060);
    }

    #[test]
    fn test_classify_privacy() {
        assert_eq!(classify("FACTS about what we do"), DocumentType::PrivacyForm);
        assert_eq!(
            classify("Our Privacy Policy explains"),
            DocumentType::PrivacyForm
        );
    }

    #[test]
    fn test_classify_generic_fallback() {
        assert_eq!(classify("Dear customer, hello."), DocumentType::Generic);
        assert_eq!(classify(""), DocumentType::Generic);
    }

    #[test]
    fn test_classify_deterministic() {
        let text = "Notice of Breach default under the Note and Mortgage";
        assert_eq!(classify(text), classify(text));
    }

    #[test]
    fn test_header_token() {
        assert_eq!(DocumentType::Br010.header_token(), "{Insert(H003 TagHeader)}");
        assert_eq!(DocumentType::Generic.header_token(), "{[tagHeader]}");
    }

    #[test]
    fn test_from_str() {
        assert_eq!("sd002".parse::<DocumentType>().unwrap(), DocumentType::Sd002);
        assert!("nope".parse::<DocumentType>().is_err());
    }
}
