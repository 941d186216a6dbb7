//! Rule-based document classification
//!
//! Classification relies only on textual anchors found in the document.
//! Rules are evaluated in a fixed priority order and the first match wins:
//! bank statements, then insurance policies, then identification documents.

use tracing::debug;

use crate::types::*;

const BANK_STATEMENT_ANCHORS: [&str; 3] = ["account number", "beginning balance", "ending balance"];

const INSURANCE_ANCHORS: [&str; 2] = ["policy number", "coverage"];

const INSURANCE_DATE_ANCHORS: [&str; 2] = ["effective date", "expiration date"];

const IDENTIFICATION_ANCHORS: [&str; 3] =
    ["driver license", "identification card", "date of birth"];

/// Lower-cased concatenation of every line, used for anchor lookups
pub(crate) fn text_blob(lines: &[Line]) -> String {
    lines
        .iter()
        .map(|line| line.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Stateless anchor-phrase classifier
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentClassifier;

impl DocumentClassifier {
    /// Determine the document category from its lines
    pub fn classify(lines: &[Line]) -> DocumentType {
        if lines.is_empty() {
            return DocumentType::Unknown;
        }

        let blob = text_blob(lines);
        let document_type = Self::classify_blob(&blob);
        debug!(%document_type, lines = lines.len(), "document classified");
        document_type
    }

    fn classify_blob(blob: &str) -> DocumentType {
        if BANK_STATEMENT_ANCHORS.iter().all(|a| blob.contains(a)) {
            return DocumentType::BankStatement;
        }

        if INSURANCE_ANCHORS.iter().all(|a| blob.contains(a))
            && INSURANCE_DATE_ANCHORS.iter().any(|a| blob.contains(a))
        {
            return DocumentType::InsurancePolicy;
        }

        if IDENTIFICATION_ANCHORS.iter().any(|a| blob.contains(a)) {
            return DocumentType::Identification;
        }

        DocumentType::Unknown
    }
}
