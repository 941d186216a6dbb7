//! Parsers for non-statement document types
//!
//! Insurance policies and identification documents are recognised by the
//! classifier, but their content is not interpreted yet. These parsers only
//! report the document's shape so callers get a typed result.

use crate::config::EngineConfig;
use crate::traits::DocumentParser;
use crate::types::*;

fn summarize(document_type: DocumentType, lines: &[Line]) -> StubDocument {
    StubDocument {
        document_type,
        page_count: lines.iter().map(|l| l.page_number).max().unwrap_or(0),
        line_count: lines.iter().filter(|l| !l.is_blank()).count(),
    }
}

/// Homeowner insurance policy parser
#[derive(Debug, Clone, Copy, Default)]
pub struct InsurancePolicyParser;

impl DocumentParser for InsurancePolicyParser {
    fn document_type(&self) -> DocumentType {
        DocumentType::InsurancePolicy
    }

    fn parse(&self, lines: &[Line], _config: &EngineConfig) -> DocumentResult<ParsedDocument> {
        Ok(ParsedDocument::InsurancePolicy(summarize(
            DocumentType::InsurancePolicy,
            lines,
        )))
    }
}

/// Government identification parser
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentificationParser;

impl DocumentParser for IdentificationParser {
    fn document_type(&self) -> DocumentType {
        DocumentType::Identification
    }

    fn parse(&self, lines: &[Line], _config: &EngineConfig) -> DocumentResult<ParsedDocument> {
        Ok(ParsedDocument::Identification(summarize(
            DocumentType::Identification,
            lines,
        )))
    }
}
