//! Static mapping from document type to parser

use crate::documents::{IdentificationParser, InsurancePolicyParser};
use crate::statement::BankStatementParser;
use crate::traits::DocumentParser;
use crate::types::*;

static PARSERS: [&dyn DocumentParser; 3] = [
    &BankStatementParser,
    &InsurancePolicyParser,
    &IdentificationParser,
];

/// All registered parsers
pub fn registered_parsers() -> &'static [&'static dyn DocumentParser] {
    &PARSERS
}

/// Resolve the parser for a document type
pub fn resolve_parser(document_type: DocumentType) -> DocumentResult<&'static dyn DocumentParser> {
    PARSERS
        .iter()
        .copied()
        .find(|parser| parser.document_type() == document_type)
        .ok_or(DocumentError::UnsupportedDocument)
}
