//! Traits for document parsers

use crate::config::EngineConfig;
use crate::types::*;

/// Contract shared by every document-type parser
///
/// Parsers operate on already-extracted lines and return a structured result.
/// Implementations hold no per-document state, so a single instance can be
/// shared across threads and reused for any number of documents.
pub trait DocumentParser: Send + Sync {
    /// Document type this parser handles
    fn document_type(&self) -> DocumentType;

    /// Parse the lines into a structured result
    fn parse(&self, lines: &[Line], config: &EngineConfig) -> DocumentResult<ParsedDocument>;
}
