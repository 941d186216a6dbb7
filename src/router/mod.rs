//! Document routing: classification, parser resolution and parsing

pub mod registry;

pub use registry::*;

use std::panic::{self, AssertUnwindSafe};
use tracing::{error, info, info_span, warn};

use crate::classifier::DocumentClassifier;
use crate::config::EngineConfig;
use crate::traits::DocumentParser;
use crate::types::*;

/// Orchestrates the processing pipeline for extracted document lines
///
/// The router keeps no per-document state; one instance can process any
/// number of documents, from any number of threads.
#[derive(Debug, Clone, Default)]
pub struct DocumentRouter {
    config: EngineConfig,
}

impl DocumentRouter {
    /// Create a router with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a router with a custom configuration
    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Configuration handed to every parser
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Classify the document and run the matching parser
    pub fn process(&self, lines: &[Line]) -> DocumentResult<ParsedDocument> {
        let span = info_span!("process_document", lines = lines.len());
        let _guard = span.enter();

        let document_type = DocumentClassifier::classify(lines);
        if document_type == DocumentType::Unknown {
            warn!("no classification anchor matched");
            return Err(DocumentError::UnsupportedDocument);
        }

        let parser = resolve_parser(document_type)?;
        info!(%document_type, "routing document");

        invoke(parser, lines, &self.config)
    }
}

/// Run a parser, turning its failures and panics into processing errors
fn invoke(
    parser: &dyn DocumentParser,
    lines: &[Line],
    config: &EngineConfig,
) -> DocumentResult<ParsedDocument> {
    let document_type = parser.document_type();
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| parser.parse(lines, config)));

    match outcome {
        Ok(Ok(parsed)) => Ok(parsed),
        Ok(Err(err)) => {
            error!(%document_type, error = %err, "parser failed");
            Err(DocumentError::Processing(err.to_string()))
        }
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "parser panicked".to_string());
            error!(%document_type, %message, "parser panicked");
            Err(DocumentError::Processing(message))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(texts: &[&str]) -> Vec<Line> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| Line::new(1, i as u32, *t))
            .collect()
    }

    #[test]
    fn test_unknown_document_is_rejected() {
        let router = DocumentRouter::new();
        let result = router.process(&lines(&["hello", "world"]));
        assert!(matches!(result, Err(DocumentError::UnsupportedDocument)));
    }

    #[test]
    fn test_empty_document_is_rejected() {
        let result = DocumentRouter::new().process(&[]);
        assert!(matches!(result, Err(DocumentError::UnsupportedDocument)));
    }

    #[test]
    fn test_stub_documents_route() {
        let router = DocumentRouter::new();
        let parsed = router
            .process(&lines(&["Policy Number 1", "Coverage A", "Effective Date 01/01/2024"]))
            .unwrap();
        assert_eq!(parsed.document_type(), DocumentType::InsurancePolicy);
        assert!(parsed.as_ledger().is_none());
    }

    #[test]
    fn test_router_uses_its_config() {
        let config = EngineConfig {
            default_currency: "PHP".to_string(),
            ..EngineConfig::default()
        };
        let router = DocumentRouter::with_config(config);
        let parsed = router
            .process(&lines(&[
                "Account Number 12345678",
                "Beginning balance 0.00",
                "Ending balance 0.00",
            ]))
            .unwrap();

        let ledger = parsed.as_ledger().unwrap();
        assert_eq!(ledger.metadata.currency, "PHP");
        assert_eq!(router.config().default_currency, "PHP");
    }

    struct FailingParser;

    impl DocumentParser for FailingParser {
        fn document_type(&self) -> DocumentType {
            DocumentType::BankStatement
        }

        fn parse(&self, _lines: &[Line], _config: &EngineConfig) -> DocumentResult<ParsedDocument> {
            Err(DocumentError::Validation("both debit and credit set".to_string()))
        }
    }

    struct PanickingParser;

    impl DocumentParser for PanickingParser {
        fn document_type(&self) -> DocumentType {
            DocumentType::Identification
        }

        fn parse(&self, _lines: &[Line], _config: &EngineConfig) -> DocumentResult<ParsedDocument> {
            panic!("index out of range")
        }
    }

    #[test]
    fn test_parser_errors_become_processing_failures() {
        let result = invoke(&FailingParser, &[], &EngineConfig::default());
        match result {
            Err(DocumentError::Processing(message)) => {
                assert!(message.contains("both debit and credit set"))
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_parser_panics_become_processing_failures() {
        let result = invoke(&PanickingParser, &[], &EngineConfig::default());
        match result {
            Err(DocumentError::Processing(message)) => assert_eq!(message, "index out of range"),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
