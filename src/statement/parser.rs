//! Bank statement parser assembling the full ledger

use tracing::debug;

use crate::config::EngineConfig;
use crate::reconciliation::Reconciler;
use crate::statement::{extract_metadata, LayoutAnalyzer, TransactionNormalizer};
use crate::traits::DocumentParser;
use crate::types::*;

/// Runs layout detection, normalization and reconciliation over a statement
#[derive(Debug, Clone, Copy, Default)]
pub struct BankStatementParser;

impl BankStatementParser {
    /// Build the ledger for a bank statement
    pub fn parse_ledger(lines: &[Line], config: &EngineConfig) -> DocumentResult<LedgerOutput> {
        let metadata = extract_metadata(lines, config);
        let (layout, candidates) = LayoutAnalyzer::extract_transaction_lines(lines);
        let transactions = TransactionNormalizer::normalize(layout, &candidates);

        for transaction in &transactions {
            transaction.validate()?;
        }

        let reconciliation = Reconciler::reconcile(&metadata, &transactions);
        let confidence = Reconciler::confidence(layout, &transactions, &reconciliation);

        debug!(
            ?layout,
            transactions = transactions.len(),
            overall_confidence = confidence.overall,
            "bank statement parsed"
        );

        Ok(LedgerOutput {
            metadata,
            transactions,
            reconciliation,
            confidence,
        })
    }
}

impl DocumentParser for BankStatementParser {
    fn document_type(&self) -> DocumentType {
        DocumentType::BankStatement
    }

    fn parse(&self, lines: &[Line], config: &EngineConfig) -> DocumentResult<ParsedDocument> {
        Self::parse_ledger(lines, config).map(ParsedDocument::BankStatement)
    }
}
