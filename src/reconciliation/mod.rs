//! Reconciliation of statement transactions against printed balances
//!
//! The check is `opening_balance + total_credits - total_debits == closing_balance`,
//! using exact decimal equality. A mismatch is a normal outcome reported through
//! `ReconciliationResult::valid`, never an error.

use bigdecimal::BigDecimal;
use tracing::{info, warn};

use crate::types::*;

const RECONCILIATION_SHARE: f64 = 0.6;
const STRUCTURE_SHARE: f64 = 0.4;

/// Stateless, layout-agnostic reconciliation engine
#[derive(Debug, Clone, Copy, Default)]
pub struct Reconciler;

impl Reconciler {
    /// Sum of all credit magnitudes
    pub fn total_credits(transactions: &[Transaction]) -> BigDecimal {
        transactions.iter().filter_map(|t| t.credit.as_ref()).sum()
    }

    /// Sum of all debit magnitudes
    pub fn total_debits(transactions: &[Transaction]) -> BigDecimal {
        transactions.iter().filter_map(|t| t.debit.as_ref()).sum()
    }

    /// Check the transactions against the statement's opening and closing balances
    pub fn reconcile(
        metadata: &StatementMetadata,
        transactions: &[Transaction],
    ) -> ReconciliationResult {
        let total_credits = Self::total_credits(transactions);
        let total_debits = Self::total_debits(transactions);

        let calculated_closing = &metadata.opening_balance + &total_credits - &total_debits;
        let delta = &calculated_closing - &metadata.closing_balance;
        let valid = delta == BigDecimal::from(0);

        if valid {
            info!(%calculated_closing, transactions = transactions.len(), "statement reconciled");
        } else {
            warn!(
                %calculated_closing,
                expected_closing = %metadata.closing_balance,
                %delta,
                "statement does not reconcile"
            );
        }

        ReconciliationResult {
            calculated_closing,
            expected_closing: metadata.closing_balance.clone(),
            delta,
            valid,
        }
    }

    /// Score how much the extracted ledger can be trusted
    pub fn confidence(
        layout: LayoutType,
        transactions: &[Transaction],
        reconciliation: &ReconciliationResult,
    ) -> ConfidenceScore {
        let reconciliation_weight = if reconciliation.valid { 1.0 } else { 0.0 };
        let structure_weight = match (layout, transactions.is_empty()) {
            (LayoutType::Unknown, _) => 0.0,
            (_, true) => 0.5,
            (_, false) => 1.0,
        };

        ConfidenceScore {
            overall: RECONCILIATION_SHARE * reconciliation_weight
                + STRUCTURE_SHARE * structure_weight,
            reconciliation_weight,
            structure_weight,
        }
    }
}
