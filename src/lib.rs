//! # Statement Core
//!
//! Rule-based extraction of structured ledgers from bank statement text,
//! with internal consistency checking.
//!
//! ## Features
//!
//! - **Document classification**: Anchor-phrase rules for bank statements, insurance policies and identification documents
//! - **Layout analysis**: Section-split, signed-amount and dual-column statement tables
//! - **Transaction normalization**: Dates, descriptions and debit/credit magnitudes from raw rows
//! - **Reconciliation**: Exact decimal check of opening balance + credits - debits against the closing balance
//! - **Routing**: One entry point from extracted lines to a typed result
//!
//! Text extraction (PDF text layers, OCR) happens upstream; this crate starts
//! from the ordered lines it produces.
//!
//! ## Quick Start
//!
//! ```rust
//! use statement_core::{DocumentRouter, Line, ParsedDocument};
//!
//! let lines = vec![
//!     Line::new(1, 0, "Account Number 000123456789"),
//!     Line::new(1, 1, "Beginning balance 100.00"),
//!     Line::new(1, 2, "Date Description Amount"),
//!     Line::new(1, 3, "03/01 CHECK #100 -30.00"),
//!     Line::new(1, 4, "03/02 DEPOSIT 50.00"),
//!     Line::new(1, 5, "Ending balance 120.00"),
//! ];
//!
//! let router = DocumentRouter::new();
//! match router.process(&lines).unwrap() {
//!     ParsedDocument::BankStatement(ledger) => assert!(ledger.reconciliation.valid),
//!     other => panic!("unexpected document: {:?}", other.document_type()),
//! }
//! ```

pub mod classifier;
pub mod config;
pub mod documents;
pub mod logging;
pub mod reconciliation;
pub mod router;
pub mod statement;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use classifier::DocumentClassifier;
pub use config::EngineConfig;
pub use documents::{IdentificationParser, InsurancePolicyParser};
pub use reconciliation::Reconciler;
pub use router::{resolve_parser, DocumentRouter};
pub use statement::*;
pub use traits::*;
pub use types::*;
