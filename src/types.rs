//! Core types and data structures for the statement pipeline

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::validation::validate_non_negative_amount;

/// A single line of text extracted from a source document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    /// Page the line was read from (1-based)
    pub page_number: u32,
    /// Position of the line within its page (0-based)
    pub line_index: u32,
    /// Raw line text
    pub text: String,
}

impl Line {
    /// Create a new line
    pub fn new(page_number: u32, line_index: u32, text: impl Into<String>) -> Self {
        Self {
            page_number,
            line_index,
            text: text.into(),
        }
    }

    /// Whether the line carries no text besides whitespace
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// High-level document categories recognised by the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentType {
    /// Bank account statement
    BankStatement,
    /// Homeowner / property insurance policy
    InsurancePolicy,
    /// Driver license or other government identification
    Identification,
    /// No anchor rule matched
    Unknown,
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DocumentType::BankStatement => "BANK_STATEMENT",
            DocumentType::InsurancePolicy => "INSURANCE_POLICY",
            DocumentType::Identification => "IDENTIFICATION",
            DocumentType::Unknown => "UNKNOWN",
        };
        f.write_str(name)
    }
}

/// Table conventions a statement uses to express debits and credits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutType {
    /// Separate "deposits" and "withdrawals" sections
    SectionSplit,
    /// Single amount column where the sign carries the direction
    SignedAmount,
    /// Separate debit and credit columns
    DualColumn,
    /// None of the layout anchors matched
    Unknown,
}

/// Section context attached to a candidate line under section-split layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Section {
    /// Inside "deposits and other credits"
    Credit,
    /// Inside "withdrawals and other debits"
    Debit,
}

/// A line provisionally identified as a transaction row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateLine {
    /// The source line
    pub line: Line,
    /// Most recently seen section header, if any
    pub section: Option<Section>,
}

impl CandidateLine {
    /// Create a candidate from a line and its section context
    pub fn new(line: Line, section: Option<Section>) -> Self {
        Self { line, section }
    }

    /// Text of the underlying line
    pub fn text(&self) -> &str {
        &self.line.text
    }
}

impl From<Line> for CandidateLine {
    fn from(line: Line) -> Self {
        Self::new(line, None)
    }
}

/// A normalized statement transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Posting date
    pub date: NaiveDate,
    /// Free text between the date and the amount
    pub description: String,
    /// Money leaving the account, as a non-negative magnitude
    pub debit: Option<BigDecimal>,
    /// Money entering the account, as a non-negative magnitude
    pub credit: Option<BigDecimal>,
    /// Running balance, when known
    pub balance: Option<BigDecimal>,
    /// Whether the record went through layout-aware normalization
    pub normalized: bool,
    /// Page of the source line
    pub page_number: u32,
    /// Index of the source line within its page
    pub line_index: u32,
    /// Source line text
    pub raw_text: String,
}

impl Transaction {
    /// Validate the transaction
    pub fn validate(&self) -> DocumentResult<()> {
        if self.debit.is_some() && self.credit.is_some() {
            return Err(DocumentError::Validation(format!(
                "Transaction on {} has both debit and credit set",
                self.date
            )));
        }

        for amount in self.debit.iter().chain(self.credit.iter()) {
            validate_non_negative_amount(amount)?;
        }

        Ok(())
    }
}

/// Account-level information read from the statement header
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementMetadata {
    /// Issuing institution
    pub institution: String,
    /// Name of the account holder
    pub account_holder: String,
    /// Masked account number (last four digits visible)
    pub account_number: Option<String>,
    /// First day of the statement period
    pub statement_start: Option<NaiveDate>,
    /// Last day of the statement period
    pub statement_end: Option<NaiveDate>,
    /// Balance at the start of the period
    pub opening_balance: BigDecimal,
    /// Balance at the end of the period
    pub closing_balance: BigDecimal,
    /// ISO 4217 currency code
    pub currency: String,
}

/// Outcome of checking opening + credits - debits against the closing balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationResult {
    /// opening + credits - debits
    pub calculated_closing: BigDecimal,
    /// Closing balance printed on the statement
    pub expected_closing: BigDecimal,
    /// calculated - expected
    pub delta: BigDecimal,
    /// Whether delta is exactly zero
    pub valid: bool,
}

/// Heuristic trust in an extracted ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceScore {
    /// Weighted combination of the two component weights, in [0, 1]
    pub overall: f64,
    /// 1.0 when the statement reconciles, 0.0 otherwise
    pub reconciliation_weight: f64,
    /// How well the layout and rows were recognised
    pub structure_weight: f64,
}

/// Final structured ledger for a bank statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerOutput {
    /// Statement header information
    pub metadata: StatementMetadata,
    /// Normalized transactions in document order
    pub transactions: Vec<Transaction>,
    /// Balance check against the printed closing balance
    pub reconciliation: ReconciliationResult,
    /// Trust score for the extraction
    pub confidence: ConfidenceScore,
}

/// Placeholder output for document types without a real parser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StubDocument {
    /// Type the document was classified as
    pub document_type: DocumentType,
    /// Highest page number seen in the input
    pub page_count: u32,
    /// Number of non-blank lines
    pub line_count: usize,
}

/// Structured result of routing a document to its parser
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "document_type", content = "result", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParsedDocument {
    /// Full ledger extracted from a bank statement
    BankStatement(LedgerOutput),
    /// Placeholder for an insurance policy
    InsurancePolicy(StubDocument),
    /// Placeholder for an identification document
    Identification(StubDocument),
}

impl ParsedDocument {
    /// Document type the result was produced for
    pub fn document_type(&self) -> DocumentType {
        match self {
            ParsedDocument::BankStatement(_) => DocumentType::BankStatement,
            ParsedDocument::InsurancePolicy(_) => DocumentType::InsurancePolicy,
            ParsedDocument::Identification(_) => DocumentType::Identification,
        }
    }

    /// The ledger, when the document was a bank statement
    pub fn as_ledger(&self) -> Option<&LedgerOutput> {
        match self {
            ParsedDocument::BankStatement(ledger) => Some(ledger),
            _ => None,
        }
    }
}

/// Errors that can occur while processing a document
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("Unsupported or unrecognized document type")]
    UnsupportedDocument,
    #[error("Processing failed: {0}")]
    Processing(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for document operations
pub type DocumentResult<T> = Result<T, DocumentError>;
