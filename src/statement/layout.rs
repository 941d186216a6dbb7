//! Statement layout detection and transaction candidate extraction
//!
//! This module does not resolve debit/credit. It only decides which table
//! convention the statement follows and returns the lines that look like
//! transaction rows, tagged with the section they appeared in.

use tracing::debug;

use crate::classifier::text_blob;
use crate::types::*;

/// Header opening the credit section of a section-split statement
pub const CREDIT_SECTION_HEADER: &str = "deposits and other credits";

/// Header opening the debit section of a section-split statement
pub const DEBIT_SECTION_HEADER: &str = "withdrawals and other debits";

const SECTION_SPLIT_ANCHORS: [&str; 2] = [CREDIT_SECTION_HEADER, DEBIT_SECTION_HEADER];

/// Anchors marking the start of summary blocks; nothing after them is a row
const SUMMARY_ANCHORS: [&str; 3] = ["total deposits", "total withdrawals", "daily ledger balances"];

const FOOTER_ANCHORS: [&str; 3] = [
    "page ",
    "important messages",
    "this page intentionally left blank",
];

const TABLE_HEADERS: [&str; 2] = ["date description amount", "date description"];

/// Section context while walking a section-split statement
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct SectionTracker {
    current: Option<Section>,
}

impl SectionTracker {
    /// Consume a section header if the line is one
    ///
    /// Returns `true` when the line was a header and must not be treated as a row.
    pub(crate) fn observe(&mut self, lower: &str) -> bool {
        if lower.contains(CREDIT_SECTION_HEADER) {
            self.current = Some(Section::Credit);
            true
        } else if lower.contains(DEBIT_SECTION_HEADER) {
            self.current = Some(Section::Debit);
            true
        } else {
            false
        }
    }

    pub(crate) fn current(&self) -> Option<Section> {
        self.current
    }
}

/// Per-document state of the candidate scan
#[derive(Debug, Clone, Copy, Default)]
struct ScanState {
    sections: SectionTracker,
    stopped: bool,
}

/// Layout classification and candidate filtering
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutAnalyzer;

impl LayoutAnalyzer {
    /// Detect the table layout of the whole document
    pub fn detect_layout(lines: &[Line]) -> LayoutType {
        Self::detect_from_blob(&text_blob(lines))
    }

    fn detect_from_blob(blob: &str) -> LayoutType {
        if SECTION_SPLIT_ANCHORS.iter().any(|a| blob.contains(a)) {
            return LayoutType::SectionSplit;
        }

        if blob.contains("debit") && blob.contains("credit") {
            return LayoutType::DualColumn;
        }

        if blob.contains("amount") {
            return LayoutType::SignedAmount;
        }

        LayoutType::Unknown
    }

    /// Detect the layout and return the transaction candidates in reading order
    pub fn extract_transaction_lines(lines: &[Line]) -> (LayoutType, Vec<CandidateLine>) {
        let layout = Self::detect_layout(lines);
        let mut state = ScanState::default();
        let mut candidates = Vec::new();

        for line in lines {
            if line.is_blank() {
                continue;
            }

            let lower = line.text.to_lowercase();

            if layout == LayoutType::SectionSplit && state.sections.observe(&lower) {
                continue;
            }

            if SUMMARY_ANCHORS.iter().any(|a| lower.contains(a)) {
                state.stopped = true;
            }

            if state.stopped {
                continue;
            }

            if FOOTER_ANCHORS.iter().any(|a| lower.contains(a)) {
                continue;
            }

            if TABLE_HEADERS.contains(&lower.trim()) {
                continue;
            }

            if is_date_prefixed(&line.text) {
                candidates.push(CandidateLine::new(line.clone(), state.sections.current()));
            }
        }

        debug!(
            ?layout,
            lines = lines.len(),
            candidates = candidates.len(),
            stopped_at_summary = state.stopped,
            "transaction candidates extracted"
        );

        (layout, candidates)
    }
}

/// Whether the first token is a bare `MM/DD` pair of digit runs
pub fn is_date_prefixed(text: &str) -> bool {
    let text = text.trim();
    if text.len() < 4 || !text.contains('/') {
        return false;
    }

    let Some(first) = text.split_whitespace().next() else {
        return false;
    };

    let parts: Vec<&str> = first.split('/').collect();
    parts.len() == 2
        && parts
            .iter()
            .all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()))
}
