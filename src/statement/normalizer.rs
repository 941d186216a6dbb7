//! Conversion of layout-tagged candidate lines into normalized transactions
//!
//! This layer extracts the date and amount, resolves debit/credit from the
//! layout, and builds the description. Balance tracking and reconciliation
//! happen elsewhere.

use bigdecimal::BigDecimal;
use chrono::{Datelike, NaiveDate};
use std::str::FromStr;
use tracing::debug;

use crate::statement::layout::SectionTracker;
use crate::types::*;

/// Layout-aware transaction normalizer
#[derive(Debug, Clone, Copy, Default)]
pub struct TransactionNormalizer;

impl TransactionNormalizer {
    /// Normalize candidates, dating them in the current calendar year
    ///
    /// Statement rows only carry `MM/DD`; the year comes from the system clock,
    /// not from the statement period. Statements crossing a year boundary get
    /// wrong years for part of their rows. `02/29` rows are kept in leap years
    /// and skipped otherwise.
    pub fn normalize(layout: LayoutType, candidates: &[CandidateLine]) -> Vec<Transaction> {
        Self::normalize_for_year(chrono::Local::now().year(), layout, candidates)
    }

    /// Normalize candidates, dating them in `year`
    pub fn normalize_for_year(
        year: i32,
        layout: LayoutType,
        candidates: &[CandidateLine],
    ) -> Vec<Transaction> {
        let mut transactions = Vec::with_capacity(candidates.len());
        let mut sections = SectionTracker::default();
        let mut skipped = 0usize;

        for candidate in candidates {
            let text = candidate.text();

            if layout == LayoutType::SectionSplit && sections.observe(&text.to_lowercase()) {
                continue;
            }

            let tokens: Vec<&str> = text.split_whitespace().collect();
            let Some(first) = tokens.first() else {
                continue;
            };

            let Some(date) = parse_month_day(first, year) else {
                debug!(
                    page = candidate.line.page_number,
                    line = candidate.line.line_index,
                    "skipping row: bad date"
                );
                skipped += 1;
                continue;
            };

            let Some((amount_index, amount)) = find_amount(&tokens) else {
                debug!(
                    page = candidate.line.page_number,
                    line = candidate.line.line_index,
                    "skipping row: no amount"
                );
                skipped += 1;
                continue;
            };

            let section = candidate.section.or(sections.current());
            let (debit, credit) = resolve_direction(layout, section, amount);

            transactions.push(Transaction {
                date,
                description: tokens[1..amount_index].join(" "),
                debit,
                credit,
                balance: None,
                normalized: true,
                page_number: candidate.line.page_number,
                line_index: candidate.line.line_index,
                raw_text: text.to_string(),
            });
        }

        debug!(
            ?layout,
            candidates = candidates.len(),
            transactions = transactions.len(),
            skipped,
            "candidates normalized"
        );

        transactions
    }
}

/// Parse an `MM/DD` token into a date within `year`
pub fn parse_month_day(token: &str, year: i32) -> Option<NaiveDate> {
    let (month, day) = token.split_once('/')?;
    let month = parse_date_part(month)?;
    let day = parse_date_part(day)?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_date_part(part: &str) -> Option<u32> {
    if part.is_empty() || part.len() > 2 || !part.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

/// Parse a plain decimal amount, ignoring thousands separators
///
/// Exponent notation (`1E3`) is rejected: it can carry arbitrary scales that
/// later arithmetic would have to expand digit by digit.
pub fn parse_amount(token: &str) -> Option<BigDecimal> {
    if !is_plain_decimal(token) {
        return None;
    }
    BigDecimal::from_str(&token.replace(',', "")).ok()
}

/// `[+-]?[0-9,]*\.?[0-9]+`
fn is_plain_decimal(token: &str) -> bool {
    let unsigned = token.strip_prefix(['+', '-']).unwrap_or(token);
    let is_grouped = |part: &str| part.chars().all(|c| c.is_ascii_digit() || c == ',');
    let is_digits = |part: &str| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit());

    match unsigned.split_once('.') {
        Some((whole, fraction)) => is_grouped(whole) && is_digits(fraction),
        None => is_grouped(unsigned) && unsigned.ends_with(|c: char| c.is_ascii_digit()),
    }
}

/// Last token (after the date) that parses as a decimal, with its index
fn find_amount(tokens: &[&str]) -> Option<(usize, BigDecimal)> {
    tokens
        .iter()
        .enumerate()
        .skip(1)
        .rev()
        .find_map(|(index, token)| parse_amount(token).map(|amount| (index, amount)))
}

/// Map a signed amount to (debit, credit) magnitudes for the layout
fn resolve_direction(
    layout: LayoutType,
    section: Option<Section>,
    amount: BigDecimal,
) -> (Option<BigDecimal>, Option<BigDecimal>) {
    match layout {
        LayoutType::SectionSplit => match section {
            Some(Section::Credit) => (None, Some(amount.abs())),
            Some(Section::Debit) => (Some(amount.abs()), None),
            None => (None, None),
        },
        // Dual-column statements have no column-position detection yet and
        // fall back to the sign of the amount.
        LayoutType::SignedAmount | LayoutType::DualColumn => {
            if amount < BigDecimal::from(0) {
                (Some(amount.abs()), None)
            } else {
                (None, Some(amount))
            }
        }
        LayoutType::Unknown => (None, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    fn candidates(texts: &[&str]) -> Vec<CandidateLine> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| CandidateLine::from(Line::new(1, i as u32, *t)))
            .collect()
    }

    #[test]
    fn test_signed_amount_layout() {
        let rows = candidates(&["03/01 CHECK #100 -45.00", "03/02 DEPOSIT 200.00"]);
        let txs = TransactionNormalizer::normalize_for_year(2024, LayoutType::SignedAmount, &rows);

        assert_eq!(txs.len(), 2);
        assert_eq!(txs[0].date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(txs[0].description, "CHECK #100");
        assert_eq!(txs[0].debit, Some(dec("45.00")));
        assert_eq!(txs[0].credit, None);
        assert_eq!(txs[1].credit, Some(dec("200.00")));
        assert_eq!(txs[1].debit, None);
        assert!(txs.iter().all(|t| t.normalized && t.balance.is_none()));
    }

    #[test]
    fn test_section_split_uses_candidate_tags() {
        let rows = vec![
            CandidateLine::new(Line::new(1, 3, "04/01 PAYROLL 1,000.00"), Some(Section::Credit)),
            CandidateLine::new(Line::new(1, 7, "04/02 RENT -800.00"), Some(Section::Debit)),
            CandidateLine::new(Line::new(1, 9, "04/03 ORPHAN 5.00"), None),
        ];
        let txs = TransactionNormalizer::normalize_for_year(2024, LayoutType::SectionSplit, &rows);

        assert_eq!(txs[0].credit, Some(dec("1000.00")));
        assert_eq!(txs[1].debit, Some(dec("800.00")));
        assert_eq!(txs[2].debit, None);
        assert_eq!(txs[2].credit, None);
    }

    #[test]
    fn test_section_split_tracks_inline_headers() {
        let rows = candidates(&[
            "Deposits and other credits",
            "04/01 PAYROLL 50.00",
            "Withdrawals and other debits",
            "04/02 ATM 30.00",
        ]);
        let txs = TransactionNormalizer::normalize_for_year(2024, LayoutType::SectionSplit, &rows);

        assert_eq!(txs.len(), 2);
        assert_eq!(txs[0].credit, Some(dec("50.00")));
        assert_eq!(txs[1].debit, Some(dec("30.00")));
    }

    #[test]
    fn test_dual_column_falls_back_to_sign() {
        let rows = candidates(&["05/05 FEE -2.50", "05/06 REFUND 2.50"]);
        let txs = TransactionNormalizer::normalize_for_year(2024, LayoutType::DualColumn, &rows);

        assert_eq!(txs[0].debit, Some(dec("2.50")));
        assert_eq!(txs[1].credit, Some(dec("2.50")));
    }

    #[test]
    fn test_unparseable_rows_are_skipped() {
        let rows = candidates(&[
            "13/01 BAD MONTH 1.00",
            "02/30 BAD DAY 1.00",
            "04/01 NO AMOUNT HERE",
            "   ",
            "04/02 GOOD 1.00",
        ]);
        let txs = TransactionNormalizer::normalize_for_year(2024, LayoutType::SignedAmount, &rows);

        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].description, "GOOD");
        assert_eq!(txs[0].line_index, 4);
    }

    #[test]
    fn test_description_stops_at_amount_token() {
        let rows = candidates(&["04/12 GROCERY STORE 23.50 REF"]);
        let txs = TransactionNormalizer::normalize_for_year(2024, LayoutType::SignedAmount, &rows);

        assert_eq!(txs[0].description, "GROCERY STORE");
        assert_eq!(txs[0].credit, Some(dec("23.50")));
    }

    #[test]
    fn test_exponent_tokens_are_not_amounts() {
        let rows = candidates(&["03/01 REF 1E3", "03/02 FEE 12.00 1E2000000", "03/03 ONLY 1e-9"]);
        let txs = TransactionNormalizer::normalize_for_year(2024, LayoutType::SignedAmount, &rows);

        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].description, "FEE");
        assert_eq!(txs[0].credit, Some(dec("12.00")));
    }

    #[test]
    fn test_plain_amount_shapes() {
        assert_eq!(parse_amount("1,234.56"), Some(dec("1234.56")));
        assert_eq!(parse_amount("-45.00"), Some(dec("-45.00")));
        assert_eq!(parse_amount("+7"), Some(dec("7")));
        assert_eq!(parse_amount("0.50"), Some(dec("0.50")));
        assert_eq!(parse_amount("1E3"), None);
        assert_eq!(parse_amount("45."), None);
        assert_eq!(parse_amount(","), None);
        assert_eq!(parse_amount("-"), None);
        assert_eq!(parse_amount("1.2.3"), None);
    }

    #[test]
    fn test_amount_directly_after_date() {
        let rows = candidates(&["04/12 9.99"]);
        let txs = TransactionNormalizer::normalize_for_year(2024, LayoutType::SignedAmount, &rows);

        assert_eq!(txs[0].description, "");
        assert_eq!(txs[0].credit, Some(dec("9.99")));
    }

    #[test]
    fn test_leap_day_depends_on_year() {
        assert!(parse_month_day("02/29", 2024).is_some());
        assert!(parse_month_day("02/29", 2023).is_none());
        assert!(parse_month_day("2/9", 2023).is_some());
        assert!(parse_month_day("002/09", 2023).is_none());
    }

    #[test]
    fn test_unknown_layout_leaves_direction_unset() {
        let rows = candidates(&["04/12 SOMETHING 1.00"]);
        let txs = TransactionNormalizer::normalize_for_year(2024, LayoutType::Unknown, &rows);

        assert_eq!(txs.len(), 1);
        assert!(txs[0].debit.is_none() && txs[0].credit.is_none());
    }

    #[test]
    fn test_default_year_is_current() {
        let rows = candidates(&["01/15 X 1.00"]);
        let txs = TransactionNormalizer::normalize(LayoutType::SignedAmount, &rows);

        assert_eq!(txs[0].date.year(), chrono::Local::now().year());
    }
}
