//! Statement header extraction

use bigdecimal::BigDecimal;
use chrono::NaiveDate;

use crate::config::EngineConfig;
use crate::statement::normalizer::parse_amount;
use crate::types::*;

const HOLDER_LABELS: [&str; 2] = ["account holder:", "account name:"];

/// Read account-level metadata from the statement lines
///
/// Every field has a fallback, so extraction never fails: balances default to
/// zero and names to the configured placeholders.
pub fn extract_metadata(lines: &[Line], config: &EngineConfig) -> StatementMetadata {
    let mut institution = None;
    let mut account_holder = None;
    let mut account_number = None;
    let mut period = None;
    let mut opening_balance = None;
    let mut closing_balance = None;

    for line in lines.iter().filter(|l| !l.is_blank()) {
        let text = line.text.trim();
        let lower = text.to_lowercase();

        if institution.is_none() && lower.contains("bank of") {
            institution = Some(text.to_string());
        }

        if account_holder.is_none() && HOLDER_LABELS.iter().any(|l| lower.contains(l)) {
            account_holder = text
                .split_once(':')
                .map(|(_, rest)| rest.trim().to_string())
                .filter(|rest| !rest.is_empty());
        }

        if account_number.is_none() && lower.contains("account number") {
            account_number = mask_account_number(text);
        }

        // Later balance lines replace earlier ones; unparseable ones are ignored.
        if lower.contains("beginning balance") {
            opening_balance = trailing_amount(text).or(opening_balance);
        }

        if lower.contains("ending balance") {
            closing_balance = trailing_amount(text).or(closing_balance);
        }

        if period.is_none() {
            period = statement_period(text);
        }
    }

    StatementMetadata {
        institution: institution.unwrap_or_else(|| config.fallback_institution.clone()),
        account_holder: account_holder
            .unwrap_or_else(|| config.fallback_account_holder.clone()),
        account_number,
        statement_start: period.map(|(start, _)| start),
        statement_end: period.map(|(_, end)| end),
        opening_balance: opening_balance.unwrap_or_else(|| BigDecimal::from(0)),
        closing_balance: closing_balance.unwrap_or_else(|| BigDecimal::from(0)),
        currency: config.default_currency.clone(),
    }
}

fn trailing_amount(text: &str) -> Option<BigDecimal> {
    text.split_whitespace().last().and_then(parse_amount)
}

/// Mask the last token carrying at least four digits, keeping the last four
fn mask_account_number(text: &str) -> Option<String> {
    text.split_whitespace().rev().find_map(|token| {
        let digits: Vec<char> = token.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.len() < 4 {
            return None;
        }
        let last_four: String = digits[digits.len() - 4..].iter().collect();
        Some(format!("****{}", last_four))
    })
}

/// First two `MM/DD/YYYY` tokens on the line, when they form a valid range
fn statement_period(text: &str) -> Option<(NaiveDate, NaiveDate)> {
    let mut dates = text.split_whitespace().filter_map(|token| {
        let token = token.trim_matches(|c: char| !c.is_ascii_digit());
        NaiveDate::parse_from_str(token, "%m/%d/%Y").ok()
    });

    let start = dates.next()?;
    let end = dates.next()?;
    (start <= end).then_some((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn lines(texts: &[&str]) -> Vec<Line> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| Line::new(1, i as u32, *t))
            .collect()
    }

    #[test]
    fn test_full_header() {
        let doc = lines(&[
            "Bank of Springfield",
            "Account Holder: JANE Q PUBLIC",
            "Account Number 0012-3456-7890",
            "Statement period 04/01/2024 through 04/30/2024",
            "Beginning balance on 04/01 1,250.75",
            "Ending balance on 04/30 980.00",
        ]);
        let metadata = extract_metadata(&doc, &EngineConfig::default());

        assert_eq!(metadata.institution, "Bank of Springfield");
        assert_eq!(metadata.account_holder, "JANE Q PUBLIC");
        assert_eq!(metadata.account_number.as_deref(), Some("****7890"));
        assert_eq!(metadata.statement_start, NaiveDate::from_ymd_opt(2024, 4, 1));
        assert_eq!(metadata.statement_end, NaiveDate::from_ymd_opt(2024, 4, 30));
        assert_eq!(metadata.opening_balance, BigDecimal::from_str("1250.75").unwrap());
        assert_eq!(metadata.closing_balance, BigDecimal::from_str("980.00").unwrap());
        assert_eq!(metadata.currency, "USD");
    }

    #[test]
    fn test_fallbacks() {
        let doc = lines(&["Beginning balance n/a", "Account Number ***"]);
        let config = EngineConfig {
            default_currency: "PHP".to_string(),
            ..EngineConfig::default()
        };
        let metadata = extract_metadata(&doc, &config);

        assert_eq!(metadata.institution, "Unknown Institution");
        assert_eq!(metadata.account_holder, "Unknown");
        assert_eq!(metadata.account_number, None);
        assert_eq!(metadata.statement_start, None);
        assert_eq!(metadata.opening_balance, BigDecimal::from(0));
        assert_eq!(metadata.closing_balance, BigDecimal::from(0));
        assert_eq!(metadata.currency, "PHP");
    }

    #[test]
    fn test_last_balance_line_wins() {
        let doc = lines(&[
            "Beginning balance 100.00",
            "Ending balance 150.00",
            "Beginning balance 200.00",
            "Beginning balance n/a",
            "Ending balance 250.00",
        ]);
        let metadata = extract_metadata(&doc, &EngineConfig::default());

        assert_eq!(metadata.opening_balance, BigDecimal::from_str("200.00").unwrap());
        assert_eq!(metadata.closing_balance, BigDecimal::from_str("250.00").unwrap());
    }

    #[test]
    fn test_reversed_period_is_ignored() {
        assert!(statement_period("04/30/2024 - 04/01/2024").is_none());
        assert!(statement_period("(01/01/2024 to 01/31/2024)").is_some());
    }
}
