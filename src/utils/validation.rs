//! Validation utilities

use bigdecimal::BigDecimal;

use crate::types::*;

/// Validate that an amount is a non-negative magnitude
pub fn validate_non_negative_amount(amount: &BigDecimal) -> DocumentResult<()> {
    if *amount < BigDecimal::from(0) {
        Err(DocumentError::Validation(format!(
            "Amount must be a non-negative magnitude, got {}",
            amount
        )))
    } else {
        Ok(())
    }
}

/// Validate a single input line position
pub fn validate_line(line: &Line) -> DocumentResult<()> {
    if line.page_number == 0 {
        return Err(DocumentError::Validation(format!(
            "Page numbers start at 1 (line {}: '{}')",
            line.line_index, line.text
        )));
    }

    Ok(())
}

/// Validate that lines are well-formed and in reading order
///
/// Blank lines are allowed; the pipeline skips them.
pub fn validate_lines(lines: &[Line]) -> DocumentResult<()> {
    for line in lines {
        validate_line(line)?;
    }

    for pair in lines.windows(2) {
        let (previous, current) = (&pair[0], &pair[1]);
        if (current.page_number, current.line_index) <= (previous.page_number, previous.line_index)
        {
            return Err(DocumentError::Validation(format!(
                "Line {}:{} is out of reading order after {}:{}",
                current.page_number, current.line_index, previous.page_number, previous.line_index
            )));
        }
    }

    Ok(())
}
