//! Text-to-number parsing for form fields

use crate::error::{CalcError, Result};

/// Parse a decimal field. Surrounding whitespace is ignored; empty text,
/// non-numeric text and infinities/NaN are rejected.
pub fn parse_decimal(field: &'static str, text: &str) -> Result<f64> {
    let trimmed = text.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(CalcError::InvalidNumber {
            field,
            value: text.to_string(),
        }),
    }
}

/// Parse a whole-number field such as a period or year count
pub fn parse_whole(field: &'static str, text: &str) -> Result<i64> {
    text.trim().parse::<i64>().map_err(|_| CalcError::InvalidNumber {
        field,
        value: text.to_string(),
    })
}

/// Parse one cash-flow entry; blank or unreadable entries count as 0
pub fn parse_cash_flow(text: &str) -> f64 {
    parse_decimal("cash flow", text).unwrap_or(0.0)
}
