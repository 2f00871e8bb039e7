//! Inflation adjustment of a present amount

use super::pct_to_decimal;

/// Amount needed after `years` to keep the purchasing power of `initial_amount`
/// today, under a constant annual inflation rate given as a percentage.
///
/// If any input is negative the amount is returned unchanged.
pub fn calculate_inflation_adjustment(initial_amount: f64, annual_rate: f64, years: f64) -> f64 {
    if initial_amount < 0.0 || annual_rate < 0.0 || years < 0.0 {
        return initial_amount;
    }

    initial_amount * (1.0 + pct_to_decimal(annual_rate)).powf(years)
}
