//! Present value annuity factor (PVAF)

use super::pct_to_decimal;

/// Calculate the present value of an ordinary annuity paying 1 per period.
///
/// # Arguments
/// * `rate` - Discount rate per period as a percentage (5 for 5%)
/// * `periods` - Number of periods
///
/// # Returns
/// * `f64` - `(1 - (1 + r)^-n) / r`, or 0 when either input is not positive
pub fn calculate_annuity_factor(rate: f64, periods: f64) -> f64 {
    if rate <= 0.0 || periods <= 0.0 {
        return 0.0;
    }

    let r = pct_to_decimal(rate);
    (1.0 - (1.0 + r).powf(-periods)) / r
}
