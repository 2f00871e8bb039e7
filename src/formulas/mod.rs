//! Closed-form financial and project-estimation formulas
//!
//! Every function here is pure: no I/O, no logging, no shared state. Degenerate
//! inputs are mapped to a fixed value per formula instead of an error.

mod annuity;
mod npv;
mod cocomo;
mod inflation;
pub mod tax;

pub use annuity::calculate_annuity_factor;
pub use npv::{calculate_npv, discounted_cash_flows, DiscountedCashFlow, InvestmentVerdict};
pub use cocomo::{calculate_cocomo, CocomoCoefficients, CocomoEstimate, ProjectType};
pub use inflation::calculate_inflation_adjustment;
pub use tax::{calculate_indian_income_tax, SlabTax, TaxBracket, TaxBreakdown, TaxRegime};

/// Convert a percentage rate (5 means 5%) to a decimal rate
#[inline]
pub(crate) fn pct_to_decimal(rate_pct: f64) -> f64 {
    rate_pct / 100.0
}
