//! fincalc - Financial and project-management calculators
//!
//! This library provides:
//! - Present value annuity factor and net present value (with discounted schedule)
//! - Basic COCOMO effort and schedule estimation
//! - Inflation adjustment of a present amount
//! - Indian income tax under the New Regime (AY 2025-26), with slab breakdown
//! - Form parsing/validation, INR formatting and a batch calculator for front ends

pub mod error;
pub mod formulas;
pub mod input;
pub mod format;
pub mod calculator;

// Re-export commonly used types
pub use error::{CalcError, Result};
pub use formulas::{
    calculate_annuity_factor, calculate_cocomo, calculate_indian_income_tax,
    calculate_inflation_adjustment, calculate_npv, CocomoEstimate, ProjectType, TaxRegime,
};
pub use calculator::{CalculationRequest, CalculationResult, Calculator};
