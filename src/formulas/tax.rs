//! Indian income tax under the New Regime
//!
//! Supports:
//! - The AY 2025-26 slab table as the compiled-in default
//! - Standard deduction for salaried individuals
//! - Section 87A full rebate below a taxable-income threshold
//! - Health and education cess on top of slab tax
//! - Custom slab tables (see `input::loader::load_tax_brackets`)

use serde::{Deserialize, Serialize};

use crate::error::{CalcError, Result};

pub const STANDARD_DEDUCTION: f64 = 50_000.0;
pub const REBATE_THRESHOLD: f64 = 700_000.0;
pub const CESS_RATE: f64 = 0.04;

/// One marginal band of a slab table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub lower: f64,
    /// None for the top band
    pub upper: Option<f64>,
    /// Marginal rate as a decimal (0.05 for 5%)
    pub rate: f64,
}

impl TaxBracket {
    pub const fn new(lower: f64, upper: Option<f64>, rate: f64) -> Self {
        Self { lower, upper, rate }
    }

    /// Portion of `taxable_income` falling inside this band
    pub fn taxable_amount(&self, taxable_income: f64) -> f64 {
        let top = self.upper.map_or(taxable_income, |upper| taxable_income.min(upper));
        (top - self.lower).max(0.0)
    }
}

/// Tax contributed by a single band
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlabTax {
    pub bracket: TaxBracket,
    pub taxable_amount: f64,
    pub tax: f64,
}

/// Full working of a tax computation
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxBreakdown {
    pub gross_income: f64,
    pub standard_deduction: f64,
    pub taxable_income: f64,
    pub rebate_applied: bool,
    pub slabs: Vec<SlabTax>,
    pub slab_tax: f64,
    pub cess: f64,
    pub total_tax: f64,
    /// Total tax as a percentage of gross income
    pub effective_rate: f64,
}

/// Slab table plus the deduction, rebate and cess that frame it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxRegime {
    brackets: Vec<TaxBracket>,
    pub standard_deduction: f64,
    pub rebate_threshold: f64,
    pub cess_rate: f64,
}

impl TaxRegime {
    /// New Regime slabs for assessment year 2025-26
    pub fn new_regime_ay_2025_26() -> Self {
        Self {
            brackets: vec![
                TaxBracket::new(0.0, Some(300_000.0), 0.00),
                TaxBracket::new(300_000.0, Some(600_000.0), 0.05),
                TaxBracket::new(600_000.0, Some(900_000.0), 0.10),
                TaxBracket::new(900_000.0, Some(1_200_000.0), 0.15),
                TaxBracket::new(1_200_000.0, Some(1_500_000.0), 0.20),
                TaxBracket::new(1_500_000.0, None, 0.30),
            ],
            standard_deduction: STANDARD_DEDUCTION,
            rebate_threshold: REBATE_THRESHOLD,
            cess_rate: CESS_RATE,
        }
    }

    /// Replace the slab table, keeping deduction, rebate and cess.
    ///
    /// The table must start at 0, be contiguous with strictly increasing bounds,
    /// leave only the last band open-ended and use rates within [0, 1].
    pub fn with_brackets(mut self, brackets: Vec<TaxBracket>) -> Result<Self> {
        validate_brackets(&brackets)?;
        self.brackets = brackets;
        Ok(self)
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    /// Compute tax payable on `total_income` with the full working
    pub fn compute(&self, total_income: f64) -> TaxBreakdown {
        if total_income <= 0.0 {
            return TaxBreakdown {
                gross_income: total_income,
                ..Default::default()
            };
        }

        let taxable_income = (total_income - self.standard_deduction).max(0.0);
        let standard_deduction = total_income - taxable_income;

        // 87A rebate is tested on post-deduction income, before any slab math
        if taxable_income <= self.rebate_threshold {
            return TaxBreakdown {
                gross_income: total_income,
                standard_deduction,
                taxable_income,
                rebate_applied: true,
                ..Default::default()
            };
        }

        let slabs: Vec<SlabTax> = self
            .brackets
            .iter()
            .filter(|bracket| taxable_income > bracket.lower)
            .map(|bracket| {
                let taxable_amount = bracket.taxable_amount(taxable_income);
                SlabTax {
                    bracket: *bracket,
                    taxable_amount,
                    tax: taxable_amount * bracket.rate,
                }
            })
            .collect();

        let slab_tax: f64 = slabs.iter().map(|slab| slab.tax).sum();
        let cess = slab_tax * self.cess_rate;
        let total_tax = slab_tax + cess;

        TaxBreakdown {
            gross_income: total_income,
            standard_deduction,
            taxable_income,
            rebate_applied: false,
            slabs,
            slab_tax,
            cess,
            total_tax,
            effective_rate: total_tax / total_income * 100.0,
        }
    }
}

impl Default for TaxRegime {
    fn default() -> Self {
        Self::new_regime_ay_2025_26()
    }
}

fn validate_brackets(brackets: &[TaxBracket]) -> Result<()> {
    let first = brackets
        .first()
        .ok_or_else(|| CalcError::InvalidTaxSlabs("no brackets".to_string()))?;
    if first.lower != 0.0 {
        return Err(CalcError::InvalidTaxSlabs(format!(
            "first bracket must start at 0, starts at {}",
            first.lower
        )));
    }

    let last_index = brackets.len() - 1;
    for (i, bracket) in brackets.iter().enumerate() {
        if !(0.0..=1.0).contains(&bracket.rate) {
            return Err(CalcError::InvalidTaxSlabs(format!(
                "bracket {} has rate {} outside [0, 1]",
                i + 1,
                bracket.rate
            )));
        }

        match bracket.upper {
            Some(upper) if upper <= bracket.lower => {
                return Err(CalcError::InvalidTaxSlabs(format!(
                    "bracket {} upper bound {} is not above lower bound {}",
                    i + 1,
                    upper,
                    bracket.lower
                )));
            }
            None if i != last_index => {
                return Err(CalcError::InvalidTaxSlabs(format!(
                    "only the last bracket may be open-ended, bracket {} is",
                    i + 1
                )));
            }
            _ => {}
        }

        if let Some(next) = brackets.get(i + 1) {
            if bracket.upper != Some(next.lower) {
                return Err(CalcError::InvalidTaxSlabs(format!(
                    "gap or overlap between bracket {} and {}",
                    i + 1,
                    i + 2
                )));
            }
        }
    }

    Ok(())
}

/// Tax payable under the default AY 2025-26 New Regime, cess included
pub fn calculate_indian_income_tax(total_income: f64) -> f64 {
    TaxRegime::default().compute(total_income).total_tax
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_non_positive_income() {
        assert_eq!(calculate_indian_income_tax(0.0), 0.0);
        assert_eq!(calculate_indian_income_tax(-10_000.0), 0.0);
    }

    #[test]
    fn test_rebate_at_threshold() {
        assert_eq!(calculate_indian_income_tax(750_000.0), 0.0);

        let breakdown = TaxRegime::default().compute(750_000.0);
        assert!(breakdown.rebate_applied);
        assert_eq!(breakdown.taxable_income, 700_000.0);
        assert!(breakdown.slabs.is_empty());
    }

    #[test]
    fn test_no_marginal_relief_past_threshold() {
        // One rupee over the rebate limit taxes the whole 3L-7L range
        let tax = calculate_indian_income_tax(750_001.0);
        assert_relative_eq!(tax, (15_000.0 + 10_000.1) * 1.04, epsilon = 1e-6);
    }

    #[test]
    fn test_ten_lakh_income() {
        let breakdown = TaxRegime::default().compute(1_000_000.0);

        assert_eq!(breakdown.taxable_income, 950_000.0);
        assert_eq!(breakdown.standard_deduction, 50_000.0);
        assert!(!breakdown.rebate_applied);
        assert_relative_eq!(breakdown.slab_tax, 52_500.0, epsilon = 1e-6);
        assert_relative_eq!(breakdown.cess, 2_100.0, epsilon = 1e-6);
        assert_relative_eq!(breakdown.total_tax, 54_600.0, epsilon = 1e-6);
        assert_relative_eq!(breakdown.effective_rate, 5.46, epsilon = 1e-9);

        // 0%, 5%, 10% and the partial 15% band
        assert_eq!(breakdown.slabs.len(), 4);
        assert_relative_eq!(breakdown.slabs[3].taxable_amount, 50_000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_top_band() {
        // Taxable 20L: 15k + 30k + 45k + 60k + 150k
        let tax = calculate_indian_income_tax(2_050_000.0);
        assert_relative_eq!(tax, 300_000.0 * 1.04, epsilon = 1e-6);
    }

    #[test]
    fn test_income_below_deduction() {
        let breakdown = TaxRegime::default().compute(30_000.0);
        assert_eq!(breakdown.taxable_income, 0.0);
        assert_eq!(breakdown.standard_deduction, 30_000.0);
        assert_eq!(breakdown.total_tax, 0.0);
    }

    #[test]
    fn test_custom_brackets() {
        let regime = TaxRegime::default()
            .with_brackets(vec![
                TaxBracket::new(0.0, Some(1_000_000.0), 0.10),
                TaxBracket::new(1_000_000.0, None, 0.20),
            ])
            .unwrap();

        // Taxable 12L: 1L + 40k
        let breakdown = regime.compute(1_250_000.0);
        assert_relative_eq!(breakdown.slab_tax, 140_000.0, epsilon = 1e-6);
        assert_relative_eq!(breakdown.total_tax, 145_600.0, epsilon = 1e-6);
    }

    #[test]
    fn test_rejects_bad_brackets() {
        let base = TaxRegime::default();

        assert!(base.clone().with_brackets(vec![]).is_err());
        assert!(base
            .clone()
            .with_brackets(vec![TaxBracket::new(100.0, None, 0.1)])
            .is_err());
        assert!(base
            .clone()
            .with_brackets(vec![
                TaxBracket::new(0.0, Some(500.0), 0.1),
                TaxBracket::new(600.0, None, 0.2),
            ])
            .is_err());
        assert!(base
            .clone()
            .with_brackets(vec![
                TaxBracket::new(0.0, None, 0.1),
                TaxBracket::new(500.0, None, 0.2),
            ])
            .is_err());
        assert!(base
            .with_brackets(vec![TaxBracket::new(0.0, None, 1.5)])
            .is_err());
    }
}
