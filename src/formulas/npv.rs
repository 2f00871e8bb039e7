//! Net present value of an investment and its discounted cash-flow schedule

use serde::{Deserialize, Serialize};

use super::pct_to_decimal;

/// Calculate the Net Present Value (NPV) of an investment.
///
/// # Arguments
/// * `rate` - Discount rate per period as a percentage (10 for 10%)
/// * `initial_investment` - Outlay at period 0, given as a positive magnitude
/// * `cash_flows` - Cash flows for periods 1..=n, any sign
///
/// A negative rate is not discounted at all: the result is `-initial_investment`.
pub fn calculate_npv(rate: f64, initial_investment: f64, cash_flows: &[f64]) -> f64 {
    if rate < 0.0 {
        return -initial_investment;
    }

    let r = pct_to_decimal(rate);
    let mut npv = -initial_investment;

    for (index, &cf) in cash_flows.iter().enumerate() {
        let period = index as i32 + 1;
        npv += cf / (1.0 + r).powi(period);
    }

    npv
}

/// One row of the cash-flow details table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiscountedCashFlow {
    /// 0 for the initial investment, 1..=n for the series
    pub period: u32,
    pub cash_flow: f64,
    pub discounted_value: f64,
}

/// Build the per-period schedule behind an NPV figure.
///
/// Period 0 carries the negated investment undiscounted. Unlike `calculate_npv` the
/// schedule always discounts at the given rate, so for negative rates the rows do not
/// sum to the NPV.
pub fn discounted_cash_flows(
    rate: f64,
    initial_investment: f64,
    cash_flows: &[f64],
) -> Vec<DiscountedCashFlow> {
    let r = pct_to_decimal(rate);

    let mut rows = Vec::with_capacity(cash_flows.len() + 1);
    rows.push(DiscountedCashFlow {
        period: 0,
        cash_flow: -initial_investment,
        discounted_value: -initial_investment,
    });

    rows.extend(cash_flows.iter().enumerate().map(|(index, &cf)| {
        let period = index as u32 + 1;
        DiscountedCashFlow {
            period,
            cash_flow: cf,
            discounted_value: cf / (1.0 + r).powi(period as i32),
        }
    }));

    rows
}

/// Reading of an NPV figure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InvestmentVerdict {
    /// NPV >= 0
    Profitable,
    Unprofitable,
}

impl InvestmentVerdict {
    pub fn from_npv(npv: f64) -> Self {
        if npv >= 0.0 {
            InvestmentVerdict::Profitable
        } else {
            InvestmentVerdict::Unprofitable
        }
    }

    pub fn explanation(&self) -> &'static str {
        match self {
            InvestmentVerdict::Profitable => {
                "A positive NPV suggests the investment is profitable and will add value, \
                 as projected earnings exceed costs in today's money."
            }
            InvestmentVerdict::Unprofitable => {
                "A negative NPV suggests the investment may be unprofitable, \
                 as the projected costs outweigh the earnings in today's money."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const FLOWS: [f64; 4] = [3000.0, 4000.0, 5000.0, 4000.0];

    #[test]
    fn test_npv_matches_direct_discounting() {
        let npv = calculate_npv(10.0, 10000.0, &FLOWS);
        let expected = -10000.0 + 3000.0 / 1.1 + 4000.0 / 1.21 + 5000.0 / 1.331 + 4000.0 / 1.4641;
        assert_relative_eq!(npv, expected, epsilon = 1e-9);
        assert_relative_eq!(npv, 2521.69, epsilon = 0.01);
    }

    #[test]
    fn test_negative_rate_short_circuits() {
        assert_eq!(calculate_npv(-5.0, 1000.0, &[500.0]), -1000.0);
        assert_eq!(calculate_npv(-0.01, 250.0, &FLOWS), -250.0);
    }

    #[test]
    fn test_zero_rate_is_plain_sum() {
        let npv = calculate_npv(0.0, 10000.0, &FLOWS);
        assert_relative_eq!(npv, 6000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_empty_series() {
        assert_eq!(calculate_npv(7.0, 1200.0, &[]), -1200.0);
    }

    #[test]
    fn test_negative_later_flows() {
        // Decommissioning cost in the final period
        let npv = calculate_npv(5.0, 0.0, &[1000.0, -1000.0]);
        assert_relative_eq!(npv, 1000.0 / 1.05 - 1000.0 / 1.1025, epsilon = 1e-9);
        assert!(npv > 0.0);
    }

    #[test]
    fn test_strictly_decreasing_in_rate() {
        let mut previous = f64::INFINITY;
        for step in 0..=30 {
            let npv = calculate_npv(step as f64, 10000.0, &FLOWS);
            assert!(npv < previous);
            previous = npv;
        }
    }

    #[test]
    fn test_repeatable() {
        let a = calculate_npv(6.5, 4321.0, &FLOWS);
        let b = calculate_npv(6.5, 4321.0, &FLOWS);
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn test_schedule_sums_to_npv() {
        let rows = discounted_cash_flows(10.0, 10000.0, &FLOWS);
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].period, 0);
        assert_eq!(rows[0].discounted_value, -10000.0);
        assert_eq!(rows[4].period, 4);
        assert_relative_eq!(rows[1].discounted_value, 3000.0 / 1.1, epsilon = 1e-9);

        let total: f64 = rows.iter().map(|row| row.discounted_value).sum();
        assert_relative_eq!(total, calculate_npv(10.0, 10000.0, &FLOWS), epsilon = 1e-9);
    }

    #[test]
    fn test_verdict() {
        assert_eq!(InvestmentVerdict::from_npv(0.0), InvestmentVerdict::Profitable);
        assert_eq!(InvestmentVerdict::from_npv(12.5), InvestmentVerdict::Profitable);
        assert_eq!(InvestmentVerdict::from_npv(-0.01), InvestmentVerdict::Unprofitable);
    }
}
