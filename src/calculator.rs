//! Request/response layer over the formulas
//!
//! Holds the configured tax regime once, then evaluates any number of typed
//! calculator requests, one at a time or as a parallel batch.

use log::{debug, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::error::Result;
use crate::format::{format_currency, format_number};
use crate::formulas::{
    calculate_annuity_factor, calculate_cocomo, calculate_inflation_adjustment, calculate_npv,
    discounted_cash_flows, CocomoEstimate, DiscountedCashFlow, InvestmentVerdict, ProjectType,
    TaxBreakdown, TaxRegime,
};
use crate::input::load_tax_brackets;

/// A single calculator invocation with validated numeric inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "calculator", rename_all = "kebab-case")]
pub enum CalculationRequest {
    AnnuityFactor {
        rate: f64,
        periods: f64,
    },
    #[serde(rename_all = "camelCase")]
    Npv {
        rate: f64,
        initial_investment: f64,
        #[serde(default)]
        cash_flows: Vec<f64>,
    },
    #[serde(rename_all = "camelCase")]
    Cocomo {
        kloc: f64,
        project_type: ProjectType,
    },
    #[serde(rename_all = "camelCase")]
    Inflation {
        initial_amount: f64,
        annual_rate: f64,
        years: f64,
    },
    #[serde(rename_all = "camelCase")]
    IncomeTax {
        total_income: f64,
    },
}

impl CalculationRequest {
    pub fn name(&self) -> &'static str {
        match self {
            CalculationRequest::AnnuityFactor { .. } => "annuity-factor",
            CalculationRequest::Npv { .. } => "npv",
            CalculationRequest::Cocomo { .. } => "cocomo",
            CalculationRequest::Inflation { .. } => "inflation",
            CalculationRequest::IncomeTax { .. } => "income-tax",
        }
    }
}

/// Output of a calculator, with the supporting detail the dashboard shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "calculator", rename_all = "kebab-case")]
pub enum CalculationResult {
    #[serde(rename_all = "camelCase")]
    AnnuityFactor {
        rate: f64,
        periods: f64,
        factor: f64,
    },
    #[serde(rename_all = "camelCase")]
    Npv {
        npv: f64,
        verdict: InvestmentVerdict,
        schedule: Vec<DiscountedCashFlow>,
    },
    #[serde(rename_all = "camelCase")]
    Cocomo {
        project_type: ProjectType,
        estimate: CocomoEstimate,
        average_staffing: f64,
    },
    #[serde(rename_all = "camelCase")]
    Inflation {
        initial_amount: f64,
        annual_rate: f64,
        years: f64,
        adjusted_amount: f64,
    },
    IncomeTax {
        breakdown: TaxBreakdown,
    },
}

impl fmt::Display for CalculationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalculationResult::AnnuityFactor { rate, periods, factor } => {
                writeln!(f, "Annuity Factor: {}", format_number(*factor, 4))?;
                write!(
                    f,
                    "Present value of {} received every period for {} periods, discounted at {}%.",
                    format_currency(1.0),
                    periods,
                    rate
                )
            }
            CalculationResult::Npv { npv, verdict, schedule } => {
                writeln!(f, "Net Present Value: {}", format_currency(*npv))?;
                writeln!(f, "{}", verdict.explanation())?;
                writeln!(f)?;
                writeln!(f, "{:>8} {:>18} {:>18}", "Period", "Cash Flow", "Discounted Value")?;
                for row in schedule {
                    writeln!(
                        f,
                        "{:>8} {:>18} {:>18}",
                        row.period,
                        format_currency(row.cash_flow),
                        format_currency(row.discounted_value)
                    )?;
                }
                Ok(())
            }
            CalculationResult::Cocomo { project_type, estimate, average_staffing } => {
                writeln!(f, "COCOMO ({})", project_type)?;
                writeln!(f, "  Effort:           {} person-months", format_number(estimate.effort, 2))?;
                writeln!(f, "  Development Time: {} months", format_number(estimate.development_time, 2))?;
                write!(f, "  Average Staffing: {} people", format_number(*average_staffing, 2))
            }
            CalculationResult::Inflation { initial_amount, annual_rate, years, adjusted_amount } => {
                writeln!(f, "Adjusted Amount: {}", format_currency(*adjusted_amount))?;
                write!(
                    f,
                    "To have the same purchasing power as {} today, you will need {} in {} years, \
                     assuming an average annual inflation rate of {}%.",
                    format_currency(*initial_amount),
                    format_currency(*adjusted_amount),
                    years,
                    annual_rate
                )
            }
            CalculationResult::IncomeTax { breakdown } => {
                writeln!(f, "Gross Income:       {}", format_currency(breakdown.gross_income))?;
                writeln!(f, "Standard Deduction: {}", format_currency(breakdown.standard_deduction))?;
                writeln!(f, "Taxable Income:     {}", format_currency(breakdown.taxable_income))?;
                if breakdown.rebate_applied {
                    writeln!(f, "Section 87A rebate applied")?;
                }
                for slab in &breakdown.slabs {
                    let upper = slab
                        .bracket
                        .upper
                        .map_or_else(|| "and above".to_string(), format_currency);
                    writeln!(
                        f,
                        "  {} - {} @ {}%: {}",
                        format_currency(slab.bracket.lower),
                        upper,
                        format_number(slab.bracket.rate * 100.0, 0),
                        format_currency(slab.tax)
                    )?;
                }
                writeln!(f, "Cess:               {}", format_currency(breakdown.cess))?;
                writeln!(f, "Total Tax Payable:  {}", format_currency(breakdown.total_tax))?;
                write!(f, "Effective Tax Rate: {}%", format_number(breakdown.effective_rate, 2))
            }
        }
    }
}

/// Calculator with a pre-loaded tax regime
///
/// # Example
/// ```ignore
/// let calculator = Calculator::from_tax_slabs_csv("data/tax/new_regime_ay_2025_26.csv")?;
/// let result = calculator.run(&CalculationRequest::IncomeTax { total_income: 1_000_000.0 });
/// ```
#[derive(Debug, Clone, Default)]
pub struct Calculator {
    tax_regime: TaxRegime,
}

impl Calculator {
    /// Calculator using the built-in AY 2025-26 New Regime
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tax_regime(tax_regime: TaxRegime) -> Self {
        Self { tax_regime }
    }

    /// Calculator whose slab table is read from a CSV file
    pub fn from_tax_slabs_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let brackets = load_tax_brackets(path)?;
        let tax_regime = TaxRegime::default().with_brackets(brackets)?;
        debug!("loaded tax regime with {} brackets", tax_regime.brackets().len());
        Ok(Self::with_tax_regime(tax_regime))
    }

    pub fn tax_regime(&self) -> &TaxRegime {
        &self.tax_regime
    }

    /// Evaluate one request
    pub fn run(&self, request: &CalculationRequest) -> CalculationResult {
        debug!("evaluating {} request", request.name());

        match request {
            CalculationRequest::AnnuityFactor { rate, periods } => {
                if *rate <= 0.0 || *periods <= 0.0 {
                    warn!("annuity factor with rate {} and periods {} is reported as 0", rate, periods);
                }
                CalculationResult::AnnuityFactor {
                    rate: *rate,
                    periods: *periods,
                    factor: calculate_annuity_factor(*rate, *periods),
                }
            }
            CalculationRequest::Npv { rate, initial_investment, cash_flows } => {
                if *rate < 0.0 {
                    warn!("negative discount rate {}; NPV is the negated investment", rate);
                }
                let npv = calculate_npv(*rate, *initial_investment, cash_flows);
                CalculationResult::Npv {
                    npv,
                    verdict: InvestmentVerdict::from_npv(npv),
                    schedule: discounted_cash_flows(*rate, *initial_investment, cash_flows),
                }
            }
            CalculationRequest::Cocomo { kloc, project_type } => {
                if *kloc <= 0.0 {
                    warn!("non-positive KLOC {}; COCOMO estimate is zero", kloc);
                }
                let estimate = calculate_cocomo(*kloc, *project_type);
                CalculationResult::Cocomo {
                    project_type: *project_type,
                    estimate,
                    average_staffing: estimate.average_staffing(),
                }
            }
            CalculationRequest::Inflation { initial_amount, annual_rate, years } => {
                if *initial_amount < 0.0 || *annual_rate < 0.0 || *years < 0.0 {
                    warn!("negative inflation input; amount {} passed through unchanged", initial_amount);
                }
                CalculationResult::Inflation {
                    initial_amount: *initial_amount,
                    annual_rate: *annual_rate,
                    years: *years,
                    adjusted_amount: calculate_inflation_adjustment(*initial_amount, *annual_rate, *years),
                }
            }
            CalculationRequest::IncomeTax { total_income } => CalculationResult::IncomeTax {
                breakdown: self.tax_regime.compute(*total_income),
            },
        }
    }

    /// Evaluate many requests in parallel; results keep the input order
    pub fn run_batch(&self, requests: &[CalculationRequest]) -> Vec<CalculationResult> {
        debug!("evaluating batch of {} requests", requests.len());
        requests.par_iter().map(|request| self.run(request)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formulas::TaxBracket;
    use approx::assert_relative_eq;

    #[test]
    fn test_run_npv_includes_schedule() {
        let calculator = Calculator::new();
        let result = calculator.run(&CalculationRequest::Npv {
            rate: 10.0,
            initial_investment: 10000.0,
            cash_flows: vec![3000.0, 4000.0, 5000.0, 4000.0],
        });

        match result {
            CalculationResult::Npv { npv, verdict, schedule } => {
                assert_relative_eq!(npv, 2521.69, epsilon = 0.01);
                assert_eq!(verdict, InvestmentVerdict::Profitable);
                assert_eq!(schedule.len(), 5);
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_run_income_tax_uses_configured_regime() {
        let flat = TaxRegime::default()
            .with_brackets(vec![TaxBracket::new(0.0, None, 0.10)])
            .unwrap();
        let calculator = Calculator::with_tax_regime(flat);

        match calculator.run(&CalculationRequest::IncomeTax { total_income: 1_050_000.0 }) {
            CalculationResult::IncomeTax { breakdown } => {
                assert_relative_eq!(breakdown.total_tax, 104_000.0, epsilon = 1e-6);
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_batch_preserves_order() {
        let calculator = Calculator::new();
        let requests: Vec<_> = (1..=50)
            .map(|i| CalculationRequest::AnnuityFactor { rate: i as f64, periods: 10.0 })
            .collect();

        let results = calculator.run_batch(&requests);
        assert_eq!(results.len(), 50);
        for (request, result) in requests.iter().zip(&results) {
            assert_eq!(result, &calculator.run(request));
        }
    }

    #[test]
    fn test_sample_requests_file() {
        let text = std::fs::read_to_string("data/sample_requests.json").unwrap();
        let requests: Vec<CalculationRequest> = serde_json::from_str(&text).unwrap();
        let names: Vec<_> = requests.iter().map(|r| r.name()).collect();
        assert_eq!(names, ["annuity-factor", "npv", "cocomo", "inflation", "income-tax"]);

        let results = Calculator::new().run_batch(&requests);
        assert!(matches!(results[4], CalculationResult::IncomeTax { .. }));
    }

    #[test]
    fn test_request_json_shape() {
        let json = r#"{"calculator":"cocomo","kloc":50,"projectType":"Organic"}"#;
        let request: CalculationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(
            request,
            CalculationRequest::Cocomo { kloc: 50.0, project_type: ProjectType::Organic }
        );

        let json = r#"{"calculator":"npv","rate":10,"initialInvestment":1000}"#;
        let request: CalculationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.name(), "npv");

        let json = r#"{"calculator":"income-tax","totalIncome":750000}"#;
        let request: CalculationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request, CalculationRequest::IncomeTax { total_income: 750_000.0 });
    }

    #[test]
    fn test_result_serializes_with_tag() {
        let result = Calculator::new().run(&CalculationRequest::Inflation {
            initial_amount: 1000.0,
            annual_rate: 3.0,
            years: 10.0,
        });
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["calculator"], "inflation");
        assert!((value["adjustedAmount"].as_f64().unwrap() - 1343.92).abs() < 0.01);
    }

    #[test]
    fn test_display_summaries() {
        let calculator = Calculator::new();

        let text = calculator
            .run(&CalculationRequest::IncomeTax { total_income: 1_000_000.0 })
            .to_string();
        assert!(text.contains("Total Tax Payable:  ₹54,600.00"));
        assert!(text.contains("Effective Tax Rate: 5.46%"));

        let text = calculator
            .run(&CalculationRequest::AnnuityFactor { rate: 5.0, periods: 10.0 })
            .to_string();
        assert!(text.starts_with("Annuity Factor: 7.7217"));
    }
}
