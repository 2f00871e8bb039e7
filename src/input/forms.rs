//! Calculator forms: raw field text, dashboard defaults and validation
//!
//! `Default` on each form is the state the dashboard resets to on "Clear".
//! `validate` turns the text into a typed `CalculationRequest`.

use serde::{Deserialize, Serialize};

use super::parse::{parse_cash_flow, parse_decimal, parse_whole};
use crate::calculator::CalculationRequest;
use crate::error::{CalcError, Result};
use crate::formulas::ProjectType;

/// Upper bound on the inflation horizon
pub const MAX_INFLATION_YEARS: i64 = 1000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnuityForm {
    pub rate: String,
    pub periods: String,
}

impl Default for AnnuityForm {
    fn default() -> Self {
        Self {
            rate: "5".to_string(),
            periods: "10".to_string(),
        }
    }
}

impl AnnuityForm {
    pub fn validate(&self) -> Result<CalculationRequest> {
        let rate = parse_decimal("rate", &self.rate)?;
        let periods = parse_whole("periods", &self.periods)?;

        if rate <= 0.0 {
            return Err(CalcError::invalid_input("rate", "must be greater than 0"));
        }
        if periods <= 0 {
            return Err(CalcError::invalid_input("periods", "must be at least 1"));
        }

        Ok(CalculationRequest::AnnuityFactor {
            rate,
            periods: periods as f64,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NpvForm {
    pub rate: String,
    pub initial_investment: String,
    pub cash_flows: Vec<String>,
}

impl Default for NpvForm {
    fn default() -> Self {
        Self {
            rate: "10".to_string(),
            initial_investment: "10000".to_string(),
            cash_flows: ["3000", "4000", "5000", "4000"]
                .iter()
                .map(|cf| cf.to_string())
                .collect(),
        }
    }
}

impl NpvForm {
    /// Append an empty period row
    pub fn add_cash_flow(&mut self) {
        self.cash_flows.push(String::new());
    }

    /// Remove a period row; the last remaining row is kept
    pub fn remove_cash_flow(&mut self, index: usize) -> bool {
        if self.cash_flows.len() <= 1 || index >= self.cash_flows.len() {
            return false;
        }
        self.cash_flows.remove(index);
        true
    }

    pub fn set_cash_flow(&mut self, index: usize, value: impl Into<String>) {
        if let Some(slot) = self.cash_flows.get_mut(index) {
            *slot = value.into();
        }
    }

    /// Rate and investment must parse; blank cash flows count as 0
    pub fn validate(&self) -> Result<CalculationRequest> {
        let rate = parse_decimal("rate", &self.rate)?;
        let initial_investment = parse_decimal("initial investment", &self.initial_investment)?;
        let cash_flows = self.cash_flows.iter().map(|cf| parse_cash_flow(cf)).collect();

        Ok(CalculationRequest::Npv {
            rate,
            initial_investment,
            cash_flows,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CocomoForm {
    pub kloc: String,
    pub project_type: ProjectType,
}

impl Default for CocomoForm {
    fn default() -> Self {
        Self {
            kloc: "50".to_string(),
            project_type: ProjectType::Semidetached,
        }
    }
}

impl CocomoForm {
    pub fn validate(&self) -> Result<CalculationRequest> {
        let kloc = parse_decimal("kloc", &self.kloc)?;
        if kloc <= 0.0 {
            return Err(CalcError::invalid_input("kloc", "must be greater than 0"));
        }

        Ok(CalculationRequest::Cocomo {
            kloc,
            project_type: self.project_type,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InflationForm {
    pub initial_amount: String,
    pub annual_rate: String,
    pub years: String,
}

impl Default for InflationForm {
    fn default() -> Self {
        Self {
            initial_amount: "1000".to_string(),
            annual_rate: "3".to_string(),
            years: "10".to_string(),
        }
    }
}

impl InflationForm {
    /// Years must be a whole number in `0..=MAX_INFLATION_YEARS`. Negative amounts and
    /// rates are passed on; the formula returns the amount unchanged for them.
    pub fn validate(&self) -> Result<CalculationRequest> {
        let initial_amount = parse_decimal("initial amount", &self.initial_amount)?;
        let annual_rate = parse_decimal("annual rate", &self.annual_rate)?;
        let years = parse_whole("years", &self.years)?;

        if !(0..=MAX_INFLATION_YEARS).contains(&years) {
            return Err(CalcError::invalid_input(
                "years",
                format!("must be between 0 and {}", MAX_INFLATION_YEARS),
            ));
        }

        Ok(CalculationRequest::Inflation {
            initial_amount,
            annual_rate,
            years: years as f64,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeTaxForm {
    pub income: String,
}

impl Default for IncomeTaxForm {
    fn default() -> Self {
        Self {
            income: "1000000".to_string(),
        }
    }
}

impl IncomeTaxForm {
    pub fn validate(&self) -> Result<CalculationRequest> {
        let total_income = parse_decimal("income", &self.income)?;
        if total_income < 0.0 {
            return Err(CalcError::invalid_input("income", "must not be negative"));
        }

        Ok(CalculationRequest::IncomeTax { total_income })
    }
}
