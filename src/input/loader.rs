//! CSV loaders for cash-flow series and tax slab tables

use csv::Reader;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

use crate::error::{CalcError, Result};
use crate::formulas::TaxBracket;

/// Default location of the AY 2025-26 New Regime slab table
pub const DEFAULT_TAX_SLABS_PATH: &str = "data/tax/new_regime_ay_2025_26.csv";

/// Raw CSV row for a cash-flow series
#[derive(Debug, Deserialize)]
struct CashFlowRow {
    period: u32,
    cash_flow: f64,
}

/// Raw CSV row for a slab table. An empty `upper` marks the open top band.
#[derive(Debug, Deserialize)]
struct TaxSlabRow {
    lower: f64,
    upper: Option<f64>,
    rate_pct: f64,
}

/// Load a cash-flow series from a `period,cash_flow` CSV file
pub fn load_cash_flows<P: AsRef<Path>>(path: P) -> Result<Vec<f64>> {
    let reader = Reader::from_path(path)?;
    collect_cash_flows(reader)
}

/// Read a cash-flow series from any CSV source
pub fn read_cash_flows<R: Read>(source: R) -> Result<Vec<f64>> {
    collect_cash_flows(Reader::from_reader(source))
}

fn collect_cash_flows<R: Read>(mut reader: Reader<R>) -> Result<Vec<f64>> {
    let mut rows: Vec<CashFlowRow> = Vec::new();
    for result in reader.deserialize() {
        rows.push(result?);
    }

    // Rows may come in any order but must cover periods 1..=n exactly once
    rows.sort_by_key(|row| row.period);
    for (index, row) in rows.iter().enumerate() {
        let expected = index as u32 + 1;
        if row.period != expected {
            return Err(CalcError::invalid_input(
                "cash flows",
                format!("expected period {}, found period {}", expected, row.period),
            ));
        }
    }

    Ok(rows.into_iter().map(|row| row.cash_flow).collect())
}

/// Load a slab table from a `lower,upper,rate_pct` CSV file
pub fn load_tax_brackets<P: AsRef<Path>>(path: P) -> Result<Vec<TaxBracket>> {
    let reader = Reader::from_path(path)?;
    collect_tax_brackets(reader)
}

/// Read a slab table from any CSV source
pub fn read_tax_brackets<R: Read>(source: R) -> Result<Vec<TaxBracket>> {
    collect_tax_brackets(Reader::from_reader(source))
}

fn collect_tax_brackets<R: Read>(mut reader: Reader<R>) -> Result<Vec<TaxBracket>> {
    let mut brackets = Vec::new();
    for result in reader.deserialize() {
        let row: TaxSlabRow = result?;
        brackets.push(TaxBracket::new(row.lower, row.upper, row.rate_pct / 100.0));
    }
    Ok(brackets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formulas::TaxRegime;

    #[test]
    fn test_read_cash_flows_sorted() {
        let data = "period,cash_flow\n2,4000\n1,3000\n3,-500.5\n";
        let flows = read_cash_flows(data.as_bytes()).unwrap();
        assert_eq!(flows, vec![3000.0, 4000.0, -500.5]);
    }

    #[test]
    fn test_read_cash_flows_rejects_gaps() {
        let data = "period,cash_flow\n1,3000\n3,4000\n";
        assert!(matches!(
            read_cash_flows(data.as_bytes()),
            Err(CalcError::InvalidInput { .. })
        ));

        let data = "period,cash_flow\n1,3000\n1,4000\n";
        assert!(read_cash_flows(data.as_bytes()).is_err());
    }

    #[test]
    fn test_read_cash_flows_bad_number() {
        let data = "period,cash_flow\n1,abc\n";
        assert!(matches!(read_cash_flows(data.as_bytes()), Err(CalcError::Csv(_))));
    }

    #[test]
    fn test_read_tax_brackets_open_top() {
        let data = "lower,upper,rate_pct\n0,400000,0\n400000,,10\n";
        let brackets = read_tax_brackets(data.as_bytes()).unwrap();
        assert_eq!(brackets.len(), 2);
        assert_eq!(brackets[0].upper, Some(400_000.0));
        assert_eq!(brackets[1].upper, None);
        assert!((brackets[1].rate - 0.10).abs() < 1e-12);
    }

    #[test]
    fn test_load_default_slabs_match_builtin() {
        let brackets = load_tax_brackets(DEFAULT_TAX_SLABS_PATH)
            .expect("default slab table should load");
        let regime = TaxRegime::default().with_brackets(brackets).unwrap();

        for income in [0.0, 750_000.0, 1_000_000.0, 1_337_000.0, 2_500_000.0] {
            let loaded = regime.compute(income).total_tax;
            let builtin = TaxRegime::default().compute(income).total_tax;
            assert!((loaded - builtin).abs() < 1e-6, "income {}", income);
        }
    }
}
