//! Input layer: parsing form text and loading CSV tables

mod parse;
mod forms;
pub mod loader;

pub use parse::{parse_cash_flow, parse_decimal, parse_whole};
pub use forms::{AnnuityForm, CocomoForm, IncomeTaxForm, InflationForm, NpvForm, MAX_INFLATION_YEARS};
pub use loader::{load_cash_flows, load_tax_brackets, DEFAULT_TAX_SLABS_PATH};
