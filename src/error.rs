//! Error types for the input, loader and calculator layers
//!
//! The formulas themselves never fail; everything here originates upstream of them
//! (parsing user text, reading CSV tables) or around them (request decoding).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CalcError {
    /// Text that should hold a number could not be parsed
    #[error("{field}: '{value}' is not a valid number")]
    InvalidNumber { field: &'static str, value: String },

    /// A number parsed fine but is outside what the calculator accepts
    #[error("{field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("unknown project type '{0}' (expected Organic, Semidetached or Embedded)")]
    UnknownProjectType(String),

    /// A tax slab table failed validation
    #[error("invalid tax slabs: {0}")]
    InvalidTaxSlabs(String),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl CalcError {
    pub(crate) fn invalid_input(field: &'static str, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;
