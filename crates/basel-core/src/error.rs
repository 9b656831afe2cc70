//! Error types for capital and liquidity computations.

use thiserror::Error;

/// Top-level error for the capital engine.
#[derive(Error, Debug)]
pub enum BaselError {
    #[error("Invalid exposure '{asset_id}': {reason}")]
    InvalidExposure { asset_id: String, reason: String },

    #[error("Invalid input '{field}': {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("Division by zero computing {ratio}: {denominator} is zero")]
    DivisionByZero {
        ratio: &'static str,
        denominator: &'static str,
    },

    #[error("Unknown stress scenario: {0}")]
    UnknownScenario(String),

    #[error("Invalid stress scenario '{name}': {reason}")]
    InvalidScenario { name: String, reason: String },

    #[error("Data error: {0}")]
    Data(#[from] DataError),
}

impl BaselError {
    /// Shorthand for an [`BaselError::InvalidExposure`].
    pub fn invalid_exposure(asset_id: impl Into<String>, reason: impl Into<String>) -> Self {
        BaselError::InvalidExposure {
            asset_id: asset_id.into(),
            reason: reason.into(),
        }
    }
}

/// Errors raised by portfolio sources (CSV files, the synthetic generator).
#[derive(Error, Debug)]
pub enum DataError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("CSV error: {0}")]
    Csv(String),

    #[error("Parse error at row {row}: {reason}")]
    Parse { row: usize, reason: String },

    #[error("Generation error: {0}")]
    Generation(String),
}

/// Result type alias for capital engine operations.
pub type BaselResult<T> = Result<T, BaselError>;
