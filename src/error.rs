//! Error types for the tax-lot engine

use thiserror::Error;

/// Main error type for the tax-lot engine.
///
/// Errors are raised only at the API boundary (bad configuration,
/// serialization). Data-quality issues in the trade history never
/// error; they surface as [`crate::sales::Diagnostic`] flags instead.
#[derive(Error, Debug)]
pub enum TaxLotError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

/// Result type alias for tax-lot engine operations
pub type Result<T> = std::result::Result<T, TaxLotError>;
