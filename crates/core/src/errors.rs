//! Core error types for the Finlink holdings engine.
//!
//! The engine is pure arithmetic over caller-supplied snapshots, so the
//! taxonomy is narrow: malformed input that makes grouping impossible, and
//! internal calculation invariants.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the holdings engine.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Holdings calculation failed: {0}")]
    Calculation(#[from] CalculatorError),

    #[error("Invalid configuration value: {0}")]
    InvalidConfigValue(String),
}

impl Error {
    /// True when the error was caused by the caller's input rather than the engine.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}

/// Errors that occur while folding transactions into positions.
#[derive(Error, Debug)]
pub enum CalculatorError {
    #[error("Invalid transaction data: {0}")]
    InvalidTransaction(String),

    #[error("Calculation failed: {0}")]
    Calculation(String),
}

/// Validation errors for caller input and configuration parsing.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// A transaction has no account id, so it cannot be grouped.
    #[error("Transaction {transaction_id} is missing an account id")]
    MissingAccountId { transaction_id: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),
}

// === From implementations for common error types ===

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Validation(ValidationError::InvalidInput(err.to_string()))
    }
}
