//! Tax calculation error types.

use tallykit_shared::AppError;
use thiserror::Error;

/// Tax calculation errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaxError {
    /// Price or rate is missing, not a number, negative, or too large.
    ///
    /// Callers clear any previous result instead of showing stale data.
    #[error("Invalid tax input: {0}")]
    InvalidInput(String),
}

impl From<TaxError> for AppError {
    fn from(err: TaxError) -> Self {
        Self::Validation(err.to_string())
    }
}
