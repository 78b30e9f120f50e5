//! Denomination counter error types.

use rust_decimal::Decimal;
use tallykit_shared::{AppError, CurrencyCode};
use thiserror::Error;

use super::catalog::DenominationKind;

/// Errors raised by the cash counter.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DenominationError {
    /// The currency is not part of the denomination catalog.
    #[error("No denominations known for currency {0}")]
    UnknownCurrency(CurrencyCode),

    /// The face value does not exist for the active currency.
    #[error("{currency} has no {kind} with face value {face_value}")]
    UnknownDenomination {
        /// Active currency.
        currency: CurrencyCode,
        /// Bill or coin.
        kind: DenominationKind,
        /// Requested face value.
        face_value: Decimal,
    },
}

impl From<DenominationError> for AppError {
    fn from(err: DenominationError) -> Self {
        match err {
            DenominationError::UnknownCurrency(_) => Self::NotFound(err.to_string()),
            DenominationError::UnknownDenomination { .. } => Self::Validation(err.to_string()),
        }
    }
}
