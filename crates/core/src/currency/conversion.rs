//! Currency conversion logic.
//!
//! CRITICAL: `converted_amount == amount * rate` exactly. Rounding happens
//! only when values are displayed.

use rust_decimal::Decimal;
use serde::Serialize;
use tallykit_shared::types::{parse_decimal, round_for_display};
use tallykit_shared::{AppError, CurrencyCode};
use thiserror::Error;

use super::exchange::{ExchangeRate, RateOrigin, round_rate};

/// Notice attached to results computed from demo rates.
pub const DEMO_RATES_NOTICE: &str = "Live rates unavailable, showing demo conversion";

/// Conversion input errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConversionError {
    /// Amount is blank, not a number, or negative.
    #[error("Invalid amount: {0:?}")]
    InvalidAmount(String),

    /// Currency code is malformed.
    #[error("Invalid currency code: {0:?}")]
    InvalidCurrency(String),

    /// `amount * rate` does not fit in a decimal.
    #[error("Amount {0} is too large to convert")]
    AmountOutOfRange(Decimal),
}

impl From<ConversionError> for AppError {
    fn from(err: ConversionError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// A validated conversion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    /// Amount in the source currency.
    pub amount: Decimal,
    /// Source currency.
    pub from: CurrencyCode,
    /// Target currency.
    pub to: CurrencyCode,
}

impl ConversionRequest {
    /// Creates a request from already-validated parts.
    #[must_use]
    pub const fn new(amount: Decimal, from: CurrencyCode, to: CurrencyCode) -> Self {
        Self { amount, from, to }
    }

    /// Parses raw field text into a request.
    pub fn parse(amount: &str, from: &str, to: &str) -> Result<Self, ConversionError> {
        Ok(Self {
            amount: parse_amount(amount)?,
            from: CurrencyCode::parse(from)
                .map_err(|_| ConversionError::InvalidCurrency(from.to_string()))?,
            to: CurrencyCode::parse(to)
                .map_err(|_| ConversionError::InvalidCurrency(to.to_string()))?,
        })
    }

    /// Returns true when no lookup is needed.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.from == self.to
    }
}

/// Parses an amount field: non-blank, numeric, non-negative.
pub fn parse_amount(raw: &str) -> Result<Decimal, ConversionError> {
    let amount =
        parse_decimal(raw).map_err(|_| ConversionError::InvalidAmount(raw.to_string()))?;
    if amount < Decimal::ZERO {
        return Err(ConversionError::InvalidAmount(raw.to_string()));
    }
    Ok(amount)
}

/// Multiplies an amount by a rate, failing instead of overflowing.
pub fn convert_amount(amount: Decimal, rate: Decimal) -> Result<Decimal, ConversionError> {
    amount
        .checked_mul(rate)
        .ok_or(ConversionError::AmountOutOfRange(amount))
}

/// Outcome of a conversion.
///
/// Invariant: `converted_amount == amount * rate.rate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionResult {
    /// Amount in the source currency.
    pub amount: Decimal,
    /// Amount in the target currency, full precision.
    pub converted_amount: Decimal,
    /// The rate that was applied and where it came from.
    pub rate: ExchangeRate,
}

impl ConversionResult {
    /// Builds a result by applying `rate` to `amount`.
    pub fn from_rate(amount: Decimal, rate: ExchangeRate) -> Result<Self, ConversionError> {
        Ok(Self {
            amount,
            converted_amount: convert_amount(amount, rate.rate)?,
            rate,
        })
    }

    /// Where the applied rate came from.
    #[must_use]
    pub const fn origin(&self) -> RateOrigin {
        self.rate.origin
    }

    /// Returns true when the rate is illustrative demo data.
    #[must_use]
    pub const fn is_demo(&self) -> bool {
        self.rate.origin.is_demo()
    }

    /// The notice to show alongside demo results.
    #[must_use]
    pub const fn notice(&self) -> Option<&'static str> {
        if self.is_demo() {
            Some(DEMO_RATES_NOTICE)
        } else {
            None
        }
    }

    /// `1 / rate`, or `None` when the rate is zero.
    #[must_use]
    pub fn inverse_rate(&self) -> Option<Decimal> {
        self.rate.inverse().map(|inverse| inverse.rate)
    }

    /// Converted amount rounded to 2 places for display.
    #[must_use]
    pub fn display_converted(&self) -> Decimal {
        round_for_display(self.converted_amount)
    }

    /// Inverse rate rounded to 4 places for display.
    #[must_use]
    pub fn display_inverse_rate(&self) -> Option<Decimal> {
        self.inverse_rate().map(round_rate)
    }
}
