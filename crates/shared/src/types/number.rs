//! Parsing of decimal text typed by a user.

use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

/// Why decimal text was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecimalInputError {
    /// Blank or not a number at all.
    #[error("not a number")]
    NotANumber,
    /// A number whose magnitude does not fit in a `Decimal`.
    #[error("out of range")]
    OutOfRange,
}

/// Parses plain (`"12.50"`) or scientific (`"1.5e3"`) decimal text.
///
/// Digits beyond the 28 decimal places a `Decimal` can hold are rounded
/// away, so `"1e-29"` reads as zero. Magnitudes above `Decimal::MAX` are
/// [`DecimalInputError::OutOfRange`].
pub fn parse_decimal(raw: &str) -> Result<Decimal, DecimalInputError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(DecimalInputError::NotANumber);
    }
    if let Ok(value) = Decimal::from_str(text) {
        return Ok(value);
    }
    if let Ok(value) = Decimal::from_scientific(text) {
        return Ok(value);
    }

    let (mantissa, exponent) = text
        .split_once(['e', 'E'])
        .ok_or(DecimalInputError::NotANumber)?;
    let mantissa = Decimal::from_str(mantissa).map_err(|_| DecimalInputError::NotANumber)?;
    let exponent = exponent
        .parse::<i64>()
        .map_err(|_| DecimalInputError::NotANumber)?;
    shift(mantissa, exponent)
}

/// Multiplies `value` by `10^exponent` one digit at a time.
///
/// Stops early once the value is zero, so huge negative exponents are cheap.
fn shift(mut value: Decimal, exponent: i64) -> Result<Decimal, DecimalInputError> {
    for _ in 0..exponent.unsigned_abs() {
        if value.is_zero() {
            break;
        }
        value = if exponent > 0 {
            value.checked_mul(Decimal::TEN)
        } else {
            value.checked_div(Decimal::TEN)
        }
        .ok_or(DecimalInputError::OutOfRange)?;
    }
    Ok(value)
}
