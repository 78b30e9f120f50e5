//! Forward (tax-exclusive) and reverse (tax-inclusive) tax computation.

use rust_decimal::Decimal;
use tallykit_shared::types::{DecimalInputError, parse_decimal};

use super::error::TaxError;
use super::types::{TaxInput, TaxMode, TaxResult};

/// Computes `(pre_tax, tax, post_tax)` for a price and a percentage rate.
///
/// - `Exclusive`: `pre_tax = price`, `tax = price * rate / 100`,
///   `post_tax = pre_tax + tax`.
/// - `Inclusive`: `post_tax = price`, `pre_tax = price / (1 + rate / 100)`,
///   `tax = post_tax - pre_tax`.
///
/// The rate has no upper bound. Pure and deterministic.
///
/// # Errors
///
/// Returns `TaxError::InvalidInput` if either value is negative or the
/// arithmetic would overflow.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use tallykit_core::tax::{TaxMode, compute_tax};
///
/// let result = compute_tax(dec!(100), dec!(8.25), TaxMode::Exclusive).unwrap();
/// assert_eq!(result.tax, dec!(8.25));
/// assert_eq!(result.post_tax, dec!(108.25));
/// ```
pub fn compute_tax(price: Decimal, rate: Decimal, mode: TaxMode) -> Result<TaxResult, TaxError> {
    if price < Decimal::ZERO {
        return Err(TaxError::InvalidInput("price cannot be negative".to_string()));
    }
    if rate < Decimal::ZERO {
        return Err(TaxError::InvalidInput("rate cannot be negative".to_string()));
    }

    match mode {
        TaxMode::Exclusive => {
            let tax = price
                .checked_mul(rate)
                .and_then(|v| v.checked_div(Decimal::ONE_HUNDRED))
                .ok_or_else(out_of_range)?;
            let post_tax = price.checked_add(tax).ok_or_else(out_of_range)?;
            Ok(TaxResult {
                pre_tax: price,
                tax,
                post_tax,
            })
        }
        TaxMode::Inclusive => {
            let divisor = rate
                .checked_div(Decimal::ONE_HUNDRED)
                .and_then(|fraction| fraction.checked_add(Decimal::ONE))
                .ok_or_else(out_of_range)?;
            let pre_tax = price.checked_div(divisor).ok_or_else(out_of_range)?;
            let tax = price.checked_sub(pre_tax).ok_or_else(out_of_range)?;
            Ok(TaxResult {
                pre_tax,
                tax,
                post_tax: price,
            })
        }
    }
}

/// Computes tax from raw field text.
///
/// Both fields must be present and numeric (plain or scientific notation).
///
/// # Errors
///
/// Returns `TaxError::InvalidInput` for blank, non-numeric, or negative
/// input, or when the arithmetic would overflow.
pub fn compute_tax_from_input(
    price: &str,
    rate: &str,
    mode: TaxMode,
) -> Result<TaxResult, TaxError> {
    let input = parse_input(price, rate, mode)?;
    compute_tax(input.price, input.rate, input.mode)
}

/// Parses raw price and rate text into a validated [`TaxInput`].
///
/// # Errors
///
/// Returns `TaxError::InvalidInput` if either field is blank, non-numeric,
/// or negative.
pub fn parse_input(price: &str, rate: &str, mode: TaxMode) -> Result<TaxInput, TaxError> {
    Ok(TaxInput {
        price: parse_non_negative("price", price)?,
        rate: parse_non_negative("rate", rate)?,
        mode,
    })
}

fn parse_non_negative(field: &str, raw: &str) -> Result<Decimal, TaxError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TaxError::InvalidInput(format!("{field} is required")));
    }
    let value = parse_decimal(trimmed).map_err(|e| match e {
        DecimalInputError::NotANumber => {
            TaxError::InvalidInput(format!("{field} is not a number: {trimmed:?}"))
        }
        DecimalInputError::OutOfRange => {
            TaxError::InvalidInput(format!("{field} is out of range: {trimmed:?}"))
        }
    })?;
    if value < Decimal::ZERO {
        return Err(TaxError::InvalidInput(format!("{field} cannot be negative")));
    }
    Ok(value)
}

fn out_of_range() -> TaxError {
    TaxError::InvalidInput("value out of range".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use rstest::rstest;

    #[test]
    fn test_exclusive_example() {
        let result = compute_tax(dec!(100), dec!(8.25), TaxMode::Exclusive).unwrap();
        assert_eq!(result.pre_tax, dec!(100));
        assert_eq!(result.tax, dec!(8.25));
        assert_eq!(result.post_tax, dec!(108.25));
    }

    #[test]
    fn test_inclusive_example() {
        let result = compute_tax(dec!(108.25), dec!(8.25), TaxMode::Inclusive).unwrap();
        assert_eq!(result.pre_tax.round_dp(2), dec!(100.00));
        assert_eq!(result.tax.round_dp(2), dec!(8.25));
        assert_eq!(result.post_tax, dec!(108.25));
    }

    #[test]
    fn test_zero_rate() {
        let result = compute_tax(dec!(42.10), Decimal::ZERO, TaxMode::Exclusive).unwrap();
        assert_eq!(result.tax, Decimal::ZERO);
        assert_eq!(result.post_tax, dec!(42.10));

        let result = compute_tax(dec!(42.10), Decimal::ZERO, TaxMode::Inclusive).unwrap();
        assert_eq!(result.pre_tax, dec!(42.10));
        assert_eq!(result.tax, Decimal::ZERO);
    }

    #[test]
    fn test_rate_above_hundred_is_accepted() {
        let result = compute_tax(dec!(50), dec!(150), TaxMode::Exclusive).unwrap();
        assert_eq!(result.tax, dec!(75));
        assert_eq!(result.post_tax, dec!(125));

        let result = compute_tax(dec!(125), dec!(150), TaxMode::Inclusive).unwrap();
        assert_eq!(result.pre_tax, dec!(50));
        assert_eq!(result.tax, dec!(75));
    }

    #[test]
    fn test_zero_price() {
        let result = compute_tax(Decimal::ZERO, dec!(20), TaxMode::Inclusive).unwrap();
        assert!(result.pre_tax.is_zero());
        assert!(result.tax.is_zero());
    }

    #[test]
    fn test_negative_values_rejected() {
        assert!(compute_tax(dec!(-5), dec!(10), TaxMode::Exclusive).is_err());
        assert!(compute_tax(dec!(5), dec!(-10), TaxMode::Inclusive).is_err());
    }

    #[rstest]
    #[case("-5", "10")]
    #[case("10", "abc")]
    #[case("", "10")]
    #[case("10", "   ")]
    #[case("ten", "5")]
    #[case("10", "-0.5")]
    fn test_invalid_text_input(#[case] price: &str, #[case] rate: &str) {
        for mode in [TaxMode::Exclusive, TaxMode::Inclusive] {
            let err = compute_tax_from_input(price, rate, mode).unwrap_err();
            assert!(matches!(err, TaxError::InvalidInput(_)));
        }
    }

    #[rstest]
    #[case(" 100 ", "8.25", dec!(108.25))]
    #[case("1e2", "10", dec!(110))]
    #[case("19.99", "0", dec!(19.99))]
    fn test_text_input_parses(#[case] price: &str, #[case] rate: &str, #[case] expected: Decimal) {
        let result = compute_tax_from_input(price, rate, TaxMode::Exclusive).unwrap();
        assert_eq!(result.post_tax, expected);
    }

    #[test]
    fn test_tiny_price_rounds_to_zero() {
        let input = parse_input("1e-29", "10", TaxMode::Exclusive).unwrap();
        assert!(input.price.is_zero());
    }

    #[test]
    fn test_huge_price_is_out_of_range() {
        let err = parse_input("1e40", "10", TaxMode::Exclusive).unwrap_err();
        assert_eq!(
            err,
            TaxError::InvalidInput("price is out of range: \"1e40\"".to_string())
        );
    }

    #[test]
    fn test_overflow_is_invalid_input_not_panic() {
        let err = compute_tax(Decimal::MAX, dec!(50), TaxMode::Exclusive).unwrap_err();
        assert!(matches!(err, TaxError::InvalidInput(_)));
    }

    #[test]
    fn test_recompute_is_identical() {
        let first = compute_tax(dec!(73.19), dec!(13), TaxMode::Inclusive).unwrap();
        let second = compute_tax(dec!(73.19), dec!(13), TaxMode::Inclusive).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.pre_tax.serialize(), second.pre_tax.serialize());
    }
}
