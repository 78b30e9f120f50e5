//! Property-based tests for currency conversion.

use std::sync::Arc;

use proptest::prelude::*;
use rust_decimal::Decimal;
use tallykit_shared::CurrencyCode;

use super::conversion::{ConversionRequest, ConversionResult};
use super::converter::CurrencyConverter;
use super::converter::test_support::FailingSource;
use super::exchange::{ExchangeRate, RateOrigin};
use super::fallback::FallbackRates;
use super::registry::supported_currencies;
use super::source::RateError;

/// Amounts from 0.00 to 1,000,000.00.
fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Rates from 0.0001 to 10000.0000.
fn positive_rate() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|v| Decimal::new(v, 4))
}

fn supported_code() -> impl Strategy<Value = CurrencyCode> {
    let codes: Vec<CurrencyCode> = supported_currencies()
        .iter()
        .map(|info| info.code.clone())
        .collect();
    prop::sample::select(codes)
}

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .unwrap()
        .block_on(future)
}

fn offline_converter() -> CurrencyConverter {
    CurrencyConverter::new(Arc::new(FailingSource(RateError::Network(
        "offline".to_string(),
    ))))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // =========================================================================
    // Conversion arithmetic
    // =========================================================================

    /// The converted amount is exactly `amount * rate`, with no rounding.
    #[test]
    fn prop_converted_is_exact_product(amount in amount(), rate in positive_rate()) {
        let pair =
            ExchangeRate::new(CurrencyCode::usd(), CurrencyCode::eur(), rate, RateOrigin::Live);
        let result = ConversionResult::from_rate(amount, pair).unwrap();
        prop_assert_eq!(result.converted_amount, amount * rate);
    }

    /// Converting into the same currency returns the amount at rate 1.
    #[test]
    fn prop_same_currency_is_identity(amount in amount(), code in supported_code()) {
        let converter = offline_converter();
        let request = ConversionRequest::new(amount, code.clone(), code);
        let result = block_on(converter.convert(&request)).unwrap();

        prop_assert_eq!(result.converted_amount, amount);
        prop_assert_eq!(result.rate.rate, Decimal::ONE);
        prop_assert_eq!(result.origin(), RateOrigin::Identity);
    }

    /// With the live source down, every listed pair uses its table rate and
    /// every other pair falls through to rate 1.
    #[test]
    fn prop_offline_uses_table_or_one(
        amount in amount(),
        from in supported_code(),
        to in supported_code(),
    ) {
        prop_assume!(from != to);
        let table = FallbackRates::default();
        let converter = offline_converter();
        let request = ConversionRequest::new(amount, from.clone(), to.clone());
        let result = block_on(converter.convert(&request)).unwrap();

        match table.lookup(&from, &to) {
            Some(rate) => {
                prop_assert_eq!(result.origin(), RateOrigin::Fallback);
                prop_assert_eq!(result.rate.rate, rate);
            }
            None => {
                prop_assert_eq!(result.origin(), RateOrigin::Default);
                prop_assert_eq!(result.rate.rate, Decimal::ONE);
            }
        }
        prop_assert!(result.notice().is_some());
    }

    /// Rate times its inverse is 1 to within decimal precision.
    #[test]
    fn prop_inverse_rate_round_trips(rate in positive_rate()) {
        let pair =
            ExchangeRate::new(CurrencyCode::usd(), CurrencyCode::eur(), rate, RateOrigin::Live);
        let inverse = pair.inverse().unwrap();
        let product = rate * inverse.rate;
        let tolerance = Decimal::new(1, 20);
        prop_assert!(
            (product - Decimal::ONE).abs() < tolerance,
            "{} * {} = {}",
            rate,
            inverse.rate,
            product
        );
    }
}
