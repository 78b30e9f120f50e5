//! Property-based tests for tax computation.
//!
//! - `pre_tax + tax == post_tax` in both modes
//! - Exclusive then inclusive recovers the original price
//! - Computation is deterministic

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::service::compute_tax;
use super::types::TaxMode;

/// Strategy to generate prices (0.00 to 1,000,000.00).
fn price() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate rates (0.000 to 250.000 percent).
fn rate() -> impl Strategy<Value = Decimal> {
    (0i64..250_000i64).prop_map(|v| Decimal::new(v, 3))
}

fn mode() -> impl Strategy<Value = TaxMode> {
    prop_oneof![Just(TaxMode::Exclusive), Just(TaxMode::Inclusive)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// The parts always add up to the whole.
    #[test]
    fn prop_parts_sum_to_total(
        price in price(),
        rate in rate(),
        mode in mode(),
    ) {
        let result = compute_tax(price, rate, mode).unwrap();
        prop_assert_eq!(result.pre_tax + result.tax, result.post_tax);
        prop_assert!(result.pre_tax >= Decimal::ZERO);
        prop_assert!(result.tax >= Decimal::ZERO);
    }

    /// Exclusive then inclusive recovers the pre-tax price within 1e-9.
    #[test]
    fn prop_exclusive_inclusive_round_trip(
        price in price(),
        rate in rate(),
    ) {
        let forward = compute_tax(price, rate, TaxMode::Exclusive).unwrap();
        let expected_post = price * (Decimal::ONE + rate / Decimal::ONE_HUNDRED);
        prop_assert_eq!(forward.post_tax, expected_post);

        let reverse = compute_tax(forward.post_tax, rate, TaxMode::Inclusive).unwrap();
        let drift = (reverse.pre_tax - price).abs();
        prop_assert!(
            drift <= dec!(0.000000001),
            "round trip drifted by {} for price {} rate {}",
            drift, price, rate
        );
        prop_assert!((reverse.tax - forward.tax).abs() <= dec!(0.000000001));
    }

    /// Same inputs always give the same output.
    #[test]
    fn prop_compute_is_deterministic(
        price in price(),
        rate in rate(),
        mode in mode(),
    ) {
        let first = compute_tax(price, rate, mode).unwrap();
        let second = compute_tax(price, rate, mode).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Negative prices are always rejected.
    #[test]
    fn prop_negative_price_rejected(
        cents in 1i64..100_000_000i64,
        rate in rate(),
        mode in mode(),
    ) {
        prop_assert!(compute_tax(Decimal::new(-cents, 2), rate, mode).is_err());
    }
}
