//! Property-based tests for cash counting.
//!
//! - Total equals the weighted sum of counts
//! - A count change of Δ moves the total by exactly Δ × face value
//! - Currency switches always reset the counts

use proptest::prelude::*;
use rust_decimal::Decimal;
use tallykit_shared::CurrencyCode;

use super::catalog::{DenominationCatalog, DenominationKind};
use super::counter::{CashCounter, compute_total};

/// Strategy to pick one of the catalog currencies.
fn catalog_currency() -> impl Strategy<Value = CurrencyCode> {
    let codes: Vec<CurrencyCode> = DenominationCatalog::standard()
        .currencies()
        .map(|c| c.code.clone())
        .collect();
    prop::sample::select(codes)
}

/// Strategy to generate realistic counts (0 to 10,000 pieces).
fn piece_counts() -> impl Strategy<Value = Vec<u64>> {
    prop::collection::vec(0u64..10_000, 16)
}

/// Fills a counter with `counts`, cycling through its denominations.
fn filled_counter(code: &CurrencyCode, counts: &[u64]) -> CashCounter {
    let mut counter = CashCounter::new(code).unwrap();
    let denominations: Vec<_> = counter.currency().iter().cloned().collect();
    for (denomination, count) in denominations.iter().zip(counts) {
        counter
            .set_count(denomination.kind, denomination.face_value, &count.to_string())
            .unwrap();
    }
    counter
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Total equals Σ count × face value.
    #[test]
    fn prop_total_is_weighted_sum(
        code in catalog_currency(),
        counts in piece_counts(),
    ) {
        let counter = filled_counter(&code, &counts);
        let expected: Decimal = counter
            .currency()
            .iter()
            .zip(&counts)
            .map(|(d, c)| Decimal::from(*c) * d.face_value)
            .sum();
        prop_assert_eq!(counter.total().amount, expected);
        prop_assert_eq!(
            compute_total(counter.currency(), counter.counts()),
            expected
        );
    }

    /// Changing one count by Δ changes the total by Δ × face value.
    #[test]
    fn prop_count_delta_moves_total_by_face_value(
        code in catalog_currency(),
        counts in piece_counts(),
        index in 0usize..16,
        delta in 1u64..500,
    ) {
        let mut counter = filled_counter(&code, &counts);
        let denominations: Vec<_> = counter.currency().iter().cloned().collect();
        let target = &denominations[index % denominations.len()];

        let before_total = counter.total().amount;
        let before_count = counter.count(target.kind, target.face_value);
        counter
            .set_count(
                target.kind,
                target.face_value,
                &(before_count + delta).to_string(),
            )
            .unwrap();

        let change = counter.total().amount - before_total;
        prop_assert_eq!(change, Decimal::from(delta) * target.face_value);
    }

    /// Switching to a different currency always clears the counts.
    #[test]
    fn prop_currency_switch_resets(
        from in catalog_currency(),
        to in catalog_currency(),
        counts in piece_counts(),
    ) {
        prop_assume!(from != to);
        let mut counter = filled_counter(&from, &counts);
        prop_assert!(counter.select_currency(&to).unwrap());
        prop_assert!(counter.counts().is_empty());
        prop_assert!(counter.total().is_zero());
        for denomination in counter.currency().iter() {
            prop_assert_eq!(counter.count(denomination.kind, denomination.face_value), 0);
        }
    }

    /// Negative entries never make the total negative.
    #[test]
    fn prop_negative_entries_clamped(
        value in i64::MIN..0,
    ) {
        let code = CurrencyCode::parse("USD").unwrap();
        let mut counter = CashCounter::new(&code).unwrap();
        let stored = counter
            .set_count_value(DenominationKind::Bill, Decimal::ONE_HUNDRED, value)
            .unwrap();
        prop_assert_eq!(stored, 0);
        prop_assert!(counter.total().is_zero());
    }
}
