//! Static fallback rates used when the live source is unavailable.
//!
//! These are illustrative demo values, not market rates. Only the listed
//! directions are known; no inverse or cross rate is derived.

use std::collections::HashMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tallykit_shared::CurrencyCode;

/// Fixed `(from, to) -> rate` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackRates {
    rates: HashMap<(CurrencyCode, CurrencyCode), Decimal>,
}

impl FallbackRates {
    /// Builds a table from explicit pairs. Malformed codes are skipped.
    #[must_use]
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str, Decimal)>) -> Self {
        let rates = pairs
            .into_iter()
            .filter_map(|(from, to, rate)| {
                let from = CurrencyCode::parse(from).ok()?;
                let to = CurrencyCode::parse(to).ok()?;
                Some(((from, to), rate))
            })
            .collect();
        Self { rates }
    }

    /// A table with no pairs; every lookup misses.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            rates: HashMap::new(),
        }
    }

    /// Looks up the rate for converting `from` into `to`.
    #[must_use]
    pub fn lookup(&self, from: &CurrencyCode, to: &CurrencyCode) -> Option<Decimal> {
        self.rates.get(&(from.clone(), to.clone())).copied()
    }

    /// Number of pairs in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Returns true if the table has no pairs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl Default for FallbackRates {
    fn default() -> Self {
        Self::from_pairs([
            ("USD", "EUR", dec!(0.85)),
            ("USD", "GBP", dec!(0.73)),
            ("USD", "JPY", dec!(110)),
            ("USD", "AUD", dec!(1.35)),
            ("USD", "CAD", dec!(1.25)),
            ("EUR", "USD", dec!(1.18)),
            ("EUR", "GBP", dec!(0.86)),
            ("EUR", "JPY", dec!(129)),
            ("EUR", "AUD", dec!(1.59)),
            ("EUR", "CAD", dec!(1.47)),
            ("GBP", "USD", dec!(1.37)),
            ("GBP", "EUR", dec!(1.16)),
            ("GBP", "JPY", dec!(150)),
            ("GBP", "AUD", dec!(1.85)),
            ("GBP", "CAD", dec!(1.71)),
        ])
    }
}
