//! Cash counting: per-denomination counts and their monetary total.

use std::collections::HashMap;
use std::num::IntErrorKind;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use tallykit_shared::types::format_display;
use tallykit_shared::{CurrencyCode, Money};

use super::catalog::{CurrencyDenominations, Denomination, DenominationCatalog, DenominationKind};
use super::error::DenominationError;

/// Identifies one denomination of one currency.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DenominationKey {
    /// Currency the denomination belongs to.
    pub currency: CurrencyCode,
    /// Bill or coin.
    pub kind: DenominationKind,
    /// Face value in major units.
    pub face_value: Decimal,
}

impl DenominationKey {
    /// Creates a new key.
    #[must_use]
    pub fn new(currency: &CurrencyCode, kind: DenominationKind, face_value: Decimal) -> Self {
        Self {
            currency: currency.clone(),
            kind,
            face_value,
        }
    }
}

/// User-entered counts, keyed by denomination.
///
/// Absent entries count as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DenominationCounts {
    counts: HashMap<DenominationKey, u64>,
}

impl DenominationCounts {
    /// Creates an empty set of counts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the count for a denomination, zero when absent.
    #[must_use]
    pub fn get(&self, key: &DenominationKey) -> u64 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Sets the count for a denomination. A zero count removes the entry.
    pub fn set(&mut self, key: DenominationKey, count: u64) {
        if count == 0 {
            self.counts.remove(&key);
        } else {
            self.counts.insert(key, count);
        }
    }

    /// Removes every count.
    pub fn clear(&mut self) {
        self.counts.clear();
    }

    /// Returns true when no denomination has a non-zero count.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterates over the non-zero counts in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&DenominationKey, u64)> {
        self.counts.iter().map(|(k, v)| (k, *v))
    }
}

/// Parses a raw count field.
///
/// Reads the leading integer and ignores the rest, so `"2.5"` counts as 2
/// and `"12abc"` as 12. Text without leading digits counts as zero,
/// negative values are clamped to zero, and values beyond `u64::MAX`
/// saturate.
#[must_use]
pub fn parse_count(raw: &str) -> u64 {
    let text = raw.trim_start();
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if negative || digits == 0 {
        return 0;
    }
    match rest[..digits].parse::<u64>() {
        Ok(count) => count,
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => u64::MAX,
        Err(_) => 0,
    }
}

/// Clamps a signed count to the non-negative range.
#[must_use]
pub fn clamp_count(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(0)
}

/// Truncates a numeric count toward zero.
///
/// `2.9` counts as 2. Negative values clamp to zero and values beyond
/// `u64::MAX` saturate.
#[must_use]
pub fn truncate_count(value: Decimal) -> u64 {
    if value.is_sign_negative() {
        return 0;
    }
    value.trunc().to_u64().unwrap_or(u64::MAX)
}

/// Computes `Σ count × face_value` over one currency's denominations.
///
/// Counts for keys outside `currency` are ignored. The sum saturates
/// rather than overflowing, so this never fails.
#[must_use]
pub fn compute_total(currency: &CurrencyDenominations, counts: &DenominationCounts) -> Decimal {
    currency.iter().fold(Decimal::ZERO, |total, denomination| {
        let key = DenominationKey::new(&currency.code, denomination.kind, denomination.face_value);
        total.saturating_add(subtotal(denomination, counts.get(&key)))
    })
}

fn subtotal(denomination: &Denomination, count: u64) -> Decimal {
    Decimal::from(count).saturating_mul(denomination.face_value)
}

/// One row of the breakdown shown under the total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreakdownLine {
    /// The counted denomination.
    pub denomination: Denomination,
    /// How many were counted.
    pub count: u64,
    /// `count × face_value`.
    pub subtotal: Decimal,
}

/// Counter state for one cash-counting session.
///
/// Holds the selected currency and the counts entered for it. Changing the
/// currency discards all counts.
#[derive(Debug, Clone)]
pub struct CashCounter {
    currency: CurrencyDenominations,
    counts: DenominationCounts,
}

impl CashCounter {
    /// Starts an empty counter for `code`.
    pub fn new(code: &CurrencyCode) -> Result<Self, DenominationError> {
        Ok(Self {
            currency: lookup(code)?.clone(),
            counts: DenominationCounts::new(),
        })
    }

    /// The active currency's denominations.
    #[must_use]
    pub const fn currency(&self) -> &CurrencyDenominations {
        &self.currency
    }

    /// The counts entered so far.
    #[must_use]
    pub const fn counts(&self) -> &DenominationCounts {
        &self.counts
    }

    /// Switches currency. Returns `true` when the counts were reset.
    ///
    /// Re-selecting the active currency keeps the counts.
    pub fn select_currency(&mut self, code: &CurrencyCode) -> Result<bool, DenominationError> {
        if *code == self.currency.code {
            return Ok(false);
        }
        self.currency = lookup(code)?.clone();
        self.counts.clear();
        Ok(true)
    }

    /// Sets a count from raw field text (see [`parse_count`]).
    pub fn set_count(
        &mut self,
        kind: DenominationKind,
        face_value: Decimal,
        raw: &str,
    ) -> Result<u64, DenominationError> {
        self.store(kind, face_value, parse_count(raw))
    }

    /// Sets a count from a signed value, clamping negatives to zero.
    pub fn set_count_value(
        &mut self,
        kind: DenominationKind,
        face_value: Decimal,
        value: i64,
    ) -> Result<u64, DenominationError> {
        self.store(kind, face_value, clamp_count(value))
    }

    /// Sets a count from a possibly fractional number (see [`truncate_count`]).
    pub fn set_count_decimal(
        &mut self,
        kind: DenominationKind,
        face_value: Decimal,
        value: Decimal,
    ) -> Result<u64, DenominationError> {
        self.store(kind, face_value, truncate_count(value))
    }

    /// Returns the count for a denomination of the active currency.
    #[must_use]
    pub fn count(&self, kind: DenominationKind, face_value: Decimal) -> u64 {
        self.counts
            .get(&DenominationKey::new(&self.currency.code, kind, face_value))
    }

    /// Resets every count to zero, keeping the currency.
    pub fn clear_all(&mut self) {
        self.counts.clear();
    }

    /// Total value at full precision.
    #[must_use]
    pub fn total(&self) -> Money {
        Money::new(
            compute_total(&self.currency, &self.counts),
            self.currency.code.clone(),
        )
    }

    /// Total formatted for display, e.g. `"$123.45"`.
    #[must_use]
    pub fn formatted_total(&self) -> String {
        format!("{}{}", self.currency.symbol, format_display(self.total().amount))
    }

    /// Non-zero counts with their subtotals, bills first, in catalog order.
    #[must_use]
    pub fn breakdown(&self) -> Vec<BreakdownLine> {
        self.currency
            .iter()
            .filter_map(|denomination| {
                let count = self.count(denomination.kind, denomination.face_value);
                (count > 0).then(|| BreakdownLine {
                    denomination: denomination.clone(),
                    count,
                    subtotal: subtotal(denomination, count),
                })
            })
            .collect()
    }

    fn store(
        &mut self,
        kind: DenominationKind,
        face_value: Decimal,
        count: u64,
    ) -> Result<u64, DenominationError> {
        let denomination = self.currency.find(kind, face_value).ok_or_else(|| {
            DenominationError::UnknownDenomination {
                currency: self.currency.code.clone(),
                kind,
                face_value,
            }
        })?;
        let key = DenominationKey::new(&self.currency.code, kind, denomination.face_value);
        self.counts.set(key, count);
        Ok(count)
    }
}

fn lookup(code: &CurrencyCode) -> Result<&'static CurrencyDenominations, DenominationError> {
    DenominationCatalog::standard()
        .get(code)
        .ok_or_else(|| DenominationError::UnknownCurrency(code.clone()))
}
