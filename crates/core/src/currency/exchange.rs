//! Exchange rate types and logic.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use tallykit_shared::CurrencyCode;

/// Number of decimal places rates are shown with.
pub const RATE_DISPLAY_DECIMAL_PLACES: u32 = 4;

/// Which step of the conversion produced a rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateOrigin {
    /// Source and target are the same currency; no lookup made.
    Identity,
    /// Taken from the live rate source.
    Live,
    /// Taken from the static fallback table.
    Fallback,
    /// Neither source knew the pair; rate 1 was assumed.
    Default,
}

impl RateOrigin {
    /// Returns true when the rate is illustrative rather than real.
    #[must_use]
    pub const fn is_demo(self) -> bool {
        matches!(self, Self::Fallback | Self::Default)
    }
}

/// Exchange rate between two currencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeRate {
    /// Source currency code.
    pub from_currency: CurrencyCode,
    /// Target currency code.
    pub to_currency: CurrencyCode,
    /// Exchange rate (1 from_currency = rate to_currency).
    pub rate: Decimal,
    /// Where the rate came from.
    pub origin: RateOrigin,
    /// Date the rate is published for, when the source reports one.
    pub effective_date: Option<NaiveDate>,
}

impl ExchangeRate {
    /// Creates a new exchange rate.
    #[must_use]
    pub const fn new(
        from_currency: CurrencyCode,
        to_currency: CurrencyCode,
        rate: Decimal,
        origin: RateOrigin,
    ) -> Self {
        Self {
            from_currency,
            to_currency,
            rate,
            origin,
            effective_date: None,
        }
    }

    /// Sets the effective date.
    #[must_use]
    pub fn with_effective_date(mut self, date: Option<NaiveDate>) -> Self {
        self.effective_date = date;
        self
    }

    /// Returns the inverse rate, or `None` when the rate is zero.
    #[must_use]
    pub fn inverse(&self) -> Option<Self> {
        let rate = Decimal::ONE.checked_div(self.rate)?;
        Some(Self {
            from_currency: self.to_currency.clone(),
            to_currency: self.from_currency.clone(),
            rate,
            origin: self.origin,
            effective_date: self.effective_date,
        })
    }

    /// Rate rounded to 4 places for display.
    #[must_use]
    pub fn display_rate(&self) -> Decimal {
        round_rate(self.rate)
    }
}

/// Rounds a rate to [`RATE_DISPLAY_DECIMAL_PLACES`] using Banker's Rounding.
#[must_use]
pub fn round_rate(rate: Decimal) -> Decimal {
    rate.round_dp_with_strategy(RATE_DISPLAY_DECIMAL_PLACES, RoundingStrategy::MidpointNearestEven)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn rate(value: Decimal) -> ExchangeRate {
        ExchangeRate::new(
            CurrencyCode::parse("USD").unwrap(),
            CurrencyCode::parse("EUR").unwrap(),
            value,
            RateOrigin::Live,
        )
    }

    #[test]
    fn test_inverse() {
        let inverse = rate(dec!(0.8)).inverse().unwrap();
        assert_eq!(inverse.rate, dec!(1.25));
        assert_eq!(inverse.from_currency.as_str(), "EUR");
        assert_eq!(inverse.to_currency.as_str(), "USD");
        assert_eq!(inverse.origin, RateOrigin::Live);
    }

    #[test]
    fn test_inverse_of_zero_is_none() {
        assert!(rate(Decimal::ZERO).inverse().is_none());
    }

    #[test]
    fn test_display_rate() {
        assert_eq!(rate(dec!(0.853471)).display_rate(), dec!(0.8535));
        assert_eq!(rate(dec!(110)).display_rate(), dec!(110));
    }

    #[test]
    fn test_demo_origins() {
        assert!(!RateOrigin::Identity.is_demo());
        assert!(!RateOrigin::Live.is_demo());
        assert!(RateOrigin::Fallback.is_demo());
        assert!(RateOrigin::Default.is_demo());
    }
}
