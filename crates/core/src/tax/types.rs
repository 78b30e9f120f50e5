//! Tax calculation domain types.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::error::TaxError;

/// How the entered price relates to the tax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxMode {
    /// The price is pre-tax; tax is added on top.
    #[default]
    #[serde(alias = "add")]
    Exclusive,
    /// The price already contains tax; the pre-tax amount is derived.
    #[serde(alias = "included")]
    Inclusive,
}

impl std::fmt::Display for TaxMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exclusive => write!(f, "exclusive"),
            Self::Inclusive => write!(f, "inclusive"),
        }
    }
}

impl std::str::FromStr for TaxMode {
    type Err = TaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "exclusive" | "add" => Ok(Self::Exclusive),
            "inclusive" | "included" => Ok(Self::Inclusive),
            _ => Err(TaxError::InvalidInput(format!("unknown tax mode {s:?}"))),
        }
    }
}

/// Validated input for one tax calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxInput {
    /// Entered price (pre-tax when exclusive, post-tax when inclusive).
    pub price: Decimal,
    /// Tax rate in percent. Values above 100 are allowed.
    pub rate: Decimal,
    /// Calculation mode.
    pub mode: TaxMode,
}

/// Result of a tax calculation.
///
/// Invariant: `pre_tax + tax == post_tax`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaxResult {
    /// Amount before tax.
    pub pre_tax: Decimal,
    /// Tax amount.
    pub tax: Decimal,
    /// Amount including tax.
    pub post_tax: Decimal,
}

/// Derived figures shown next to a tax result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaxBreakdown {
    /// Tax rate in percent.
    pub rate: Decimal,
    /// Rate as a fraction, rounded to 4 places (8.25% -> 0.0825).
    pub rate_fraction: Decimal,
    /// Tax charged on one unit of currency, rounded to 2 places.
    pub tax_per_unit: Decimal,
}

impl TaxBreakdown {
    /// Builds the breakdown for a rate in percent.
    #[must_use]
    pub fn for_rate(rate: Decimal) -> Self {
        let fraction = rate / Decimal::ONE_HUNDRED;
        Self {
            rate,
            rate_fraction: fraction
                .round_dp_with_strategy(4, RoundingStrategy::MidpointNearestEven),
            tax_per_unit: fraction
                .round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::str::FromStr;

    #[test]
    fn test_tax_mode_from_str() {
        assert_eq!(TaxMode::from_str("exclusive").unwrap(), TaxMode::Exclusive);
        assert_eq!(TaxMode::from_str("ADD").unwrap(), TaxMode::Exclusive);
        assert_eq!(TaxMode::from_str("inclusive").unwrap(), TaxMode::Inclusive);
        assert_eq!(TaxMode::from_str("included").unwrap(), TaxMode::Inclusive);
        assert!(TaxMode::from_str("sideways").is_err());
    }

    #[test]
    fn test_tax_mode_serde_aliases() {
        let mode: TaxMode = serde_json::from_str("\"included\"").unwrap();
        assert_eq!(mode, TaxMode::Inclusive);
        let mode: TaxMode = serde_json::from_str("\"add\"").unwrap();
        assert_eq!(mode, TaxMode::Exclusive);
        assert_eq!(serde_json::to_string(&TaxMode::Inclusive).unwrap(), "\"inclusive\"");
    }

    #[test]
    fn test_breakdown_for_rate() {
        let breakdown = TaxBreakdown::for_rate(dec!(8.25));
        assert_eq!(breakdown.rate_fraction, dec!(0.0825));
        assert_eq!(breakdown.tax_per_unit, dec!(0.08));

        let breakdown = TaxBreakdown::for_rate(dec!(20));
        assert_eq!(breakdown.rate_fraction, dec!(0.2));
        assert_eq!(breakdown.tax_per_unit, dec!(0.20));
    }
}
