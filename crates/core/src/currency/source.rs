//! Live exchange-rate source abstraction.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use tallykit_shared::{AppError, CurrencyCode};
use thiserror::Error;

/// Reasons the live rate could not be used.
///
/// Every variant means "rate unavailable"; the converter falls back to the
/// static table on any of them.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RateError {
    /// The source could not be reached.
    #[error("Rate source unreachable: {0}")]
    Network(String),

    /// The source answered with a non-success status.
    #[error("Rate source returned HTTP {0}")]
    Status(u16),

    /// The response body could not be decoded.
    #[error("Malformed rate response: {0}")]
    Malformed(String),

    /// The lookup did not finish in time.
    #[error("Rate lookup timed out")]
    Timeout,

    /// The response had no usable rate for the target.
    #[error("No rate from {base} to {target}")]
    MissingRate {
        /// Base currency of the response.
        base: CurrencyCode,
        /// Requested target currency.
        target: CurrencyCode,
    },
}

impl From<RateError> for AppError {
    fn from(err: RateError) -> Self {
        Self::ExternalService(err.to_string())
    }
}

/// Rates from one base currency to many targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatestRates {
    /// Currency the rates are quoted against.
    pub base: CurrencyCode,
    /// Publication date reported by the source, if any.
    pub date: Option<NaiveDate>,
    /// When the table was fetched.
    pub fetched_at: DateTime<Utc>,
    /// 1 base = rate target.
    pub rates: HashMap<CurrencyCode, Decimal>,
}

impl LatestRates {
    /// Creates a table stamped with the current time.
    #[must_use]
    pub fn new(base: CurrencyCode, rates: HashMap<CurrencyCode, Decimal>) -> Self {
        Self {
            base,
            date: None,
            fetched_at: Utc::now(),
            rates,
        }
    }

    /// Builds a table from raw `(code, number)` pairs as decoded from JSON.
    ///
    /// Entries with malformed codes or unusable rates are dropped.
    #[must_use]
    pub fn from_raw(
        base: CurrencyCode,
        date: Option<NaiveDate>,
        raw: impl IntoIterator<Item = (String, f64)>,
    ) -> Self {
        let rates = raw
            .into_iter()
            .filter_map(|(code, value)| {
                let code = CurrencyCode::parse(&code).ok()?;
                Some((code, normalize_rate(value)?))
            })
            .collect();
        Self {
            base,
            date,
            fetched_at: Utc::now(),
            rates,
        }
    }

    /// Returns the rate to `target`.
    pub fn rate_for(&self, target: &CurrencyCode) -> Result<Decimal, RateError> {
        self.rates
            .get(target)
            .copied()
            .ok_or_else(|| RateError::MissingRate {
                base: self.base.clone(),
                target: target.clone(),
            })
    }
}

/// Converts a JSON number into a usable rate.
///
/// Returns `None` for NaN, infinities, zero, negative values, and values
/// outside the decimal range.
#[must_use]
pub fn normalize_rate(value: f64) -> Option<Decimal> {
    Decimal::try_from(value)
        .ok()
        .filter(|rate| *rate > Decimal::ZERO)
        .map(|rate| rate.normalize())
}

/// A provider of live exchange rates.
///
/// One call fetches every rate quoted against `base`; the caller picks the
/// target it needs.
#[async_trait]
pub trait RateSource: Send + Sync {
    /// Fetches the latest rates quoted against `base`.
    async fn latest_rates(&self, base: &CurrencyCode) -> Result<LatestRates, RateError>;
}
