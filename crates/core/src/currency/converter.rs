//! Rate resolution: live source first, then the fallback table, then 1.

use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use tallykit_shared::CurrencyCode;

use super::conversion::{ConversionError, ConversionRequest, ConversionResult};
use super::exchange::{ExchangeRate, RateOrigin};
use super::fallback::FallbackRates;
use super::source::{RateError, RateSource};

/// Default bound on a single live lookup.
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

/// Converts amounts using a live source with a static fallback.
///
/// The converter never fails because rates are unavailable. Only invalid
/// input or arithmetic overflow is reported as an error.
#[derive(Clone)]
pub struct CurrencyConverter {
    source: Arc<dyn RateSource>,
    fallback: FallbackRates,
    timeout: Duration,
}

impl std::fmt::Debug for CurrencyConverter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CurrencyConverter")
            .field("fallback_pairs", &self.fallback.len())
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl CurrencyConverter {
    /// Creates a converter with the default fallback table and timeout.
    #[must_use]
    pub fn new(source: Arc<dyn RateSource>) -> Self {
        Self {
            source,
            fallback: FallbackRates::default(),
            timeout: DEFAULT_LOOKUP_TIMEOUT,
        }
    }

    /// Replaces the fallback table.
    #[must_use]
    pub fn with_fallback(mut self, fallback: FallbackRates) -> Self {
        self.fallback = fallback;
        self
    }

    /// Sets the bound on each live lookup.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The live lookup bound.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Finds the rate for `from -> to`.
    ///
    /// Identical codes short-circuit to rate 1 without touching the source.
    pub async fn resolve_rate(&self, from: &CurrencyCode, to: &CurrencyCode) -> ExchangeRate {
        if from == to {
            return ExchangeRate::new(from.clone(), to.clone(), Decimal::ONE, RateOrigin::Identity);
        }

        match self.live_rate(from, to).await {
            Ok(rate) => {
                tracing::debug!(from = %from, to = %to, rate = %rate.rate, "Using live rate");
                return rate;
            }
            Err(err) => {
                tracing::warn!(
                    from = %from,
                    to = %to,
                    error = %err,
                    "Live rate unavailable, using fallback"
                );
            }
        }

        if let Some(rate) = self.fallback.lookup(from, to) {
            return ExchangeRate::new(from.clone(), to.clone(), rate, RateOrigin::Fallback);
        }

        tracing::warn!(from = %from, to = %to, "No fallback rate for pair, assuming 1");
        ExchangeRate::new(from.clone(), to.clone(), Decimal::ONE, RateOrigin::Default)
    }

    /// Converts `request.amount` from `request.from` into `request.to`.
    pub async fn convert(
        &self,
        request: &ConversionRequest,
    ) -> Result<ConversionResult, ConversionError> {
        let rate = self.resolve_rate(&request.from, &request.to).await;
        ConversionResult::from_rate(request.amount, rate)
    }

    async fn live_rate(
        &self,
        from: &CurrencyCode,
        to: &CurrencyCode,
    ) -> Result<ExchangeRate, RateError> {
        let latest = tokio::time::timeout(self.timeout, self.source.latest_rates(from))
            .await
            .map_err(|_| RateError::Timeout)??;
        let rate = latest.rate_for(to)?;
        Ok(ExchangeRate::new(from.clone(), to.clone(), rate, RateOrigin::Live)
            .with_effective_date(latest.date))
    }
}
