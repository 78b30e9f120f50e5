//! Live exchange-rate source for Tallykit.
//!
//! [`ExchangeRateApiClient`] talks to the public `latest` endpoint and
//! [`CachedRateSource`] keeps each base currency's table for a while so
//! repeated conversions do not refetch it.

pub mod cache;
pub mod client;

pub use cache::CachedRateSource;
pub use client::ExchangeRateApiClient;

use tallykit_shared::RatesConfig;

/// Live source type used by the server.
pub type LiveRateSource = CachedRateSource<ExchangeRateApiClient>;

/// Builds the cached HTTP rate source described by `config`.
#[must_use]
pub fn live_source(config: &RatesConfig) -> LiveRateSource {
    CachedRateSource::from_config(ExchangeRateApiClient::new(config), config)
}
