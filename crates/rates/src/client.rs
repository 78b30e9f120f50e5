//! HTTP client for the exchangerate-api `latest` endpoint.
//!
//! `GET {base_url}/{BASE}` answers with every rate quoted against `BASE`:
//!
//! ```json
//! { "base": "USD", "date": "2024-05-01", "rates": { "EUR": 0.93, "GBP": 0.8 } }
//! ```

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use tallykit_core::currency::{LatestRates, RateError, RateSource};
use tallykit_shared::{CurrencyCode, RatesConfig};

/// Response body of the `latest` endpoint. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
struct LatestResponse {
    #[serde(default)]
    date: Option<NaiveDate>,
    rates: HashMap<String, f64>,
}

/// Fetches live rates over HTTP.
#[derive(Debug, Clone)]
pub struct ExchangeRateApiClient {
    client: Client,
    base_url: String,
}

impl ExchangeRateApiClient {
    /// Creates a client from configuration.
    #[must_use]
    pub fn new(config: &RatesConfig) -> Self {
        Self::with_base_url(config.base_url.clone(), config.timeout())
    }

    /// Creates a client for an explicit endpoint.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// URL queried for `base`.
    #[must_use]
    pub fn endpoint(&self, base: &CurrencyCode) -> String {
        format!("{}/{}", self.base_url, base)
    }
}

#[async_trait]
impl RateSource for ExchangeRateApiClient {
    async fn latest_rates(&self, base: &CurrencyCode) -> Result<LatestRates, RateError> {
        let url = self.endpoint(base);
        tracing::debug!(%url, "Fetching live rates");

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                RateError::Timeout
            } else {
                RateError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RateError::Status(status.as_u16()));
        }

        let body: LatestResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                RateError::Timeout
            } else {
                RateError::Malformed(e.to_string())
            }
        })?;

        let rates = LatestRates::from_raw(base.clone(), body.date, body.rates);
        tracing::debug!(base = %base, count = rates.rates.len(), "Fetched live rates");
        Ok(rates)
    }
}
