//! Response caching for rate sources using Moka.
//!
//! Rate tables are cached per base currency. Concurrent misses for the same
//! base share one upstream request. Failures are never cached, so the next
//! call retries the source.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use tallykit_core::currency::{LatestRates, RateError, RateSource};
use tallykit_shared::{CurrencyCode, RatesConfig};

/// Default cache capacity (number of base currencies).
const DEFAULT_CACHE_CAPACITY: u64 = 64;

/// Default time-to-live for cached tables (5 minutes).
const DEFAULT_TTL_SECS: u64 = 300;

/// Wraps a [`RateSource`] with a per-base TTL cache.
#[derive(Clone)]
pub struct CachedRateSource<S> {
    inner: Arc<S>,
    cache: Cache<CurrencyCode, Arc<LatestRates>>,
}

impl<S: RateSource + 'static> CachedRateSource<S> {
    /// Creates a cache with default settings.
    ///
    /// Default: 64 entries max, 5 minute TTL.
    #[must_use]
    pub fn new(inner: S) -> Self {
        Self::with_config(inner, DEFAULT_CACHE_CAPACITY, Duration::from_secs(DEFAULT_TTL_SECS))
    }

    /// Creates a cache sized from configuration.
    #[must_use]
    pub fn from_config(inner: S, config: &RatesConfig) -> Self {
        Self::with_config(inner, config.cache_capacity, config.cache_ttl())
    }

    /// Creates a cache with custom settings.
    ///
    /// # Arguments
    ///
    /// * `max_capacity` - Maximum number of base currencies kept
    /// * `ttl` - How long a fetched table is reused
    #[must_use]
    pub fn with_config(inner: S, max_capacity: u64, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(ttl)
            .build();
        Self {
            inner: Arc::new(inner),
            cache,
        }
    }

    /// The wrapped source.
    #[must_use]
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Drops every cached table.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }
}

impl<S> std::fmt::Debug for CachedRateSource<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedRateSource")
            .field("entries", &self.cache.entry_count())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<S: RateSource + 'static> RateSource for CachedRateSource<S> {
    async fn latest_rates(&self, base: &CurrencyCode) -> Result<LatestRates, RateError> {
        if let Some(hit) = self.cache.get(base).await {
            tracing::debug!(base = %base, "Rate cache hit");
            return Ok((*hit).clone());
        }

        let inner = Arc::clone(&self.inner);
        let key = base.clone();
        let table = self
            .cache
            .try_get_with(base.clone(), async move {
                inner.latest_rates(&key).await.map(Arc::new)
            })
            .await
            .map_err(|err: Arc<RateError>| (*err).clone())?;
        Ok((*table).clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn code(s: &str) -> CurrencyCode {
        CurrencyCode::parse(s).unwrap()
    }

    /// Counts calls; the first `fail_first` calls fail.
    struct CountingSource {
        calls: AtomicUsize,
        fail_first: usize,
    }

    impl CountingSource {
        fn new(fail_first: usize) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_first,
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl RateSource for CountingSource {
        async fn latest_rates(&self, base: &CurrencyCode) -> Result<LatestRates, RateError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if n < self.fail_first {
                return Err(RateError::Status(503));
            }
            let mut rates = HashMap::new();
            rates.insert(code("EUR"), dec!(0.9));
            Ok(LatestRates::new(base.clone(), rates))
        }
    }

    #[tokio::test]
    async fn test_second_lookup_is_served_from_cache() {
        let cached = CachedRateSource::new(CountingSource::new(0));

        let first = cached.latest_rates(&code("USD")).await.unwrap();
        let second = cached.latest_rates(&code("USD")).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(cached.inner().calls(), 1);
    }

    #[tokio::test]
    async fn test_bases_are_cached_separately() {
        let cached = CachedRateSource::new(CountingSource::new(0));

        cached.latest_rates(&code("USD")).await.unwrap();
        cached.latest_rates(&code("GBP")).await.unwrap();

        assert_eq!(cached.inner().calls(), 2);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let cached = CachedRateSource::new(CountingSource::new(1));

        let err = cached.latest_rates(&code("USD")).await.unwrap_err();
        assert_eq!(err, RateError::Status(503));

        let rates = cached.latest_rates(&code("USD")).await.unwrap();
        assert_eq!(rates.rate_for(&code("EUR")).unwrap(), dec!(0.9));
        assert_eq!(cached.inner().calls(), 2);
    }

    #[tokio::test]
    async fn test_invalidate_all_forces_refetch() {
        let cached = CachedRateSource::new(CountingSource::new(0));

        cached.latest_rates(&code("USD")).await.unwrap();
        cached.invalidate_all();
        cached.latest_rates(&code("USD")).await.unwrap();

        assert_eq!(cached.inner().calls(), 2);
    }
}
