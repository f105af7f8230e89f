//! TTL-cached rate source.

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, instrument};
use valuation_core::{Result, RiskFreeRateSource};

/// Cached rate with timestamp for TTL-based invalidation.
#[derive(Debug, Clone, Copy)]
struct CacheEntry {
    rate: f64,
    cached_at: DateTime<Utc>,
}

impl CacheEntry {
    fn new(rate: f64) -> Self {
        Self {
            rate,
            cached_at: Utc::now(),
        }
    }

    fn is_stale(&self, ttl: Duration) -> bool {
        let age = Utc::now().signed_duration_since(self.cached_at);
        age > TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX)
    }
}

/// Keeps the last successfully fetched rate for a fixed time-to-live.
///
/// Failed fetches are not cached. The cached value sits behind a `RwLock` and
/// is shared safely between concurrent valuations.
#[derive(Debug)]
pub struct CachedRateSource<S> {
    inner: S,
    ttl: Duration,
    entry: RwLock<Option<CacheEntry>>,
}

impl<S: RiskFreeRateSource> CachedRateSource<S> {
    /// Cache rates fetched from `inner` for `ttl`.
    #[must_use]
    pub fn new(inner: S, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            entry: RwLock::new(None),
        }
    }

    /// Returns the configured time-to-live.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Drops the cached rate so the next fetch hits the inner source.
    pub async fn invalidate(&self) {
        *self.entry.write().await = None;
        debug!("Invalidated cached risk-free rate");
    }
}

#[async_trait]
impl<S: RiskFreeRateSource> RiskFreeRateSource for CachedRateSource<S> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    #[instrument(skip(self), fields(source = %self.inner.name()))]
    async fn fetch_rate(&self) -> Result<f64> {
        if let Some(entry) = *self.entry.read().await {
            if !entry.is_stale(self.ttl) {
                debug!("Cache hit for risk-free rate");
                return Ok(entry.rate);
            }
        }

        debug!("Cache miss for risk-free rate");
        let rate = self.inner.fetch_rate().await?;
        *self.entry.write().await = Some(CacheEntry::new(rate));
        Ok(rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use valuation_core::ValuationError;

    #[derive(Debug, Default)]
    struct CountingSource {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl RiskFreeRateSource for CountingSource {
        fn name(&self) -> &str {
            "Counting"
        }

        async fn fetch_rate(&self) -> Result<f64> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(ValuationError::RateSource("offline".into()))
            } else {
                Ok(0.04 + n as f64 / 1_000.0)
            }
        }
    }

    #[tokio::test]
    async fn test_cache_hit_within_ttl() {
        let source = CachedRateSource::new(CountingSource::default(), Duration::from_secs(3600));

        assert_eq!(source.fetch_rate().await.unwrap(), 0.04);
        assert_eq!(source.fetch_rate().await.unwrap(), 0.04);
        assert_eq!(source.inner.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_invalidate_forces_refetch() {
        let source = CachedRateSource::new(CountingSource::default(), Duration::from_secs(3600));

        source.fetch_rate().await.unwrap();
        source.invalidate().await;
        assert_eq!(source.fetch_rate().await.unwrap(), 0.041);
        assert_eq!(source.inner.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let source = CachedRateSource::new(
            CountingSource {
                fail: true,
                ..Default::default()
            },
            Duration::from_secs(3600),
        );

        assert!(source.fetch_rate().await.is_err());
        assert!(source.fetch_rate().await.is_err());
        assert_eq!(source.inner.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_entry_staleness() {
        let mut entry = CacheEntry::new(0.03);
        assert!(!entry.is_stale(Duration::from_secs(60)));

        entry.cached_at = Utc::now() - TimeDelta::minutes(5);
        assert!(entry.is_stale(Duration::from_secs(60)));
    }
}
