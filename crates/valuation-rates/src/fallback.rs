//! Fallback rate source.

use async_trait::async_trait;
use tracing::{debug, warn};
use valuation_core::{Result, RiskFreeRateSource, params::DEFAULT_RISK_FREE_RATE};

/// Wraps a rate source so that fetching never fails.
///
/// Errors and non-finite rates from the inner source resolve to the fallback
/// rate ([`DEFAULT_RISK_FREE_RATE`] unless overridden) and are logged at
/// warning level.
#[derive(Debug, Clone)]
pub struct FallbackRateSource<S> {
    inner: S,
    fallback_rate: f64,
}

impl<S: RiskFreeRateSource> FallbackRateSource<S> {
    /// Wrap `inner` with the default 3% fallback.
    #[must_use]
    pub fn new(inner: S) -> Self {
        Self::with_fallback(inner, DEFAULT_RISK_FREE_RATE)
    }

    /// Wrap `inner` with a custom fallback rate.
    #[must_use]
    pub fn with_fallback(inner: S, fallback_rate: f64) -> Self {
        Self {
            inner,
            fallback_rate,
        }
    }

    /// Returns the fallback rate.
    #[must_use]
    pub const fn fallback_rate(&self) -> f64 {
        self.fallback_rate
    }

    /// Fetches the rate, resolving any failure to the fallback.
    pub async fn rate(&self) -> f64 {
        match self.inner.fetch_rate().await {
            Ok(rate) if rate.is_finite() => {
                debug!(source = self.inner.name(), rate, "Fetched risk-free rate");
                rate
            }
            Ok(rate) => {
                warn!(
                    source = self.inner.name(),
                    rate,
                    fallback = self.fallback_rate,
                    "Risk-free rate is not finite, using fallback"
                );
                self.fallback_rate
            }
            Err(e) => {
                warn!(
                    source = self.inner.name(),
                    error = %e,
                    fallback = self.fallback_rate,
                    "Risk-free rate fetch failed, using fallback"
                );
                self.fallback_rate
            }
        }
    }
}

#[async_trait]
impl<S: RiskFreeRateSource> RiskFreeRateSource for FallbackRateSource<S> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn fetch_rate(&self) -> Result<f64> {
        Ok(self.rate().await)
    }
}
