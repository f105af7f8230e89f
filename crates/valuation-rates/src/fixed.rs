//! Constant rate source.

use async_trait::async_trait;
use tracing::trace;
use valuation_core::{Result, RiskFreeRateSource};

/// A rate source that always returns the same rate.
///
/// Useful for offline runs, tests, or a rate configured by the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedRateSource {
    rate: f64,
}

impl FixedRateSource {
    /// Create a source returning `rate`.
    #[must_use]
    pub const fn new(rate: f64) -> Self {
        Self { rate }
    }

    /// Returns the configured rate.
    #[must_use]
    pub const fn rate(&self) -> f64 {
        self.rate
    }
}

#[async_trait]
impl RiskFreeRateSource for FixedRateSource {
    fn name(&self) -> &str {
        "Fixed"
    }

    async fn fetch_rate(&self) -> Result<f64> {
        trace!(rate = self.rate, "FixedRateSource: returning configured rate");
        Ok(self.rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixed_rate() {
        let source = FixedRateSource::new(0.0425);
        assert_eq!(source.name(), "Fixed");
        assert_eq!(source.fetch_rate().await.unwrap(), 0.0425);
        assert_eq!(source.rate(), 0.0425);
    }
}
