//! Traits for external input collaborators.
//!
//! This module defines the two seams through which the engine receives data:
//!
//! - [`SnapshotSource`] - Company financial snapshots
//! - [`RiskFreeRateSource`] - Benchmark risk-free yield

use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    error::Result,
    types::{CompanyFinancialSnapshot, Symbol},
};

/// Supplier of company financial snapshots.
///
/// Implement this trait on top of a market-data client. The engine never
/// performs I/O itself.
#[async_trait]
pub trait SnapshotSource: Send + Sync + Debug {
    /// Returns the name of this source (e.g., "Yahoo Finance").
    fn name(&self) -> &str;

    /// Fetches the current snapshot for a symbol.
    async fn fetch_snapshot(&self, symbol: &Symbol) -> Result<CompanyFinancialSnapshot>;
}

/// Supplier of the annualized risk-free rate.
///
/// Sources that can fail should be wrapped so that a fetch failure resolves
/// to the 0.03 fallback rather than propagating.
#[async_trait]
pub trait RiskFreeRateSource: Send + Sync + Debug {
    /// Returns the name of this source.
    fn name(&self) -> &str;

    /// Fetches the current annualized risk-free rate as a fraction.
    async fn fetch_rate(&self) -> Result<f64>;
}
