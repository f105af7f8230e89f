//! Valuation strategy trait.

use std::fmt::Debug;

use crate::{
    error::Result,
    params::ValuationParameters,
    result::{StrategyKind, ValuationResult},
    types::CompanyFinancialSnapshot,
};

/// A valuation model turning a snapshot into a [`ValuationResult`].
///
/// Implementations are pure: identical inputs always yield identical results,
/// and nothing is memoized between calls. The engine selects exactly one
/// strategy per run.
pub trait ValuationStrategy: Send + Sync + Debug {
    /// Returns the name of this strategy (e.g., "Multi-stage DCF").
    fn name(&self) -> &str;

    /// Returns which model family this strategy belongs to.
    fn kind(&self) -> StrategyKind;

    /// Values one company.
    ///
    /// Returns `Ok` with an absent valuation when the snapshot holds too
    /// little history to project from, and `Err` for degenerate rates or
    /// invalid inputs.
    fn value(
        &self,
        snapshot: &CompanyFinancialSnapshot,
        params: &ValuationParameters,
    ) -> Result<ValuationResult>;
}
