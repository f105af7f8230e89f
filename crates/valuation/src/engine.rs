//! Valuation engine wiring snapshot sources, a rate source and a strategy.

use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, instrument, warn};

use valuation_core::{
    CompanyFinancialSnapshot, Result, RiskFreeRateSource, SnapshotSource, Symbol,
    ValuationError, ValuationParameters, ValuationResult, ValuationStrategy,
};
use valuation_dcf::{MultiStageDcf, SingleStageDcf};
use valuation_rates::FallbackRateSource;

/// Runs one valuation strategy over snapshots from registered sources.
///
/// Snapshot sources are tried in registration order until one succeeds. When
/// a rate source is configured, its rate replaces the parameters' risk-free
/// rate for every run; failures resolve to the 3% fallback. The engine holds
/// no per-run state, so one engine can value many companies concurrently.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use valuation::{Symbol, ValuationEngine, ValuationParameters};
///
/// let engine = ValuationEngine::single_stage()
///     .with_params(ValuationParameters::new().with_growth(0.08, 0.02))
///     .with_snapshot_source(Arc::new(MyMarketData::new()));
///
/// let results = engine
///     .value_batch(&[Symbol::new("AAPL"), Symbol::new("MSFT")])
///     .await;
/// ```
pub struct ValuationEngine {
    strategy: Arc<dyn ValuationStrategy>,
    params: ValuationParameters,
    snapshot_sources: Vec<Arc<dyn SnapshotSource>>,
    rate_source: Option<Arc<dyn RiskFreeRateSource>>,
}

impl std::fmt::Debug for ValuationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValuationEngine")
            .field("strategy", &self.strategy.name())
            .field("params", &self.params)
            .field(
                "snapshot_sources",
                &self
                    .snapshot_sources
                    .iter()
                    .map(|s| s.name())
                    .collect::<Vec<_>>(),
            )
            .field("rate_source", &self.rate_source.as_ref().map(|s| s.name()))
            .finish()
    }
}

impl ValuationEngine {
    /// Create an engine running `strategy` with default parameters.
    #[must_use]
    pub fn new(strategy: Arc<dyn ValuationStrategy>) -> Self {
        Self {
            strategy,
            params: ValuationParameters::default(),
            snapshot_sources: Vec::new(),
            rate_source: None,
        }
    }

    /// Create an engine running the WACC-driven multi-stage model.
    #[must_use]
    pub fn multi_stage() -> Self {
        Self::new(Arc::new(MultiStageDcf::new()))
    }

    /// Create an engine running the simplified single-stage model.
    #[must_use]
    pub fn single_stage() -> Self {
        Self::new(Arc::new(SingleStageDcf::new()))
    }

    /// Set the valuation parameters.
    #[must_use]
    pub fn with_params(mut self, params: ValuationParameters) -> Self {
        self.params = params;
        self
    }

    /// Set the risk-free rate source.
    ///
    /// The source is wrapped in a [`FallbackRateSource`], so a failed fetch
    /// yields 3% rather than an error.
    #[must_use]
    pub fn with_rate_source<S>(mut self, source: S) -> Self
    where
        S: RiskFreeRateSource + 'static,
    {
        debug!(source = source.name(), "Setting risk-free rate source");
        self.rate_source = Some(Arc::new(FallbackRateSource::new(source)));
        self
    }

    /// Add a snapshot source.
    #[must_use]
    pub fn with_snapshot_source(mut self, source: Arc<dyn SnapshotSource>) -> Self {
        self.register_snapshot_source(source);
        self
    }

    /// Register a snapshot source.
    pub fn register_snapshot_source(&mut self, source: Arc<dyn SnapshotSource>) {
        debug!(source = source.name(), "Registering snapshot source");
        self.snapshot_sources.push(source);
    }

    /// Returns the configured parameters.
    #[must_use]
    pub const fn params(&self) -> &ValuationParameters {
        &self.params
    }

    /// Returns the selected strategy.
    #[must_use]
    pub fn strategy(&self) -> &dyn ValuationStrategy {
        self.strategy.as_ref()
    }

    /// Value a snapshot with the configured parameters.
    ///
    /// Synchronous and pure; no rate source is consulted.
    pub fn value(&self, snapshot: &CompanyFinancialSnapshot) -> Result<ValuationResult> {
        self.value_with_params(snapshot, &self.params)
    }

    /// Value a snapshot with explicit parameters.
    #[instrument(skip(self, snapshot, params), fields(symbol = %snapshot.symbol, strategy = self.strategy.name()))]
    pub fn value_with_params(
        &self,
        snapshot: &CompanyFinancialSnapshot,
        params: &ValuationParameters,
    ) -> Result<ValuationResult> {
        params.validate()?;
        let result = self.strategy.value(snapshot, params)?;

        match result.fair_value_per_share() {
            Some(fair_value) => debug!(
                discount_rate = result.discount_rate,
                fair_value, "Valuation complete"
            ),
            None => debug!(
                discount_rate = result.discount_rate,
                "Valuation complete without fair value"
            ),
        }

        Ok(result)
    }

    /// Parameters for the next run, with the live risk-free rate if a rate
    /// source is configured.
    pub async fn resolve_params(&self) -> Result<ValuationParameters> {
        match &self.rate_source {
            Some(source) => {
                let rate = source.fetch_rate().await?;
                Ok(self.params.clone().with_risk_free_rate(rate))
            }
            None => Ok(self.params.clone()),
        }
    }

    /// Fetch a snapshot, trying sources in order until one succeeds.
    pub async fn fetch_snapshot(&self, symbol: &Symbol) -> Result<CompanyFinancialSnapshot> {
        if self.snapshot_sources.is_empty() {
            return Err(ValuationError::NotConfigured(
                "No snapshot sources registered".to_string(),
            ));
        }

        let mut last_error = None;
        for source in &self.snapshot_sources {
            debug!(
                source = source.name(),
                symbol = %symbol,
                "Fetching snapshot"
            );

            match source.fetch_snapshot(symbol).await {
                Ok(snapshot) => return Ok(snapshot),
                Err(e) => {
                    warn!(
                        source = source.name(),
                        error = %e,
                        "Snapshot source failed, trying next"
                    );
                    last_error = Some(e);
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| ValuationError::Other("All sources failed with no error".to_string())))
    }

    /// Fetch a snapshot and value it.
    pub async fn value_symbol(&self, symbol: &Symbol) -> Result<ValuationResult> {
        let params = self.resolve_params().await?;
        let snapshot = self.fetch_snapshot(symbol).await?;
        self.value_with_params(&snapshot, &params)
    }

    /// Value several symbols concurrently.
    ///
    /// The risk-free rate is resolved once for the whole batch. Results are
    /// returned in input order, one per symbol.
    pub async fn value_batch(&self, symbols: &[Symbol]) -> Vec<(Symbol, Result<ValuationResult>)> {
        let params = match self.resolve_params().await {
            Ok(params) => params,
            Err(e) => {
                return symbols.iter().map(|s| (s.clone(), Err(e.clone()))).collect();
            }
        };
        debug!(symbol_count = symbols.len(), "Valuing batch");

        let params = &params;
        join_all(symbols.iter().map(|symbol| async move {
            let result = match self.fetch_snapshot(symbol).await {
                Ok(snapshot) => self.value_with_params(&snapshot, params),
                Err(e) => Err(e),
            };
            (symbol.clone(), result)
        }))
        .await
    }
}
