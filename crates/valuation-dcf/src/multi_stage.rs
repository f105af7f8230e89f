//! Multi-stage DCF projector.
//!
//! Cash flows compound at the short-term rate for `projection_years_short`
//! years, then the growth rate glides linearly to the long-term rate by
//! `projection_years_total`. A perpetuity-growth terminal value at the
//! long-term rate closes the horizon.

use std::sync::Arc;

use tracing::{debug, instrument};
use valuation_core::{
    CompanyFinancialSnapshot, DcfValuation, IndustryBetaTable, Result, StrategyKind,
    ValuationError, ValuationParameters, ValuationResult, ValuationStrategy,
    numeric::{ensure_finite, perpetuity_value, present_value},
};
use valuation_wacc::{estimate_wacc, estimate_wacc_with_table};

/// Growth rate applied in projection `year` (1-based).
///
/// Equals `short_term_growth` through `years_short`, falls linearly by
/// `(short_term_growth - long_term_growth) / (years_total - years_short)` per
/// year afterwards, and equals `long_term_growth` from `years_total` on.
#[must_use]
pub fn glide_path_growth(
    year: u32,
    short_term_growth: f64,
    long_term_growth: f64,
    years_short: u32,
    years_total: u32,
) -> f64 {
    if year <= years_short {
        return short_term_growth;
    }
    if year >= years_total {
        return long_term_growth;
    }
    let step = f64::from(year - years_short);
    let steps = f64::from(years_total - years_short);
    short_term_growth - (short_term_growth - long_term_growth) * step / steps
}

pub(crate) fn ensure_positive_shares(shares_outstanding: f64) -> Result<f64> {
    if shares_outstanding.is_finite() && shares_outstanding > 0.0 {
        Ok(shares_outstanding)
    } else {
        Err(ValuationError::InvalidShares(shares_outstanding))
    }
}

/// Projects free cash flow and derives a per-share fair value.
///
/// Returns `Ok(None)` when the snapshot has no free-cash-flow history,
/// whatever the other arguments. Fails with
/// [`ValuationError::DegenerateRate`] unless `discount_rate` strictly exceeds
/// the long-term growth rate, and with [`ValuationError::InvalidShares`]
/// unless shares outstanding are positive.
#[instrument(skip(snapshot, params), fields(symbol = %snapshot.symbol))]
pub fn project_dcf(
    snapshot: &CompanyFinancialSnapshot,
    params: &ValuationParameters,
    discount_rate: f64,
) -> Result<Option<DcfValuation>> {
    let Some(latest_fcf) = snapshot.latest_free_cash_flow() else {
        debug!("No free cash flow history, skipping projection");
        return Ok(None);
    };

    params.validate()?;
    let shares_outstanding = ensure_positive_shares(snapshot.shares_outstanding)?;
    let discount_rate = ensure_finite("discount rate", discount_rate)?;
    let long_term_growth = params.long_term_growth_rate;
    if discount_rate <= long_term_growth {
        return Err(ValuationError::DegenerateRate {
            discount_rate,
            long_term_growth,
        });
    }

    let years_short = params.projection_years_short;
    let years_total = params.projection_years_total;
    let capacity = years_total as usize;

    let mut projected_cash_flows = Vec::with_capacity(capacity);
    let mut present_values = Vec::with_capacity(capacity);
    let mut growth_rates = Vec::with_capacity(capacity);

    let mut cash_flow = ensure_finite("latest free cash flow", latest_fcf)?;
    for year in 1..=years_total {
        let growth = glide_path_growth(
            year,
            params.short_term_growth_rate,
            long_term_growth,
            years_short,
            years_total,
        );
        cash_flow *= 1.0 + growth;
        growth_rates.push(growth);
        projected_cash_flows.push(cash_flow);
        present_values.push(present_value(cash_flow, discount_rate, year));
    }

    let terminal_value = perpetuity_value(cash_flow, long_term_growth, discount_rate)?;
    let discounted_terminal_value = present_value(terminal_value, discount_rate, years_total);

    let enterprise_value = ensure_finite(
        "enterprise value",
        present_values.iter().sum::<f64>() + discounted_terminal_value,
    )?;
    let equity_value = enterprise_value - snapshot.net_debt();
    let fair_value_per_share =
        ensure_finite("fair value per share", equity_value / shares_outstanding)?;

    debug!(
        enterprise_value,
        fair_value_per_share, "Projected multi-stage DCF"
    );

    Ok(Some(DcfValuation {
        fair_value_per_share,
        projected_cash_flows,
        present_values,
        growth_rates,
        terminal_value,
        discounted_terminal_value,
        enterprise_value,
        equity_value,
        margin_of_safety: None,
    }))
}

/// WACC-discounted multi-stage valuation strategy.
///
/// Uses the process-wide industry beta table unless one is supplied.
#[derive(Debug, Clone, Default)]
pub struct MultiStageDcf {
    table: Option<Arc<IndustryBetaTable>>,
}

impl MultiStageDcf {
    /// Create a strategy backed by the process-wide industry beta table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a strategy backed by an explicit industry beta table.
    #[must_use]
    pub fn with_table(table: Arc<IndustryBetaTable>) -> Self {
        Self { table: Some(table) }
    }
}

impl ValuationStrategy for MultiStageDcf {
    fn name(&self) -> &str {
        "Multi-stage DCF"
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::MultiStage
    }

    fn value(
        &self,
        snapshot: &CompanyFinancialSnapshot,
        params: &ValuationParameters,
    ) -> Result<ValuationResult> {
        let estimate = match &self.table {
            Some(table) => estimate_wacc_with_table(
                snapshot,
                table,
                params.risk_free_rate,
                params.market_risk_premium,
            ),
            None => estimate_wacc(snapshot, params.risk_free_rate, params.market_risk_premium),
        };

        let valuation = project_dcf(snapshot, params, estimate.discount_rate)?;

        Ok(ValuationResult {
            symbol: snapshot.symbol.clone(),
            as_of: snapshot.as_of,
            strategy: self.kind(),
            discount_rate: estimate.discount_rate,
            adjusted_beta: estimate.adjusted_beta,
            valuation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use valuation_core::Symbol;

    fn params() -> ValuationParameters {
        ValuationParameters::new().with_growth(0.10, 0.02)
    }

    fn snapshot(history: Vec<f64>) -> CompanyFinancialSnapshot {
        CompanyFinancialSnapshot::new(Symbol::new("ACME"), 50.0).with_free_cash_flow_history(history)
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= 1e-9 * expected.abs().max(1.0),
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_regression_baseline() {
        let valuation = project_dcf(&snapshot(vec![100.0]), &params(), 0.10)
            .unwrap()
            .unwrap();

        assert_eq!(valuation.projected_cash_flows.len(), 10);
        assert_close(valuation.projected_cash_flows[0], 110.0);
        assert_close(valuation.projected_cash_flows[4], 161.051);
        assert_close(valuation.projected_cash_flows[9], 207.271_517_811_713_04);
        assert_close(valuation.terminal_value, 2_642.711_852_099_341_3);
        assert_close(valuation.discounted_terminal_value, 1_018.879_820_472_789_3);
        assert_close(valuation.enterprise_value, 1_970.699_465_424_492_7);
        assert_close(valuation.fair_value_per_share, 39.413_989_308_489_85);
        assert!(valuation.margin_of_safety.is_none());
    }

    #[test]
    fn test_empty_history_is_no_result() {
        let cases = [(0.10, 0.02, 0.10), (0.05, 0.03, 0.02), (0.0, 0.5, -1.0)];
        for (short, long, rate) in cases {
            let params = ValuationParameters::new().with_growth(short, long);
            assert!(project_dcf(&snapshot(vec![]), &params, rate).unwrap().is_none());
        }
    }

    #[test]
    fn test_degenerate_rate_rejected() {
        let params = ValuationParameters::new().with_growth(0.10, 0.03);
        let err = project_dcf(&snapshot(vec![100.0]), &params, 0.02).unwrap_err();
        assert_eq!(
            err,
            ValuationError::DegenerateRate {
                discount_rate: 0.02,
                long_term_growth: 0.03,
            }
        );

        let equal = project_dcf(&snapshot(vec![100.0]), &params, 0.03).unwrap_err();
        assert!(matches!(equal, ValuationError::DegenerateRate { .. }));
    }

    #[test]
    fn test_idempotent() {
        let snapshot = snapshot(vec![87.5, 80.0, 75.0]);
        let first = project_dcf(&snapshot, &params(), 0.09).unwrap().unwrap();
        let second = project_dcf(&snapshot, &params(), 0.09).unwrap().unwrap();

        assert_eq!(
            first.fair_value_per_share.to_bits(),
            second.fair_value_per_share.to_bits()
        );
        let bits = |v: &[f64]| v.iter().map(|x| x.to_bits()).collect::<Vec<_>>();
        assert_eq!(
            bits(&first.projected_cash_flows),
            bits(&second.projected_cash_flows)
        );
    }

    #[test]
    fn test_glide_path_boundaries() {
        assert_eq!(glide_path_growth(5, 0.12, 0.03, 5, 10), 0.12);
        assert_eq!(glide_path_growth(10, 0.12, 0.03, 5, 10), 0.03);
        assert_eq!(glide_path_growth(1, 0.12, 0.03, 5, 10), 0.12);

        let mid = glide_path_growth(7, 0.12, 0.03, 5, 10);
        assert!((mid - (0.12 - 0.09 * 2.0 / 5.0)).abs() < 1e-12);
    }

    #[test]
    fn test_glide_path_is_monotonic() {
        let rates: Vec<f64> = (1..=10)
            .map(|year| glide_path_growth(year, 0.15, 0.02, 4, 10))
            .collect();
        assert!(rates.windows(2).all(|w| w[1] <= w[0]));
    }

    #[test]
    fn test_net_debt_reduces_equity() {
        let base = project_dcf(&snapshot(vec![100.0]), &params(), 0.10)
            .unwrap()
            .unwrap();
        let levered = snapshot(vec![100.0]).with_capital(0.0, 500.0, 100.0);
        let valuation = project_dcf(&levered, &params(), 0.10).unwrap().unwrap();

        assert_close(valuation.equity_value, base.enterprise_value - 400.0);
        assert_close(valuation.fair_value_per_share, base.fair_value_per_share - 8.0);
    }

    #[test]
    fn test_uses_most_recent_cash_flow() {
        let valuation = project_dcf(&snapshot(vec![200.0, 100.0]), &params(), 0.10)
            .unwrap()
            .unwrap();
        assert_close(valuation.projected_cash_flows[0], 220.0);
    }

    #[test]
    fn test_invalid_shares() {
        let mut snapshot = snapshot(vec![100.0]);
        snapshot.shares_outstanding = 0.0;
        assert_eq!(
            project_dcf(&snapshot, &params(), 0.10).unwrap_err(),
            ValuationError::InvalidShares(0.0)
        );
    }

    #[test]
    fn test_invalid_horizon() {
        let params = params().with_horizon(10, 5);
        assert!(matches!(
            project_dcf(&snapshot(vec![100.0]), &params, 0.10),
            Err(ValuationError::InvalidParameter(_))
        ));

        let params = self::params().with_horizon(5, 4_000_000_000);
        assert!(matches!(
            project_dcf(&snapshot(vec![100.0]), &params, 0.10),
            Err(ValuationError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_strategy_uses_wacc() {
        let as_of = chrono::NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        let snapshot = snapshot(vec![100.0])
            .with_capital(1_000.0, 0.0, 0.0)
            .with_as_of(as_of);
        let params = params().with_risk_free_rate(0.04);
        let result = MultiStageDcf::new().value(&snapshot, &params).unwrap();

        assert_eq!(result.strategy, StrategyKind::MultiStage);
        assert_eq!(result.as_of, Some(as_of));
        assert!((result.discount_rate - 0.10).abs() < 1e-12);
        assert_eq!(result.adjusted_beta, 1.0);
        assert_eq!(result.projected_cash_flows().map(<[f64]>::len), Some(10));
    }

    #[test]
    fn test_strategy_without_history() {
        let snapshot = snapshot(vec![]).with_capital(1_000.0, 0.0, 0.0);
        let result = MultiStageDcf::new().value(&snapshot, &params()).unwrap();

        assert!(result.discount_rate > 0.0);
        assert!(result.fair_value_per_share().is_none());
    }

    #[test]
    fn test_strategy_surfaces_degenerate_rate() {
        let snapshot = snapshot(vec![100.0]).with_capital(1_000.0, 0.0, 0.0);
        let params = params().with_growth(0.10, 0.12);
        assert!(matches!(
            MultiStageDcf::new().value(&snapshot, &params),
            Err(ValuationError::DegenerateRate { .. })
        ));
    }
}
