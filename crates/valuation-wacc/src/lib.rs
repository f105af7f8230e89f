#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/valuation/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Weighted-average cost of capital estimator.
//!
//! [`estimate_wacc`] never fails. Missing fields resolve to documented
//! defaults, and a non-finite intermediate or a non-positive WACC yields the
//! fallback pair ([`FALLBACK_DISCOUNT_RATE`], [`FALLBACK_BETA`]).
//!
//! # Example
//!
//! ```
//! use valuation_core::{CompanyFinancialSnapshot, Symbol};
//! use valuation_wacc::estimate_wacc;
//!
//! let snapshot = CompanyFinancialSnapshot::new(Symbol::new("AAPL"), 15.0e9)
//!     .with_beta(1.2)
//!     .with_industry("Technology")
//!     .with_capital(3.0e12, 1.0e11, 6.0e10);
//!
//! let estimate = estimate_wacc(&snapshot, 0.04, 0.06);
//! assert!(estimate.discount_rate > 0.0);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use valuation_core::{
    CompanyFinancialSnapshot, IndustryBetaTable, Result,
    numeric::{checked_div, ensure_finite},
};

/// Discount rate returned when the estimate cannot be computed.
pub const FALLBACK_DISCOUNT_RATE: f64 = 0.08;

/// Beta returned alongside [`FALLBACK_DISCOUNT_RATE`].
pub const FALLBACK_BETA: f64 = 1.0;

/// Cost of debt assumed for companies without debt.
pub const DEFAULT_COST_OF_DEBT: f64 = 0.05;

/// Equity weight assumed when the capital structure sums to zero.
pub const DEFAULT_EQUITY_WEIGHT: f64 = 0.8;

/// Debt weight assumed when the capital structure sums to zero.
pub const DEFAULT_DEBT_WEIGHT: f64 = 0.2;

/// Intermediate quantities of a computed WACC.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WaccComponents {
    /// Company beta after defaulting.
    pub company_beta: f64,
    /// Industry-average beta from the lookup table.
    pub industry_beta: f64,
    /// Mean of company and industry beta.
    pub adjusted_beta: f64,
    /// CAPM cost of equity.
    pub cost_of_equity: f64,
    /// Pre-tax cost of debt.
    pub cost_of_debt: f64,
    /// Effective tax rate after defaulting.
    pub tax_rate: f64,
    /// Share of equity in the capital structure.
    pub equity_weight: f64,
    /// Share of debt in the capital structure.
    pub debt_weight: f64,
    /// Raw weighted-average cost of capital, before the positivity check.
    pub wacc: f64,
}

/// Why an estimate fell back to the default discount rate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum WaccFallback {
    /// The computed WACC was zero or negative.
    NonPositive {
        /// The rejected WACC.
        wacc: f64,
    },
    /// Arithmetic produced a non-finite value.
    ComputationFailure(String),
}

/// Discount rate and beta produced by the estimator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WaccEstimate {
    /// Discount rate to apply. Always positive.
    pub discount_rate: f64,
    /// Beta used for the cost of equity.
    pub adjusted_beta: f64,
    /// Intermediate quantities, absent if arithmetic failed.
    pub components: Option<WaccComponents>,
    /// Set when the fallback pair was returned.
    pub fallback: Option<WaccFallback>,
}

impl WaccEstimate {
    fn fallback(components: Option<WaccComponents>, reason: WaccFallback) -> Self {
        Self {
            discount_rate: FALLBACK_DISCOUNT_RATE,
            adjusted_beta: FALLBACK_BETA,
            components,
            fallback: Some(reason),
        }
    }

    /// Returns true if the fallback pair was returned.
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        self.fallback.is_some()
    }
}

/// Pre-tax cost of debt implied by the latest interest expense.
///
/// Returns [`DEFAULT_COST_OF_DEBT`] unless `total_debt` is positive, and a
/// [`valuation_core::ValuationError::ComputationFailure`] if the ratio is not finite.
pub fn cost_of_debt(interest_expense: f64, total_debt: f64) -> Result<f64> {
    if total_debt > 0.0 {
        Ok(checked_div("cost of debt", interest_expense, total_debt)?.abs())
    } else {
        Ok(DEFAULT_COST_OF_DEBT)
    }
}

/// Equity and debt weights of the capital structure.
///
/// Returns the ([`DEFAULT_EQUITY_WEIGHT`], [`DEFAULT_DEBT_WEIGHT`]) split
/// when market cap plus debt is not positive. Weights sum to one.
#[must_use]
pub fn capital_weights(market_cap: f64, total_debt: f64) -> (f64, f64) {
    let total_value = market_cap + total_debt;
    if total_value > 0.0 {
        (market_cap / total_value, total_debt / total_value)
    } else {
        (DEFAULT_EQUITY_WEIGHT, DEFAULT_DEBT_WEIGHT)
    }
}

/// Estimates the WACC using the process-wide industry beta table.
#[must_use]
pub fn estimate_wacc(
    snapshot: &CompanyFinancialSnapshot,
    risk_free_rate: f64,
    market_risk_premium: f64,
) -> WaccEstimate {
    estimate_wacc_with_table(
        snapshot,
        IndustryBetaTable::global(),
        risk_free_rate,
        market_risk_premium,
    )
}

/// Estimates the WACC against an explicit industry beta table.
#[must_use]
pub fn estimate_wacc_with_table(
    snapshot: &CompanyFinancialSnapshot,
    table: &IndustryBetaTable,
    risk_free_rate: f64,
    market_risk_premium: f64,
) -> WaccEstimate {
    let components = match compute_components(snapshot, table, risk_free_rate, market_risk_premium)
    {
        Ok(components) => components,
        Err(e) => {
            warn!(
                symbol = %snapshot.symbol,
                error = %e,
                "WACC calculation failed, using default 8%"
            );
            return WaccEstimate::fallback(None, WaccFallback::ComputationFailure(e.to_string()));
        }
    };

    if components.wacc > 0.0 {
        debug!(
            symbol = %snapshot.symbol,
            wacc = components.wacc,
            adjusted_beta = components.adjusted_beta,
            "Estimated WACC"
        );
        WaccEstimate {
            discount_rate: components.wacc,
            adjusted_beta: components.adjusted_beta,
            components: Some(components),
            fallback: None,
        }
    } else {
        warn!(
            symbol = %snapshot.symbol,
            wacc = components.wacc,
            "Non-positive WACC, using default 8%"
        );
        WaccEstimate::fallback(
            Some(components),
            WaccFallback::NonPositive {
                wacc: components.wacc,
            },
        )
    }
}

fn compute_components(
    snapshot: &CompanyFinancialSnapshot,
    table: &IndustryBetaTable,
    risk_free_rate: f64,
    market_risk_premium: f64,
) -> Result<WaccComponents> {
    let company_beta = ensure_finite("company beta", snapshot.beta_or_default())?;
    let industry_beta = table.lookup(&snapshot.industry);
    let adjusted_beta = (company_beta + industry_beta) / 2.0;
    let cost_of_equity = ensure_finite(
        "cost of equity",
        risk_free_rate + adjusted_beta * market_risk_premium,
    )?;

    let total_debt = ensure_finite("total debt", snapshot.total_debt)?;
    let market_cap = ensure_finite("market cap", snapshot.market_cap)?;
    let interest_expense = ensure_finite("interest expense", snapshot.interest_expense_or_default())?;
    let cost_of_debt = cost_of_debt(interest_expense, total_debt)?;
    let tax_rate = ensure_finite("tax rate", snapshot.effective_tax_rate_or_default())?;

    let (equity_weight, debt_weight) = capital_weights(market_cap, total_debt);
    let wacc = ensure_finite(
        "wacc",
        equity_weight * cost_of_equity + debt_weight * cost_of_debt * (1.0 - tax_rate),
    )?;

    Ok(WaccComponents {
        company_beta,
        industry_beta,
        adjusted_beta,
        cost_of_equity,
        cost_of_debt,
        tax_rate,
        equity_weight,
        debt_weight,
        wacc,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use valuation_core::{Symbol, ValuationError};

    fn snapshot() -> CompanyFinancialSnapshot {
        CompanyFinancialSnapshot::new(Symbol::new("TEST"), 100.0)
    }

    #[test]
    fn test_blended_wacc() {
        let snapshot = snapshot()
            .with_capital(800.0, 200.0, 0.0)
            .with_interest_expense(-10.0)
            .with_effective_tax_rate(0.25);

        let estimate = estimate_wacc(&snapshot, 0.03, 0.06);
        let components = estimate.components.unwrap();

        assert!(!estimate.is_fallback());
        assert_eq!(components.adjusted_beta, 1.0);
        assert!((components.cost_of_equity - 0.09).abs() < 1e-12);
        assert!((components.cost_of_debt - 0.05).abs() < 1e-12);
        assert!((components.equity_weight - 0.8).abs() < 1e-12);
        assert!((estimate.discount_rate - 0.0795).abs() < 1e-12);
    }

    #[test]
    fn test_adjusted_beta_averages_industry() {
        let snapshot = snapshot()
            .with_beta(1.5)
            .with_industry("Technology")
            .with_capital(1_000.0, 0.0, 0.0);

        let estimate = estimate_wacc(&snapshot, 0.03, 0.06);
        assert!((estimate.adjusted_beta - 1.375).abs() < 1e-12);
    }

    #[test]
    fn test_zero_debt_uses_default_cost_and_zero_weight() {
        let snapshot = snapshot().with_capital(5_000.0, 0.0, 100.0);
        let components = estimate_wacc(&snapshot, 0.03, 0.06).components.unwrap();

        assert_eq!(components.cost_of_debt, DEFAULT_COST_OF_DEBT);
        assert_eq!(components.debt_weight, 0.0);
        assert_eq!(components.equity_weight, 1.0);
    }

    #[test]
    fn test_zero_capital_uses_default_weights() {
        let snapshot = snapshot().with_capital(0.0, 0.0, 0.0);
        let components = estimate_wacc(&snapshot, 0.03, 0.06).components.unwrap();

        assert_eq!(components.equity_weight, 0.8);
        assert_eq!(components.debt_weight, 0.2);
        assert_eq!(capital_weights(0.0, 0.0), (0.8, 0.2));
    }

    #[test]
    fn test_cost_of_debt_helper() {
        assert_eq!(cost_of_debt(25.0, 500.0).unwrap(), 0.05);
        assert_eq!(cost_of_debt(-40.0, 400.0).unwrap(), 0.1);
        assert_eq!(cost_of_debt(40.0, 0.0).unwrap(), DEFAULT_COST_OF_DEBT);
        assert!(matches!(
            cost_of_debt(1e300, 1e-300),
            Err(ValuationError::ComputationFailure(_))
        ));
    }

    #[test]
    fn test_non_positive_wacc_falls_back() {
        let snapshot = snapshot().with_capital(1_000.0, 0.0, 0.0);
        let estimate = estimate_wacc(&snapshot, -0.5, 0.06);

        assert_eq!(estimate.discount_rate, FALLBACK_DISCOUNT_RATE);
        assert_eq!(estimate.adjusted_beta, FALLBACK_BETA);
        assert!(estimate.components.is_some());
        assert!(matches!(
            estimate.fallback,
            Some(WaccFallback::NonPositive { .. })
        ));
    }

    #[test]
    fn test_arithmetic_failure_falls_back() {
        let snapshot = snapshot().with_beta(f64::NAN).with_capital(1_000.0, 0.0, 0.0);
        let estimate = estimate_wacc(&snapshot, 0.03, 0.06);

        assert_eq!(estimate.discount_rate, 0.08);
        assert_eq!(estimate.adjusted_beta, 1.0);
        assert!(estimate.components.is_none());
        assert!(matches!(
            estimate.fallback,
            Some(WaccFallback::ComputationFailure(_))
        ));
    }

    #[test]
    fn test_infinite_market_cap_falls_back() {
        let snapshot = snapshot().with_capital(f64::INFINITY, 10.0, 0.0);
        assert!(estimate_wacc(&snapshot, 0.03, 0.06).is_fallback());
    }

    #[test]
    fn test_explicit_table() {
        let table = IndustryBetaTable::new([("Default", 1.0), ("Shipping", 2.0)]).unwrap();
        let snapshot = snapshot()
            .with_industry("Shipping")
            .with_capital(1_000.0, 0.0, 0.0);

        let estimate = estimate_wacc_with_table(&snapshot, &table, 0.03, 0.06);
        assert!((estimate.adjusted_beta - 1.5).abs() < 1e-12);
        assert!((estimate.discount_rate - 0.12).abs() < 1e-12);
    }
}
