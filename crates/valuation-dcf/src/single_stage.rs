//! Single-stage DCF with a quality-based margin of safety.
//!
//! A simplified alternative to the multi-stage model. The discount rate comes
//! from a base rate plus premiums for high beta and high leverage rather than
//! from a WACC estimate, cash flows compound at one rate for a fixed five
//! years, and the fair value is scaled by a margin of safety derived from
//! [`QualityThresholds`].

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use valuation_core::{
    CompanyFinancialSnapshot, DcfValuation, Result, StrategyKind, ValuationParameters,
    ValuationResult, ValuationStrategy,
    numeric::{ensure_finite, perpetuity_value, present_value},
};

use crate::multi_stage::ensure_positive_shares;
use crate::quality::QualityThresholds;

/// Projection horizon of the single-stage model, in years.
pub const SINGLE_STAGE_YEARS: u32 = 5;

/// Tunable constants of the single-stage model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SingleStageConfig {
    /// Growth used when trailing earnings growth is missing or not positive.
    pub default_growth: f64,
    /// Cap on the margin-adjusted growth rate.
    pub max_growth: f64,
    /// Discount rate before risk premiums.
    pub base_discount_rate: f64,
    /// Beta above which the high-beta premium applies.
    pub high_beta_threshold: f64,
    /// Premium added for high-beta companies.
    pub high_beta_premium: f64,
    /// Debt-to-equity above which the leverage premium applies.
    pub high_leverage_threshold: f64,
    /// Premium added for highly levered companies.
    pub high_leverage_premium: f64,
    /// Cap on the terminal growth rate.
    pub max_terminal_growth: f64,
    /// Margin of safety for a company failing every quality check.
    pub min_margin_of_safety: f64,
    /// Quality checks feeding the margin of safety.
    pub quality: QualityThresholds,
}

impl Default for SingleStageConfig {
    fn default() -> Self {
        Self {
            default_growth: 0.10,
            max_growth: 0.15,
            base_discount_rate: 0.10,
            high_beta_threshold: 1.5,
            high_beta_premium: 0.02,
            high_leverage_threshold: 2.0,
            high_leverage_premium: 0.01,
            max_terminal_growth: 0.03,
            min_margin_of_safety: 0.7,
            quality: QualityThresholds::default(),
        }
    }
}

impl SingleStageConfig {
    /// Growth rate: trailing earnings growth scaled by `1 + profit margin`, capped.
    #[must_use]
    pub fn growth_rate(&self, snapshot: &CompanyFinancialSnapshot) -> f64 {
        let base = match snapshot.earnings_growth {
            Some(g) if g > 0.0 => g,
            _ => self.default_growth,
        };
        let margin = snapshot.profit_margin.unwrap_or(0.0);
        (base * (1.0 + margin)).min(self.max_growth)
    }

    /// Base discount rate plus the applicable beta and leverage premiums.
    #[must_use]
    pub fn discount_rate(&self, snapshot: &CompanyFinancialSnapshot) -> f64 {
        let mut rate = self.base_discount_rate;
        if snapshot.beta_or_default() > self.high_beta_threshold {
            rate += self.high_beta_premium;
        }
        if snapshot.debt_to_equity.unwrap_or(0.0) > self.high_leverage_threshold {
            rate += self.high_leverage_premium;
        }
        rate
    }

    /// Terminal growth: half the projection growth, capped.
    #[must_use]
    pub fn terminal_growth(&self, growth: f64) -> f64 {
        self.max_terminal_growth.min(growth / 2.0)
    }

    /// Margin of safety for a quality score in `[0, 1]`.
    #[must_use]
    pub fn margin_of_safety(&self, quality_score: f64) -> f64 {
        self.min_margin_of_safety + (1.0 - self.min_margin_of_safety) * quality_score
    }
}

/// Five-year valuation strategy with a quality-based margin of safety.
#[derive(Debug, Clone, Default)]
pub struct SingleStageDcf {
    config: SingleStageConfig,
}

impl SingleStageDcf {
    /// Create a strategy with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a strategy with a custom configuration.
    #[must_use]
    pub const fn with_config(config: SingleStageConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &SingleStageConfig {
        &self.config
    }

    /// Projects five years of cash flow at `discount_rate`.
    ///
    /// The base cash flow is the larger of the latest free cash flow and the
    /// operating cash flow. No net-debt adjustment is applied.
    #[instrument(skip(self, snapshot), fields(symbol = %snapshot.symbol))]
    pub fn project(
        &self,
        snapshot: &CompanyFinancialSnapshot,
        discount_rate: f64,
    ) -> Result<Option<DcfValuation>> {
        let Some(latest_fcf) = snapshot.latest_free_cash_flow() else {
            debug!("No free cash flow history, skipping projection");
            return Ok(None);
        };

        let shares_outstanding = ensure_positive_shares(snapshot.shares_outstanding)?;
        let discount_rate = ensure_finite("discount rate", discount_rate)?;
        for (label, value) in [
            ("earnings growth", snapshot.earnings_growth),
            ("profit margin", snapshot.profit_margin),
            ("beta", snapshot.beta),
            ("debt to equity", snapshot.debt_to_equity),
        ] {
            if let Some(value) = value {
                ensure_finite(label, value)?;
            }
        }

        let base_cash_flow = ensure_finite(
            "base cash flow",
            snapshot
                .operating_cash_flow
                .map_or(latest_fcf, |ocf| latest_fcf.max(ocf)),
        )?;

        let growth = self.config.growth_rate(snapshot);
        let terminal_growth = self.config.terminal_growth(growth);

        let projected_cash_flows: Vec<f64> = (1..=SINGLE_STAGE_YEARS)
            .map(|year| base_cash_flow * (1.0 + growth).powi(year as i32))
            .collect();
        let present_values: Vec<f64> = projected_cash_flows
            .iter()
            .zip(1..)
            .map(|(cf, year)| present_value(*cf, discount_rate, year))
            .collect();

        let final_cash_flow = projected_cash_flows[projected_cash_flows.len() - 1];
        let terminal_value = perpetuity_value(final_cash_flow, terminal_growth, discount_rate)?;
        let discounted_terminal_value =
            present_value(terminal_value, discount_rate, SINGLE_STAGE_YEARS);

        let enterprise_value = ensure_finite(
            "present value",
            present_values.iter().sum::<f64>() + discounted_terminal_value,
        )?;

        let quality_score = self.config.quality.score(snapshot);
        let margin_of_safety = self.config.margin_of_safety(quality_score);
        let fair_value_per_share = ensure_finite(
            "fair value per share",
            enterprise_value / shares_outstanding * margin_of_safety,
        )?;

        debug!(
            growth,
            quality_score, fair_value_per_share, "Projected single-stage DCF"
        );

        Ok(Some(DcfValuation {
            fair_value_per_share,
            projected_cash_flows,
            present_values,
            growth_rates: vec![growth; SINGLE_STAGE_YEARS as usize],
            terminal_value,
            discounted_terminal_value,
            enterprise_value,
            equity_value: enterprise_value,
            margin_of_safety: Some(margin_of_safety),
        }))
    }
}

impl ValuationStrategy for SingleStageDcf {
    fn name(&self) -> &str {
        "Single-stage DCF"
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::SingleStage
    }

    fn value(
        &self,
        snapshot: &CompanyFinancialSnapshot,
        _params: &ValuationParameters,
    ) -> Result<ValuationResult> {
        let discount_rate = self.config.discount_rate(snapshot);
        let valuation = self.project(snapshot, discount_rate)?;

        Ok(ValuationResult {
            symbol: snapshot.symbol.clone(),
            as_of: snapshot.as_of,
            strategy: self.kind(),
            discount_rate,
            adjusted_beta: snapshot.beta_or_default(),
            valuation,
        })
    }
}
