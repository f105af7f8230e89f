//! Valuation output types.
//!
//! A [`ValuationResult`] always carries a discount rate and an adjusted beta.
//! The per-share fair value and the projected cash flows live together in an
//! optional [`DcfValuation`], so "no data" can never be mistaken for a zero
//! fair value.

use chrono::NaiveDate;
use polars::prelude::{Column, DataFrame};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, ValuationError};
use crate::types::Symbol;

/// Which valuation model produced a result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrategyKind {
    /// WACC-discounted projection with a growth glide path.
    MultiStage,
    /// Fixed five-year projection with a quality-based margin of safety.
    SingleStage,
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MultiStage => write!(f, "multi-stage"),
            Self::SingleStage => write!(f, "single-stage"),
        }
    }
}

/// A computed cash-flow projection and the fair value derived from it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DcfValuation {
    /// Equity value per share, after any margin of safety.
    pub fair_value_per_share: f64,
    /// Nominal projected cash flows in chronological order.
    pub projected_cash_flows: Vec<f64>,
    /// Present value of each projected cash flow.
    pub present_values: Vec<f64>,
    /// Growth rate applied in each projected year.
    pub growth_rates: Vec<f64>,
    /// Perpetuity value at the end of the horizon, undiscounted.
    pub terminal_value: f64,
    /// Terminal value discounted to today.
    pub discounted_terminal_value: f64,
    /// Sum of discounted cash flows plus discounted terminal value.
    pub enterprise_value: f64,
    /// Enterprise value attributable to equity holders.
    pub equity_value: f64,
    /// Multiplier applied to the fair value, when the model uses one.
    pub margin_of_safety: Option<f64>,
}

impl DcfValuation {
    /// Number of projected years.
    #[must_use]
    pub fn years(&self) -> usize {
        self.projected_cash_flows.len()
    }

    /// Renders the projection as a DataFrame.
    ///
    /// Columns: year, growth_rate, cash_flow, present_value.
    pub fn to_frame(&self) -> Result<DataFrame> {
        let years: Vec<u32> = (1..=self.years() as u32).collect();

        DataFrame::new(vec![
            Column::new("year".into(), years),
            Column::new("growth_rate".into(), self.growth_rates.clone()),
            Column::new("cash_flow".into(), self.projected_cash_flows.clone()),
            Column::new("present_value".into(), self.present_values.clone()),
        ])
        .map_err(|e| ValuationError::Other(e.to_string()))
    }
}

/// Output of one valuation run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValuationResult {
    /// Stock symbol.
    pub symbol: Symbol,
    /// Observation date of the snapshot that was valued.
    pub as_of: Option<NaiveDate>,
    /// Model that produced this result.
    pub strategy: StrategyKind,
    /// Discount rate applied to projected cash flows. Always positive.
    pub discount_rate: f64,
    /// Beta used to derive the cost of equity.
    pub adjusted_beta: f64,
    /// Projection and fair value, absent when no cash-flow history exists.
    pub valuation: Option<DcfValuation>,
}

impl ValuationResult {
    /// Fair value per share, if a projection was possible.
    #[must_use]
    pub fn fair_value_per_share(&self) -> Option<f64> {
        self.valuation.as_ref().map(|v| v.fair_value_per_share)
    }

    /// Projected nominal cash flows, if a projection was possible.
    #[must_use]
    pub fn projected_cash_flows(&self) -> Option<&[f64]> {
        self.valuation
            .as_ref()
            .map(|v| v.projected_cash_flows.as_slice())
    }

    /// Returns the fair value or [`ValuationError::InsufficientHistory`].
    pub fn require_fair_value(&self) -> Result<f64> {
        self.fair_value_per_share()
            .ok_or_else(|| ValuationError::InsufficientHistory(self.symbol.clone()))
    }
}
