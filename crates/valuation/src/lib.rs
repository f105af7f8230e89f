#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/valuation/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Discounted-cash-flow fair value and WACC estimation.
//!
//! This crate re-exports the core types, the WACC estimator, both DCF
//! strategies and the rate sources, and provides a [`ValuationEngine`] that
//! wires snapshot sources, a risk-free rate source and a strategy together.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use valuation::{FixedRateSource, Symbol, ValuationEngine};
//!
//! #[tokio::main]
//! async fn main() -> valuation::Result<()> {
//!     let engine = ValuationEngine::multi_stage()
//!         .with_snapshot_source(Arc::new(MyMarketData::new()))
//!         .with_rate_source(FixedRateSource::new(0.042));
//!
//!     let result = engine.value_symbol(&Symbol::new("AAPL")).await?;
//!     println!("{:?}", result.fair_value_per_share());
//!
//!     Ok(())
//! }
//! ```

// Core types and traits
pub use valuation_core::*;

// Estimators and strategies
pub use valuation_dcf::{
    MultiStageDcf, QualityThresholds, SINGLE_STAGE_YEARS, SingleStageConfig, SingleStageDcf,
    glide_path_growth, project_dcf,
};
pub use valuation_wacc::{
    WaccComponents, WaccEstimate, WaccFallback, capital_weights, cost_of_debt, estimate_wacc,
    estimate_wacc_with_table,
};

// Rate sources
pub use valuation_rates::{CachedRateSource, FallbackRateSource, FixedRateSource};

mod engine;
pub use engine::ValuationEngine;

/// Risk-factor classification.
pub mod risk;
pub use risk::{RiskAssessment, RiskFactor, RiskLevel, RiskThresholds, assess_risk};

/// Eight-point valuation summary.
pub mod points;
pub use points::{
    Benchmark, Comparison, MarginFactor, MarginLevel, PointThresholds, ValuationPoints,
    format_currency, valuation_points,
};
