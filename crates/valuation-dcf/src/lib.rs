#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/valuation/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Discounted-cash-flow projectors and valuation strategies.
//!
//! This crate provides two implementations of the
//! [`ValuationStrategy`](valuation_core::ValuationStrategy) trait:
//!
//! - [`MultiStageDcf`] - WACC discount rate, glide-path growth, ten-year default horizon
//! - [`SingleStageDcf`] - heuristic discount rate, five-year horizon, margin of safety
//!
//! # Example
//!
//! ```
//! use valuation_core::{CompanyFinancialSnapshot, Symbol, ValuationParameters};
//! use valuation_dcf::project_dcf;
//!
//! let snapshot = CompanyFinancialSnapshot::new(Symbol::new("ACME"), 50.0)
//!     .with_free_cash_flow_history(vec![100.0]);
//! let params = ValuationParameters::new().with_growth(0.10, 0.02);
//!
//! let valuation = project_dcf(&snapshot, &params, 0.10)?.expect("history is present");
//! assert_eq!(valuation.projected_cash_flows.len(), 10);
//! # Ok::<(), valuation_core::ValuationError>(())
//! ```

/// Multi-stage projector and strategy.
pub mod multi_stage;
/// Quality scoring for the single-stage model.
pub mod quality;
/// Single-stage projector and strategy.
pub mod single_stage;

pub use multi_stage::{MultiStageDcf, glide_path_growth, project_dcf};
pub use quality::QualityThresholds;
pub use single_stage::{SINGLE_STAGE_YEARS, SingleStageConfig, SingleStageDcf};
