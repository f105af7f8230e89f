#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/valuation/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core traits and types for discounted-cash-flow valuation.
//!
//! This crate provides the foundational abstractions shared by the estimator,
//! projector and engine crates:
//!
//! - [`CompanyFinancialSnapshot`](types::CompanyFinancialSnapshot) - Company inputs for one run
//! - [`ValuationParameters`](params::ValuationParameters) - Caller-configurable assumptions
//! - [`ValuationResult`](result::ValuationResult) - Discount rate, beta and optional fair value
//! - [`IndustryBetaTable`](industry::IndustryBetaTable) - Process-wide industry betas
//! - [`ValuationStrategy`](strategy::ValuationStrategy) - Pluggable valuation model
//! - [`SnapshotSource`](source::SnapshotSource) / [`RiskFreeRateSource`](source::RiskFreeRateSource) - External collaborators

/// Error types for valuation operations.
pub mod error;
/// Industry beta lookup table.
pub mod industry;
/// Numeric safety helpers.
pub mod numeric;
/// Valuation parameters and their defaults.
pub mod params;
/// Valuation output types.
pub mod result;
/// Traits for external input collaborators.
pub mod source;
/// Valuation strategy trait.
pub mod strategy;
/// Core data types (Symbol, CompanyFinancialSnapshot).
pub mod types;

// Re-export commonly used items at crate root
pub use error::{Result, ValuationError};
pub use industry::{DEFAULT_INDUSTRY, IndustryBetaTable, industry_beta_lookup};
pub use params::ValuationParameters;
pub use result::{DcfValuation, StrategyKind, ValuationResult};
pub use source::{RiskFreeRateSource, SnapshotSource};
pub use strategy::ValuationStrategy;
pub use types::{CompanyFinancialSnapshot, Symbol};
