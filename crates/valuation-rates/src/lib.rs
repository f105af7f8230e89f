#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/valuation/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Risk-free rate sources with fallback and caching.
//!
//! This crate provides implementations of the [`RiskFreeRateSource`] trait from
//! `valuation-core`:
//!
//! - [`FixedRateSource`] - Constant rate
//! - [`FallbackRateSource`] - Resolves fetch failures to a fallback rate
//! - [`CachedRateSource`] - TTL cache in front of another source
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use valuation_core::RiskFreeRateSource;
//! use valuation_rates::{CachedRateSource, FallbackRateSource, FixedRateSource};
//!
//! # async fn example() -> valuation_core::Result<()> {
//! let source = FallbackRateSource::new(CachedRateSource::new(
//!     FixedRateSource::new(0.042),
//!     Duration::from_secs(3600),
//! ));
//! let rate = source.fetch_rate().await?;
//! assert_eq!(rate, 0.042);
//! # Ok(())
//! # }
//! ```

/// TTL-cached rate source.
pub mod cached;
/// Fallback rate source.
pub mod fallback;
/// Constant rate source.
pub mod fixed;

// Re-export the trait for convenience
pub use valuation_core::RiskFreeRateSource;

pub use cached::CachedRateSource;
pub use fallback::FallbackRateSource;
pub use fixed::FixedRateSource;
