//! Error types for valuation operations.
//!
//! This module defines [`ValuationError`] which covers every failure the
//! estimators, projectors and their collaborators can report. Only
//! [`ValuationError::DegenerateRate`] and the parameter/share validation
//! errors escape a valuation run; the WACC estimator resolves
//! [`ValuationError::ComputationFailure`] locally with its fallback rate.

use thiserror::Error;

use crate::types::Symbol;

/// Errors that can occur during valuation operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValuationError {
    /// No free-cash-flow history is available to seed a projection.
    #[error("Insufficient cash-flow history for {0}")]
    InsufficientHistory(Symbol),

    /// The discount rate does not exceed the perpetual growth rate, so the
    /// terminal value would be infinite or negative.
    #[error(
        "Discount rate {discount_rate} must exceed long-term growth rate {long_term_growth}"
    )]
    DegenerateRate {
        /// Discount rate used for the projection.
        discount_rate: f64,
        /// Perpetual growth rate used for the terminal value.
        long_term_growth: f64,
    },

    /// Arithmetic produced a non-finite value.
    #[error("Computation failure: {0}")]
    ComputationFailure(String),

    /// An invalid parameter was provided.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Shares outstanding must be strictly positive.
    #[error("Invalid shares outstanding: {0}")]
    InvalidShares(f64),

    /// A snapshot source failed to supply company data.
    #[error("Snapshot source error from {source_name}: {message}")]
    Source {
        /// Name of the failing source.
        source_name: String,
        /// Description of the failure.
        message: String,
    },

    /// A risk-free rate source failed.
    #[error("Rate source error: {0}")]
    RateSource(String),

    /// The requested collaborator is not configured.
    #[error("Not configured: {0}")]
    NotConfigured(String),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Any other error.
    #[error("{0}")]
    Other(String),
}

impl ValuationError {
    /// Returns true for errors that are resolved locally by a documented
    /// default and never abort the caller's workflow.
    #[must_use]
    pub const fn is_soft(&self) -> bool {
        matches!(
            self,
            Self::InsufficientHistory(_) | Self::ComputationFailure(_)
        )
    }
}

impl From<serde_json::Error> for ValuationError {
    fn from(e: serde_json::Error) -> Self {
        Self::Config(e.to_string())
    }
}

/// Result type alias using [`ValuationError`].
pub type Result<T> = std::result::Result<T, ValuationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate_rate_message() {
        let err = ValuationError::DegenerateRate {
            discount_rate: 0.02,
            long_term_growth: 0.03,
        };
        let msg = err.to_string();
        assert!(msg.contains("0.02"));
        assert!(msg.contains("0.03"));
        assert!(!err.is_soft());
    }

    #[test]
    fn test_soft_errors() {
        assert!(ValuationError::InsufficientHistory(Symbol::new("aapl")).is_soft());
        assert!(ValuationError::ComputationFailure("nan".into()).is_soft());
        assert!(!ValuationError::InvalidShares(0.0).is_soft());
    }
}
