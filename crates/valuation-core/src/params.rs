//! Valuation parameters and their defaults.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ValuationError};

/// Risk-free rate used when no benchmark yield is available.
pub const DEFAULT_RISK_FREE_RATE: f64 = 0.03;

/// Default equity market risk premium.
pub const DEFAULT_MARKET_RISK_PREMIUM: f64 = 0.06;

/// Default short-term growth rate.
pub const DEFAULT_SHORT_TERM_GROWTH: f64 = 0.10;

/// Default long-term (perpetual) growth rate.
pub const DEFAULT_LONG_TERM_GROWTH: f64 = 0.025;

/// Default number of constant-growth projection years.
pub const DEFAULT_PROJECTION_YEARS_SHORT: u32 = 5;

/// Default total number of projection years.
pub const DEFAULT_PROJECTION_YEARS_TOTAL: u32 = 10;

/// Longest accepted projection horizon in years.
pub const MAX_PROJECTION_YEARS: u32 = 100;

/// Caller-configurable valuation assumptions.
///
/// Deserializes with per-field defaults, so a partial JSON object is enough.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValuationParameters {
    /// Annualized risk-free rate.
    pub risk_free_rate: f64,
    /// Equity market risk premium.
    pub market_risk_premium: f64,
    /// Annual growth during the constant-growth stage.
    pub short_term_growth_rate: f64,
    /// Perpetual growth reached at the end of the glide path.
    pub long_term_growth_rate: f64,
    /// Years of constant short-term growth.
    pub projection_years_short: u32,
    /// Total projection horizon in years.
    pub projection_years_total: u32,
}

impl Default for ValuationParameters {
    fn default() -> Self {
        Self {
            risk_free_rate: DEFAULT_RISK_FREE_RATE,
            market_risk_premium: DEFAULT_MARKET_RISK_PREMIUM,
            short_term_growth_rate: DEFAULT_SHORT_TERM_GROWTH,
            long_term_growth_rate: DEFAULT_LONG_TERM_GROWTH,
            projection_years_short: DEFAULT_PROJECTION_YEARS_SHORT,
            projection_years_total: DEFAULT_PROJECTION_YEARS_TOTAL,
        }
    }
}

impl ValuationParameters {
    /// Creates parameters with all defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses parameters from JSON, filling missing fields with defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let params: Self = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    /// Sets the risk-free rate.
    #[must_use]
    pub const fn with_risk_free_rate(mut self, rate: f64) -> Self {
        self.risk_free_rate = rate;
        self
    }

    /// Sets the market risk premium.
    #[must_use]
    pub const fn with_market_risk_premium(mut self, premium: f64) -> Self {
        self.market_risk_premium = premium;
        self
    }

    /// Sets the short- and long-term growth rates.
    #[must_use]
    pub const fn with_growth(mut self, short_term: f64, long_term: f64) -> Self {
        self.short_term_growth_rate = short_term;
        self.long_term_growth_rate = long_term;
        self
    }

    /// Sets the projection horizon.
    #[must_use]
    pub const fn with_horizon(mut self, years_short: u32, years_total: u32) -> Self {
        self.projection_years_short = years_short;
        self.projection_years_total = years_total;
        self
    }

    /// Checks the horizon invariant, the horizon cap and that every rate is finite.
    pub fn validate(&self) -> Result<()> {
        if self.projection_years_short == 0
            || self.projection_years_short >= self.projection_years_total
        {
            return Err(ValuationError::InvalidParameter(format!(
                "projection years must satisfy 0 < short ({}) < total ({})",
                self.projection_years_short, self.projection_years_total
            )));
        }

        if self.projection_years_total > MAX_PROJECTION_YEARS {
            return Err(ValuationError::InvalidParameter(format!(
                "projection horizon of {} years exceeds {MAX_PROJECTION_YEARS}",
                self.projection_years_total
            )));
        }

        for (name, value) in [
            ("risk_free_rate", self.risk_free_rate),
            ("market_risk_premium", self.market_risk_premium),
            ("short_term_growth_rate", self.short_term_growth_rate),
            ("long_term_growth_rate", self.long_term_growth_rate),
        ] {
            if !value.is_finite() {
                return Err(ValuationError::InvalidParameter(format!(
                    "{name} is not finite: {value}"
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = ValuationParameters::default();
        assert_eq!(params.risk_free_rate, 0.03);
        assert_eq!(params.market_risk_premium, 0.06);
        assert_eq!(params.projection_years_short, 5);
        assert_eq!(params.projection_years_total, 10);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_horizon_validation() {
        let bad = [(0, 10), (10, 10), (7, 5)];
        for (short, total) in bad {
            let params = ValuationParameters::new().with_horizon(short, total);
            assert!(matches!(
                params.validate(),
                Err(ValuationError::InvalidParameter(_))
            ));
        }
        assert!(ValuationParameters::new().with_horizon(1, 2).validate().is_ok());
    }

    #[test]
    fn test_horizon_cap() {
        let params = ValuationParameters::new().with_horizon(5, MAX_PROJECTION_YEARS);
        assert!(params.validate().is_ok());

        let params = ValuationParameters::new().with_horizon(5, MAX_PROJECTION_YEARS + 1);
        assert!(matches!(
            params.validate(),
            Err(ValuationError::InvalidParameter(_))
        ));

        let err = ValuationParameters::from_json(r#"{"projection_years_total": 4000000000}"#)
            .unwrap_err();
        assert!(matches!(err, ValuationError::InvalidParameter(_)));
    }

    #[test]
    fn test_non_finite_rate_rejected() {
        let params = ValuationParameters::new().with_growth(f64::NAN, 0.02);
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_partial_json() {
        let params =
            ValuationParameters::from_json(r#"{"risk_free_rate": 0.045, "projection_years_total": 12}"#)
                .unwrap();
        assert_eq!(params.risk_free_rate, 0.045);
        assert_eq!(params.projection_years_total, 12);
        assert_eq!(params.market_risk_premium, DEFAULT_MARKET_RISK_PREMIUM);

        assert!(ValuationParameters::from_json(r#"{"projection_years_short": 0}"#).is_err());
    }
}
