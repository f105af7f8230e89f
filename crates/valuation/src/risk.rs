//! Risk-factor classification.
//!
//! Buckets the quantitative risk factors of a snapshot (market, leverage,
//! liquidity and dividend risk) into [`RiskLevel`]s. Missing metrics
//! classify as [`RiskLevel::Unknown`] rather than being guessed.

use serde::{Deserialize, Serialize};
use std::fmt;

use valuation_core::{CompanyFinancialSnapshot, Symbol};

/// Severity of one risk factor, ordered from least to most severe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    /// The metric was not reported.
    Unknown,
    /// Low risk.
    Low,
    /// Moderate risk.
    Moderate,
    /// High risk.
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => write!(f, "unknown"),
            Self::Low => write!(f, "low"),
            Self::Moderate => write!(f, "moderate"),
            Self::High => write!(f, "high"),
        }
    }
}

/// Cut-offs separating low, moderate and high risk.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskThresholds {
    /// Beta above this is high market risk.
    pub high_beta: f64,
    /// Beta above this is moderate market risk.
    pub moderate_beta: f64,
    /// Debt-to-equity above this is high leverage risk.
    pub high_leverage: f64,
    /// Debt-to-equity above this is moderate leverage risk.
    pub moderate_leverage: f64,
    /// Current ratio below this is high liquidity risk.
    pub high_liquidity_below: f64,
    /// Current ratio below this is moderate liquidity risk.
    pub moderate_liquidity_below: f64,
    /// Payout ratio above this is high dividend risk.
    pub high_payout: f64,
    /// Payout ratio above this is moderate dividend risk.
    pub moderate_payout: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            high_beta: 1.5,
            moderate_beta: 1.0,
            high_leverage: 2.0,
            moderate_leverage: 1.0,
            high_liquidity_below: 1.0,
            moderate_liquidity_below: 2.0,
            high_payout: 0.8,
            moderate_payout: 0.5,
        }
    }
}

/// One classified metric.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RiskFactor {
    /// The metric, if reported.
    pub value: Option<f64>,
    /// Its classification.
    pub level: RiskLevel,
}

impl RiskFactor {
    pub(crate) fn above(value: Option<f64>, high: f64, moderate: f64) -> Self {
        let level = match value {
            None => RiskLevel::Unknown,
            Some(v) if v > high => RiskLevel::High,
            Some(v) if v > moderate => RiskLevel::Moderate,
            Some(_) => RiskLevel::Low,
        };
        Self { value, level }
    }

    fn below(value: Option<f64>, high: f64, moderate: f64) -> Self {
        let level = match value {
            None => RiskLevel::Unknown,
            Some(v) if v < high => RiskLevel::High,
            Some(v) if v < moderate => RiskLevel::Moderate,
            Some(_) => RiskLevel::Low,
        };
        Self { value, level }
    }
}

/// Risk profile of one company.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Stock symbol.
    pub symbol: Symbol,
    /// Volatility relative to the market, by beta.
    pub market: RiskFactor,
    /// Financial leverage, by debt-to-equity.
    pub leverage: RiskFactor,
    /// Short-term liquidity, by current ratio.
    pub liquidity: RiskFactor,
    /// Dividend sustainability, by payout ratio.
    pub dividend: RiskFactor,
}

impl RiskAssessment {
    /// The most severe classified level, or `Unknown` if nothing was reported.
    #[must_use]
    pub fn highest(&self) -> RiskLevel {
        [self.market, self.leverage, self.liquidity, self.dividend]
            .iter()
            .map(|f| f.level)
            .max()
            .unwrap_or(RiskLevel::Unknown)
    }
}

/// Classify the risk factors of `snapshot`.
#[must_use]
pub fn assess_risk(snapshot: &CompanyFinancialSnapshot, thresholds: &RiskThresholds) -> RiskAssessment {
    RiskAssessment {
        symbol: snapshot.symbol.clone(),
        market: RiskFactor::above(snapshot.beta, thresholds.high_beta, thresholds.moderate_beta),
        leverage: RiskFactor::above(
            snapshot.debt_to_equity,
            thresholds.high_leverage,
            thresholds.moderate_leverage,
        ),
        liquidity: RiskFactor::below(
            snapshot.current_ratio,
            thresholds.high_liquidity_below,
            thresholds.moderate_liquidity_below,
        ),
        dividend: RiskFactor::above(
            snapshot.payout_ratio,
            thresholds.high_payout,
            thresholds.moderate_payout,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        let mut snapshot = CompanyFinancialSnapshot::new(Symbol::new("RISK"), 1.0).with_beta(1.7);
        snapshot.debt_to_equity = Some(1.4);
        snapshot.current_ratio = Some(2.5);
        snapshot.payout_ratio = Some(0.3);

        let assessment = assess_risk(&snapshot, &RiskThresholds::default());
        assert_eq!(assessment.market.level, RiskLevel::High);
        assert_eq!(assessment.leverage.level, RiskLevel::Moderate);
        assert_eq!(assessment.liquidity.level, RiskLevel::Low);
        assert_eq!(assessment.dividend.level, RiskLevel::Low);
        assert_eq!(assessment.highest(), RiskLevel::High);
    }

    #[test]
    fn test_missing_metrics_are_unknown() {
        let snapshot = CompanyFinancialSnapshot::new(Symbol::new("NONE"), 1.0);
        let assessment = assess_risk(&snapshot, &RiskThresholds::default());

        assert_eq!(assessment.market.level, RiskLevel::Unknown);
        assert!(assessment.market.value.is_none());
        assert_eq!(assessment.highest(), RiskLevel::Unknown);
    }

    #[test]
    fn test_liquidity_bands() {
        let mut snapshot = CompanyFinancialSnapshot::new(Symbol::new("CASH"), 1.0);
        let thresholds = RiskThresholds::default();

        snapshot.current_ratio = Some(0.8);
        assert_eq!(assess_risk(&snapshot, &thresholds).liquidity.level, RiskLevel::High);
        snapshot.current_ratio = Some(1.5);
        assert_eq!(
            assess_risk(&snapshot, &thresholds).liquidity.level,
            RiskLevel::Moderate
        );
        snapshot.current_ratio = Some(2.0);
        assert_eq!(assess_risk(&snapshot, &thresholds).liquidity.level, RiskLevel::Low);
    }

    #[test]
    fn test_level_display() {
        assert_eq!(RiskLevel::Moderate.to_string(), "moderate");
        assert!(RiskLevel::High > RiskLevel::Low);
    }
}
