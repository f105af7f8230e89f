//! Quality scoring for the single-stage model.

use serde::{Deserialize, Serialize};
use valuation_core::CompanyFinancialSnapshot;

/// Thresholds for the four quality checks behind the margin of safety.
///
/// A missing metric is treated as zero, so it passes only the debt check.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityThresholds {
    /// Return on equity must exceed this.
    pub min_return_on_equity: f64,
    /// Current ratio must exceed this.
    pub min_current_ratio: f64,
    /// Debt-to-equity must stay below this.
    pub max_debt_to_equity: f64,
    /// Profit margin must exceed this.
    pub min_profit_margin: f64,
}

impl Default for QualityThresholds {
    fn default() -> Self {
        Self {
            min_return_on_equity: 0.15,
            min_current_ratio: 1.5,
            max_debt_to_equity: 1.0,
            min_profit_margin: 0.10,
        }
    }
}

impl QualityThresholds {
    /// Number of quality checks that hold, out of four.
    #[must_use]
    pub fn passed_checks(&self, snapshot: &CompanyFinancialSnapshot) -> u32 {
        let checks = [
            snapshot.return_on_equity.unwrap_or(0.0) > self.min_return_on_equity,
            snapshot.current_ratio.unwrap_or(0.0) > self.min_current_ratio,
            snapshot.debt_to_equity.unwrap_or(0.0) < self.max_debt_to_equity,
            snapshot.profit_margin.unwrap_or(0.0) > self.min_profit_margin,
        ];
        checks.iter().filter(|passed| **passed).count() as u32
    }

    /// Share of quality checks that hold, in `[0, 1]`.
    #[must_use]
    pub fn score(&self, snapshot: &CompanyFinancialSnapshot) -> f64 {
        f64::from(self.passed_checks(snapshot)) / 4.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use valuation_core::Symbol;

    #[test]
    fn test_missing_metrics_pass_debt_check_only() {
        let snapshot = CompanyFinancialSnapshot::new(Symbol::new("NEW"), 1.0);
        let thresholds = QualityThresholds::default();
        assert_eq!(thresholds.passed_checks(&snapshot), 1);
        assert_eq!(thresholds.score(&snapshot), 0.25);
    }

    #[test]
    fn test_strong_company_scores_one() {
        let mut snapshot = CompanyFinancialSnapshot::new(Symbol::new("GOOD"), 1.0);
        snapshot.return_on_equity = Some(0.22);
        snapshot.current_ratio = Some(2.1);
        snapshot.debt_to_equity = Some(0.4);
        snapshot.profit_margin = Some(0.18);
        assert_eq!(QualityThresholds::default().score(&snapshot), 1.0);
    }

    #[test]
    fn test_thresholds_are_strict() {
        let mut snapshot = CompanyFinancialSnapshot::new(Symbol::new("EDGE"), 1.0);
        snapshot.return_on_equity = Some(0.15);
        snapshot.current_ratio = Some(1.5);
        snapshot.debt_to_equity = Some(1.0);
        snapshot.profit_margin = Some(0.10);
        assert_eq!(QualityThresholds::default().passed_checks(&snapshot), 0);
    }

    #[test]
    fn test_custom_thresholds() {
        let mut snapshot = CompanyFinancialSnapshot::new(Symbol::new("BANK"), 1.0);
        snapshot.debt_to_equity = Some(4.0);
        snapshot.current_ratio = Some(1.1);
        let thresholds = QualityThresholds {
            max_debt_to_equity: 5.0,
            min_current_ratio: 1.0,
            ..Default::default()
        };
        assert_eq!(thresholds.passed_checks(&snapshot), 2);
    }
}
