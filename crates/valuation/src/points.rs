//! Eight-point valuation summary.
//!
//! Lays the headline metrics of a snapshot side by side with their benchmarks:
//! multiples against industry averages, leverage and margin bands, growth,
//! cash-flow quality, returns and liquidity. Missing metrics stay `None` and
//! classify as `Unknown`.

use serde::{Deserialize, Serialize};
use std::fmt;

use valuation_core::{CompanyFinancialSnapshot, Symbol};

use crate::risk::{RiskFactor, RiskLevel};

/// Benchmarks and band cut-offs for the valuation points.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointThresholds {
    /// Industry average price-to-earnings ratio.
    pub industry_pe: f64,
    /// Industry average price-to-book ratio.
    pub industry_pb: f64,
    /// Debt-to-equity above this is high risk.
    pub high_leverage: f64,
    /// Debt-to-equity above this is moderate risk.
    pub moderate_leverage: f64,
    /// Profit margin above this is strong.
    pub strong_margin: f64,
    /// Profit margin above this is average.
    pub average_margin: f64,
}

impl Default for PointThresholds {
    fn default() -> Self {
        Self {
            industry_pe: 20.0,
            industry_pb: 2.5,
            high_leverage: 2.0,
            moderate_leverage: 1.0,
            strong_margin: 0.2,
            average_margin: 0.1,
        }
    }
}

/// Position of a multiple relative to its industry average.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Comparison {
    /// The multiple was not reported.
    Unknown,
    /// Cheaper than the industry.
    Below,
    /// Equal to the industry average.
    InLine,
    /// Richer than the industry.
    Above,
}

/// A multiple and the industry average it is compared with.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Benchmark {
    /// The multiple, if reported.
    pub value: Option<f64>,
    /// Industry average.
    pub industry_average: f64,
    /// Where the multiple sits.
    pub comparison: Comparison,
}

impl Benchmark {
    fn new(value: Option<f64>, industry_average: f64) -> Self {
        let comparison = match value {
            None => Comparison::Unknown,
            Some(v) if v < industry_average => Comparison::Below,
            Some(v) if v > industry_average => Comparison::Above,
            Some(_) => Comparison::InLine,
        };
        Self {
            value,
            industry_average,
            comparison,
        }
    }
}

/// Profitability band of the net profit margin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MarginLevel {
    /// The margin was not reported.
    Unknown,
    /// At or below the average cut-off.
    Weak,
    /// Above the average cut-off.
    Average,
    /// Above the strong cut-off.
    Strong,
}

impl fmt::Display for MarginLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => write!(f, "Unknown"),
            Self::Weak => write!(f, "Weak"),
            Self::Average => write!(f, "Average"),
            Self::Strong => write!(f, "Strong"),
        }
    }
}

/// Net profit margin and its band.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarginFactor {
    /// The margin, if reported.
    pub value: Option<f64>,
    /// Its band.
    pub level: MarginLevel,
}

impl MarginFactor {
    fn new(value: Option<f64>, strong: f64, average: f64) -> Self {
        let level = match value {
            None => MarginLevel::Unknown,
            Some(v) if v > strong => MarginLevel::Strong,
            Some(v) if v > average => MarginLevel::Average,
            Some(_) => MarginLevel::Weak,
        };
        Self { value, level }
    }
}

/// The eight valuation points of one company.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValuationPoints {
    /// Stock symbol.
    pub symbol: Symbol,
    /// Trailing P/E against the industry average.
    pub price_to_earnings: Benchmark,
    /// P/B against the industry average.
    pub price_to_book: Benchmark,
    /// Debt-to-equity risk band.
    pub debt: RiskFactor,
    /// Net profit margin band.
    pub profit_margin: MarginFactor,
    /// Revenue growth rate.
    pub revenue_growth: Option<f64>,
    /// Earnings growth rate.
    pub earnings_growth: Option<f64>,
    /// Operating cash flow.
    pub operating_cash_flow: Option<f64>,
    /// Net income.
    pub net_income: Option<f64>,
    /// Return on equity.
    pub return_on_equity: Option<f64>,
    /// Return on assets.
    pub return_on_assets: Option<f64>,
    /// Current ratio.
    pub current_ratio: Option<f64>,
    /// Quick ratio.
    pub quick_ratio: Option<f64>,
}

impl ValuationPoints {
    /// Operating cash flow per unit of net income.
    ///
    /// `None` unless both are reported and net income is positive.
    #[must_use]
    pub fn cash_conversion(&self) -> Option<f64> {
        match (self.operating_cash_flow, self.net_income) {
            (Some(ocf), Some(ni)) if ni > 0.0 => Some(ocf / ni),
            _ => None,
        }
    }
}

/// Build the valuation points of `snapshot`.
#[must_use]
pub fn valuation_points(
    snapshot: &CompanyFinancialSnapshot,
    thresholds: &PointThresholds,
) -> ValuationPoints {
    ValuationPoints {
        symbol: snapshot.symbol.clone(),
        price_to_earnings: Benchmark::new(snapshot.trailing_pe, thresholds.industry_pe),
        price_to_book: Benchmark::new(snapshot.price_to_book, thresholds.industry_pb),
        debt: RiskFactor::above(
            snapshot.debt_to_equity,
            thresholds.high_leverage,
            thresholds.moderate_leverage,
        ),
        profit_margin: MarginFactor::new(
            snapshot.profit_margin,
            thresholds.strong_margin,
            thresholds.average_margin,
        ),
        revenue_growth: snapshot.revenue_growth,
        earnings_growth: snapshot.earnings_growth,
        operating_cash_flow: snapshot.operating_cash_flow,
        net_income: snapshot.net_income,
        return_on_equity: snapshot.return_on_equity,
        return_on_assets: snapshot.return_on_assets,
        current_ratio: snapshot.current_ratio,
        quick_ratio: snapshot.quick_ratio,
    }
}

/// Format a currency amount with a B/M suffix.
#[must_use]
pub fn format_currency(value: f64) -> String {
    if value.abs() >= 1e9 {
        format!("${:.1}B", value / 1e9)
    } else if value.abs() >= 1e6 {
        format!("${:.1}M", value / 1e6)
    } else {
        format!("${value:.2}")
    }
}

fn ratio(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.2}"))
}

fn percent(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{:.1}%", v * 100.0))
}

fn currency(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), format_currency)
}

impl fmt::Display for ValuationPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let leverage = match self.debt.level {
            RiskLevel::Unknown => String::new(),
            RiskLevel::Low => " (Low Risk)".to_string(),
            RiskLevel::Moderate => " (Moderate Risk)".to_string(),
            RiskLevel::High => " (High Risk)".to_string(),
        };
        let margin = match self.profit_margin.level {
            MarginLevel::Unknown => String::new(),
            level => format!(" ({level})"),
        };

        writeln!(
            f,
            "1. Price to Earnings: P/E ratio is {} vs industry average of {}",
            ratio(self.price_to_earnings.value),
            self.price_to_earnings.industry_average
        )?;
        writeln!(
            f,
            "2. Price to Book: P/B ratio is {} vs industry average of {}",
            ratio(self.price_to_book.value),
            self.price_to_book.industry_average
        )?;
        writeln!(
            f,
            "3. Debt Levels: Debt to Equity ratio is {}{leverage}",
            ratio(self.debt.value)
        )?;
        writeln!(
            f,
            "4. Profit Margins: Net profit margin is {}{margin}",
            percent(self.profit_margin.value)
        )?;
        writeln!(
            f,
            "5. Growth Metrics: Revenue growth: {}, Earnings growth: {}",
            percent(self.revenue_growth),
            percent(self.earnings_growth)
        )?;
        writeln!(
            f,
            "6. Cash Flow Quality: Operating cash flow is {} vs Net Income of {}",
            currency(self.operating_cash_flow),
            currency(self.net_income)
        )?;
        writeln!(
            f,
            "7. Returns: ROE: {}, ROA: {}",
            percent(self.return_on_equity),
            percent(self.return_on_assets)
        )?;
        write!(
            f,
            "8. Financial Health: Current Ratio: {}, Quick Ratio: {}",
            ratio(self.current_ratio),
            ratio(self.quick_ratio)
        )
    }
}
