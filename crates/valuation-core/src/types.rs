//! Core data types for valuation inputs.
//!
//! This module defines the fundamental input structures:
//!
//! - [`Symbol`] - Trading symbol/ticker
//! - [`CompanyFinancialSnapshot`] - Company financial facts for one valuation run

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::industry::DEFAULT_INDUSTRY;

/// A trading symbol/ticker.
///
/// Symbols are automatically uppercased on creation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol(String);

impl Symbol {
    /// Creates a new symbol from a string, converting to uppercase.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into().to_uppercase())
    }

    /// Returns the symbol as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Symbol {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// Beta assumed when the company's own beta is not reported.
pub const DEFAULT_BETA: f64 = 1.0;

/// Interest expense assumed when the latest period does not report one.
pub const DEFAULT_INTEREST_EXPENSE: f64 = 0.0;

/// Effective tax rate assumed when none is reported.
pub const DEFAULT_EFFECTIVE_TAX_RATE: f64 = 0.21;

/// Company financial facts consumed by one valuation run.
///
/// Built by an external data-access layer and treated as immutable for the
/// duration of the run. Optional fields resolve through the `*_or_default`
/// accessors, each backed by a named constant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompanyFinancialSnapshot {
    /// Stock symbol.
    pub symbol: Symbol,
    /// Date the facts were observed.
    pub as_of: Option<NaiveDate>,
    /// Company beta coefficient.
    pub beta: Option<f64>,
    /// Industry classification key for the beta table.
    pub industry: String,
    /// Total debt.
    pub total_debt: f64,
    /// Cash and short-term investments.
    pub total_cash: f64,
    /// Market capitalization.
    pub market_cap: f64,
    /// Interest expense of the most recent period.
    pub interest_expense: Option<f64>,
    /// Effective tax rate in `[0, 1]`.
    pub effective_tax_rate: Option<f64>,
    /// Shares outstanding. Valuation is undefined unless this is positive.
    pub shares_outstanding: f64,
    /// Free cash flow per period, most recent first.
    pub free_cash_flow_history: Vec<f64>,

    // Quality metrics used by the single-stage model and risk assessment
    /// Operating cash flow.
    pub operating_cash_flow: Option<f64>,
    /// Trailing earnings growth rate.
    pub earnings_growth: Option<f64>,
    /// Net profit margin.
    pub profit_margin: Option<f64>,
    /// Debt-to-equity ratio.
    pub debt_to_equity: Option<f64>,
    /// Return on equity.
    pub return_on_equity: Option<f64>,
    /// Current ratio.
    pub current_ratio: Option<f64>,
    /// Dividend payout ratio.
    pub payout_ratio: Option<f64>,

    // Market multiples and secondary metrics for the valuation points
    /// Trailing price-to-earnings ratio.
    pub trailing_pe: Option<f64>,
    /// Price-to-book ratio.
    pub price_to_book: Option<f64>,
    /// Trailing revenue growth rate.
    pub revenue_growth: Option<f64>,
    /// Net income of the most recent period.
    pub net_income: Option<f64>,
    /// Return on assets.
    pub return_on_assets: Option<f64>,
    /// Quick ratio.
    pub quick_ratio: Option<f64>,
}

impl Default for CompanyFinancialSnapshot {
    fn default() -> Self {
        Self {
            symbol: Symbol::default(),
            as_of: None,
            beta: None,
            industry: DEFAULT_INDUSTRY.to_string(),
            total_debt: 0.0,
            total_cash: 0.0,
            market_cap: 0.0,
            interest_expense: None,
            effective_tax_rate: None,
            shares_outstanding: 0.0,
            free_cash_flow_history: Vec::new(),
            operating_cash_flow: None,
            earnings_growth: None,
            profit_margin: None,
            debt_to_equity: None,
            return_on_equity: None,
            current_ratio: None,
            payout_ratio: None,
            trailing_pe: None,
            price_to_book: None,
            revenue_growth: None,
            net_income: None,
            return_on_assets: None,
            quick_ratio: None,
        }
    }
}

impl CompanyFinancialSnapshot {
    /// Creates a snapshot with required fields; everything else is absent.
    #[must_use]
    pub fn new(symbol: Symbol, shares_outstanding: f64) -> Self {
        Self {
            symbol,
            shares_outstanding,
            ..Default::default()
        }
    }

    /// Sets the company beta.
    #[must_use]
    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = Some(beta);
        self
    }

    /// Sets the industry classification key.
    #[must_use]
    pub fn with_industry(mut self, industry: impl Into<String>) -> Self {
        self.industry = industry.into();
        self
    }

    /// Sets the capital structure: market cap, total debt and total cash.
    #[must_use]
    pub fn with_capital(mut self, market_cap: f64, total_debt: f64, total_cash: f64) -> Self {
        self.market_cap = market_cap;
        self.total_debt = total_debt;
        self.total_cash = total_cash;
        self
    }

    /// Sets the most recent interest expense.
    #[must_use]
    pub fn with_interest_expense(mut self, interest_expense: f64) -> Self {
        self.interest_expense = Some(interest_expense);
        self
    }

    /// Sets the effective tax rate.
    #[must_use]
    pub fn with_effective_tax_rate(mut self, rate: f64) -> Self {
        self.effective_tax_rate = Some(rate);
        self
    }

    /// Sets the free-cash-flow history, most recent first.
    #[must_use]
    pub fn with_free_cash_flow_history(mut self, history: Vec<f64>) -> Self {
        self.free_cash_flow_history = history;
        self
    }

    /// Sets the observation date.
    #[must_use]
    pub fn with_as_of(mut self, as_of: NaiveDate) -> Self {
        self.as_of = Some(as_of);
        self
    }

    /// Company beta, or [`DEFAULT_BETA`] when not reported.
    #[must_use]
    pub fn beta_or_default(&self) -> f64 {
        self.beta.unwrap_or(DEFAULT_BETA)
    }

    /// Interest expense, or [`DEFAULT_INTEREST_EXPENSE`] when not reported.
    #[must_use]
    pub fn interest_expense_or_default(&self) -> f64 {
        self.interest_expense.unwrap_or(DEFAULT_INTEREST_EXPENSE)
    }

    /// Effective tax rate, or [`DEFAULT_EFFECTIVE_TAX_RATE`] when not reported.
    #[must_use]
    pub fn effective_tax_rate_or_default(&self) -> f64 {
        self.effective_tax_rate.unwrap_or(DEFAULT_EFFECTIVE_TAX_RATE)
    }

    /// Most recent free cash flow, if any history is present.
    #[must_use]
    pub fn latest_free_cash_flow(&self) -> Option<f64> {
        self.free_cash_flow_history.first().copied()
    }

    /// Total debt less total cash.
    #[must_use]
    pub fn net_debt(&self) -> f64 {
        self.total_debt - self.total_cash
    }
}
