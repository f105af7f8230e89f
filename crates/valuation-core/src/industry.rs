//! Industry beta lookup table.
//!
//! The table maps sector names to an average beta and always carries a
//! [`DEFAULT_INDUSTRY`] entry used for unknown keys. One process-wide instance
//! is created lazily from the built-in values, or installed once at startup
//! with [`IndustryBetaTable::install_global`], and is read-only afterwards.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;

use crate::error::{Result, ValuationError};

/// Key of the entry used when an industry is absent or unrecognized.
pub const DEFAULT_INDUSTRY: &str = "Default";

const BUILTIN_BETAS: &[(&str, f64)] = &[
    ("Technology", 1.25),
    ("Financial Services", 1.15),
    ("Healthcare", 0.95),
    ("Consumer Goods", 0.85),
    ("Industrials", 1.05),
    ("Energy", 1.10),
    ("Utilities", 0.75),
    (DEFAULT_INDUSTRY, 1.0),
];

static GLOBAL_TABLE: OnceLock<IndustryBetaTable> = OnceLock::new();

/// Mapping from industry name to an average beta coefficient.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "HashMap<String, f64>", into = "HashMap<String, f64>")]
pub struct IndustryBetaTable {
    betas: HashMap<String, f64>,
    default_beta: f64,
}

impl IndustryBetaTable {
    /// Creates a table from industry/beta pairs.
    ///
    /// Fails unless the pairs contain a finite [`DEFAULT_INDUSTRY`] entry.
    pub fn new<I, K>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        let betas: HashMap<String, f64> = entries.into_iter().map(|(k, v)| (k.into(), v)).collect();

        if let Some((industry, beta)) = betas.iter().find(|(_, b)| !b.is_finite()) {
            return Err(ValuationError::Config(format!(
                "beta for industry '{industry}' is not finite: {beta}"
            )));
        }

        let default_beta = *betas.get(DEFAULT_INDUSTRY).ok_or_else(|| {
            ValuationError::Config(format!(
                "industry beta table requires a '{DEFAULT_INDUSTRY}' entry"
            ))
        })?;

        Ok(Self {
            betas,
            default_beta,
        })
    }

    /// Parses a table from a JSON object of `{ "industry": beta }` pairs.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: HashMap<String, f64> = serde_json::from_str(json)?;
        Self::new(raw)
    }

    /// Returns the built-in table.
    #[must_use]
    pub fn builtin() -> Self {
        let betas: HashMap<String, f64> = BUILTIN_BETAS
            .iter()
            .map(|(k, v)| ((*k).to_string(), *v))
            .collect();
        Self {
            betas,
            default_beta: 1.0,
        }
    }

    /// Returns the process-wide table, initializing it with the built-in
    /// values on first use.
    pub fn global() -> &'static Self {
        GLOBAL_TABLE.get_or_init(Self::builtin)
    }

    /// Installs `table` as the process-wide table.
    ///
    /// Must run before the first lookup; fails once the global table exists.
    pub fn install_global(table: Self) -> Result<()> {
        GLOBAL_TABLE.set(table).map_err(|_| {
            ValuationError::Config("industry beta table already initialized".to_string())
        })
    }

    /// Looks up the beta for `industry`, falling back to the default entry.
    #[must_use]
    pub fn lookup(&self, industry: &str) -> f64 {
        self.betas.get(industry).copied().unwrap_or(self.default_beta)
    }

    /// Returns the default entry's beta.
    #[must_use]
    pub const fn default_beta(&self) -> f64 {
        self.default_beta
    }

    /// Returns true if `industry` has an explicit entry.
    #[must_use]
    pub fn contains(&self, industry: &str) -> bool {
        self.betas.contains_key(industry)
    }

    /// Returns the number of entries, including the default.
    #[must_use]
    pub fn len(&self) -> usize {
        self.betas.len()
    }

    /// Returns true if the table has no entries. Never true for a valid table.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.betas.is_empty()
    }
}

impl Default for IndustryBetaTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TryFrom<HashMap<String, f64>> for IndustryBetaTable {
    type Error = ValuationError;

    fn try_from(betas: HashMap<String, f64>) -> Result<Self> {
        Self::new(betas)
    }
}

impl From<IndustryBetaTable> for HashMap<String, f64> {
    fn from(table: IndustryBetaTable) -> Self {
        table.betas
    }
}

/// Looks up an industry beta in the process-wide table.
///
/// Never fails: unknown keys resolve to the default entry.
#[must_use]
pub fn industry_beta_lookup(industry: &str) -> f64 {
    IndustryBetaTable::global().lookup(industry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_entries() {
        let table = IndustryBetaTable::builtin();
        assert_eq!(table.lookup("Technology"), 1.25);
        assert_eq!(table.lookup("Utilities"), 0.75);
        assert_eq!(table.lookup(DEFAULT_INDUSTRY), 1.0);
        assert_eq!(table.len(), 8);
    }

    #[test]
    fn test_unknown_industry_uses_default() {
        let table = IndustryBetaTable::builtin();
        for key in ["", "Aerospace", "technology", "Biotech & Pharma"] {
            assert_eq!(table.lookup(key), table.default_beta());
        }
        assert_eq!(industry_beta_lookup("Not An Industry"), 1.0);
    }

    #[test]
    fn test_from_json_requires_default() {
        let err = IndustryBetaTable::from_json(r#"{"Technology": 1.3}"#).unwrap_err();
        assert!(matches!(err, ValuationError::Config(_)));

        let table =
            IndustryBetaTable::from_json(r#"{"Technology": 1.3, "Default": 0.9}"#).unwrap();
        assert_eq!(table.lookup("Technology"), 1.3);
        assert_eq!(table.lookup("Mining"), 0.9);
    }

    #[test]
    fn test_rejects_non_finite_beta() {
        let err = IndustryBetaTable::new([("Default", 1.0), ("Energy", f64::NAN)]).unwrap_err();
        assert!(matches!(err, ValuationError::Config(_)));
    }
}
