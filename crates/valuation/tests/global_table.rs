//! The process-wide industry beta table can be replaced once, before first use.

use valuation::{
    CompanyFinancialSnapshot, IndustryBetaTable, Symbol, ValuationError, estimate_wacc,
    industry_beta_lookup,
};

#[test]
fn test_install_global_table_once() {
    let table = IndustryBetaTable::from_json(
        r#"{"Semiconductors": 1.6, "Technology": 1.3, "Default": 0.95}"#,
    )
    .unwrap();
    IndustryBetaTable::install_global(table).unwrap();

    assert_eq!(industry_beta_lookup("Semiconductors"), 1.6);
    assert_eq!(industry_beta_lookup("Shipping"), 0.95);

    let snapshot = CompanyFinancialSnapshot::new(Symbol::new("CHIP"), 10.0)
        .with_beta(1.0)
        .with_industry("Semiconductors")
        .with_capital(1_000.0, 0.0, 0.0);
    let estimate = estimate_wacc(&snapshot, 0.03, 0.06);
    assert!((estimate.adjusted_beta - 1.3).abs() < 1e-12);

    let err = IndustryBetaTable::install_global(IndustryBetaTable::builtin()).unwrap_err();
    assert!(matches!(err, ValuationError::Config(_)));
    assert_eq!(industry_beta_lookup("Semiconductors"), 1.6);
}
