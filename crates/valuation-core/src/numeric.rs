//! Numeric safety helpers shared by the estimators and projectors.

use crate::error::{Result, ValuationError};

/// Returns `value` unchanged if it is finite, otherwise a
/// [`ValuationError::ComputationFailure`] naming the quantity.
pub fn ensure_finite(label: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValuationError::ComputationFailure(format!(
            "{label} is not finite: {value}"
        )))
    }
}

/// Divides `numerator` by `denominator`, failing on a zero or non-finite result.
pub fn checked_div(label: &str, numerator: f64, denominator: f64) -> Result<f64> {
    if denominator == 0.0 {
        return Err(ValuationError::ComputationFailure(format!(
            "{label}: division by zero"
        )));
    }
    ensure_finite(label, numerator / denominator)
}

/// Present value of `amount` received `periods` years out at `rate`.
///
/// Horizons beyond `i32::MAX` saturate; callers cap the horizon well below it.
#[must_use]
pub fn present_value(amount: f64, rate: f64, periods: u32) -> f64 {
    let exponent = i32::try_from(periods).unwrap_or(i32::MAX);
    amount / (1.0 + rate).powi(exponent)
}

/// Gordon growth value, one period after the final cash flow.
///
/// Requires `discount_rate > growth` strictly.
pub fn perpetuity_value(final_cash_flow: f64, growth: f64, discount_rate: f64) -> Result<f64> {
    if discount_rate.is_nan() || growth.is_nan() || discount_rate <= growth {
        return Err(ValuationError::DegenerateRate {
            discount_rate,
            long_term_growth: growth,
        });
    }
    ensure_finite(
        "terminal value",
        final_cash_flow * (1.0 + growth) / (discount_rate - growth),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_finite() {
        assert_eq!(ensure_finite("x", 1.5).unwrap(), 1.5);
        assert!(ensure_finite("x", f64::NAN).is_err());
        assert!(ensure_finite("x", f64::INFINITY).is_err());
    }

    #[test]
    fn test_checked_div() {
        assert_eq!(checked_div("ratio", 6.0, 3.0).unwrap(), 2.0);
        assert!(matches!(
            checked_div("ratio", 1.0, 0.0),
            Err(ValuationError::ComputationFailure(_))
        ));
    }

    #[test]
    fn test_present_value() {
        let pv = present_value(121.0, 0.10, 2);
        assert!((pv - 100.0).abs() < 1e-9);
        assert_eq!(present_value(50.0, 0.25, 0), 50.0);
        assert_eq!(present_value(50.0, 0.25, u32::MAX), 0.0);
    }

    #[test]
    fn test_perpetuity_value() {
        let tv = perpetuity_value(100.0, 0.02, 0.10).unwrap();
        assert!((tv - 1275.0).abs() < 1e-9);

        let err = perpetuity_value(100.0, 0.03, 0.02).unwrap_err();
        assert_eq!(
            err,
            ValuationError::DegenerateRate {
                discount_rate: 0.02,
                long_term_growth: 0.03,
            }
        );
        assert!(perpetuity_value(100.0, 0.05, 0.05).is_err());
        assert!(perpetuity_value(100.0, 0.02, f64::NAN).is_err());
    }
}
