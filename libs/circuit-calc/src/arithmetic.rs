//! Checked arithmetic helpers

use crate::error::{CalcError, Result};

/// Divide `numerator` by `denominator`, failing on a zero denominator.
///
/// `context` becomes the `DivisionByZero` message. Both `0.0` and `-0.0`
/// count as zero.
pub fn checked_div(numerator: f64, denominator: f64, context: &str) -> Result<f64> {
    if denominator == 0.0 {
        return Err(CalcError::division_by_zero(context));
    }
    Ok(numerator / denominator)
}

/// Pass `value` through if it is finite, else fail with `InvalidInput(context)`.
///
/// Overflow (`1e308 + 1e308`) and NaN propagation end up here instead of
/// leaking out as a number JSON cannot carry.
pub fn ensure_finite(value: f64, context: &str) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::invalid_input(context))
    }
}

/// Sum of reciprocals `Σ 1/x`, failing as soon as one element is zero.
pub fn reciprocal_sum(values: &[f64], context: &str) -> Result<f64> {
    values
        .iter()
        .try_fold(0.0, |acc, &v| Ok(acc + checked_div(1.0, v, context)?))
}
