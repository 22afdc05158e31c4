//! Equivalent resistance of series and parallel resistor networks

use tracing::debug;

use crate::arithmetic::{checked_div, ensure_finite, reciprocal_sum};
use crate::error::{
    CalcError, Result, EMPTY_RESISTANCE_LIST, NON_FINITE_RESULT, RESISTANCE_DIVISION_BY_ZERO,
};
use crate::topology::{Topology, TopologyPolicy};

/// Compute the equivalent resistance of `values` wired as `topology`.
///
/// Series: `Σ r`. Parallel: `1 / Σ(1/r)`.
///
/// # Errors
/// * `InvalidInput` when `values` is empty
/// * `DivisionByZero` when a parallel element is zero or the reciprocals cancel out
/// * `InvalidInput` when the result overflows or is NaN
pub fn equivalent_resistance(values: &[f64], topology: Topology) -> Result<f64> {
    if values.is_empty() {
        return Err(CalcError::invalid_input(EMPTY_RESISTANCE_LIST));
    }

    let result = match topology {
        Topology::Series => values.iter().sum(),
        Topology::Parallel => {
            let reciprocals = reciprocal_sum(values, RESISTANCE_DIVISION_BY_ZERO)?;
            checked_div(1.0, reciprocals, RESISTANCE_DIVISION_BY_ZERO)?
        },
    };
    let result = ensure_finite(result, NON_FINITE_RESULT)?;

    debug!(
        topology = %topology,
        count = values.len(),
        result = result,
        "equivalent_resistance"
    );
    Ok(result)
}

/// Resolve `label` with policy `P`, then compute the equivalent resistance.
///
/// The emptiness check runs before label resolution, so an empty list is
/// reported even when the label is also invalid.
pub fn equivalent_resistance_for<P: TopologyPolicy>(values: &[f64], label: &str) -> Result<f64> {
    if values.is_empty() {
        return Err(CalcError::invalid_input(EMPTY_RESISTANCE_LIST));
    }
    let topology = P::resolve(label)?;
    equivalent_resistance(values, topology)
}
