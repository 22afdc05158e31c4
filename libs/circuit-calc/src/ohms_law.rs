//! Ohm's law (V = R × I) and electrical power (P = V × I)

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use tracing::debug;

use crate::arithmetic::{checked_div, ensure_finite};
use crate::error::{
    CalcError, Result, NON_FINITE_RESULT, OHMS_LAW_ARITY, OHMS_LAW_DIVISION_BY_ZERO,
};

/// Partial Ohm's law input: exactly two of the three fields must be set
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct OhmsLawInput {
    pub voltage: Option<f64>,
    pub resistance: Option<f64>,
    pub current: Option<f64>,
}

impl OhmsLawInput {
    pub fn new(voltage: Option<f64>, resistance: Option<f64>, current: Option<f64>) -> Self {
        Self {
            voltage,
            resistance,
            current,
        }
    }
}

/// The quantity Ohm's law was solved for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OhmsQuantity {
    Voltage,
    Resistance,
    Current,
}

impl OhmsQuantity {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Voltage => "voltage",
            Self::Resistance => "resistance",
            Self::Current => "current",
        }
    }
}

/// Solved quantity and its value; serializes as `{"<quantity>": value}`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OhmsLawResult {
    pub quantity: OhmsQuantity,
    pub value: f64,
}

impl Serialize for OhmsLawResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.quantity.key(), &self.value)?;
        map.end()
    }
}

/// Solve Ohm's law for whichever field of `input` is missing.
///
/// | voltage | resistance | current | result |
/// |---------|------------|---------|--------|
/// | -       | set        | set     | voltage = R × I |
/// | set     | -          | set     | resistance = V / I |
/// | set     | set        | -       | current = V / R |
/// | any other combination | | | `InvalidInput` |
///
/// # Errors
/// * `InvalidInput` unless exactly two fields are set
/// * `DivisionByZero` when the divisor (current or resistance) is zero
/// * `InvalidInput` when the solved value overflows or is NaN
pub fn ohms_law(input: OhmsLawInput) -> Result<OhmsLawResult> {
    let (quantity, value) = match (input.voltage, input.resistance, input.current) {
        (None, Some(r), Some(i)) => (OhmsQuantity::Voltage, r * i),
        (Some(v), None, Some(i)) => (
            OhmsQuantity::Resistance,
            checked_div(v, i, OHMS_LAW_DIVISION_BY_ZERO)?,
        ),
        (Some(v), Some(r), None) => (
            OhmsQuantity::Current,
            checked_div(v, r, OHMS_LAW_DIVISION_BY_ZERO)?,
        ),
        (Some(_), Some(_), Some(_))
        | (None, None, None)
        | (Some(_), None, None)
        | (None, Some(_), None)
        | (None, None, Some(_)) => return Err(CalcError::invalid_input(OHMS_LAW_ARITY)),
    };
    let value = ensure_finite(value, NON_FINITE_RESULT)?;

    debug!(quantity = quantity.key(), value = value, "ohms_law");
    Ok(OhmsLawResult { quantity, value })
}

/// Electrical power `P = V × I`
pub fn power(voltage: f64, current: f64) -> f64 {
    voltage * current
}

/// [`power`] that refuses a non-finite product
pub fn checked_power(voltage: f64, current: f64) -> Result<f64> {
    ensure_finite(power(voltage, current), NON_FINITE_RESULT)
}
