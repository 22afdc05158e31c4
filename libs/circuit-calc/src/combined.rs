//! Best-effort combined calculation over a partially filled request

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::arithmetic::ensure_finite;
use crate::error::{Result, NON_FINITE_RESULT};
use crate::ohms_law::checked_power;
use crate::resistance::equivalent_resistance_for;
use crate::topology::{LenientTopology, SERIES_LABEL};

/// Request record for the combined calculation
///
/// All fields are optional. `resistance_values` defaults to an empty list and
/// `circuit_type` to `"series"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CalculationRequest {
    #[cfg_attr(feature = "openapi", schema(example = 10.0))]
    pub voltage: Option<f64>,
    #[cfg_attr(feature = "openapi", schema(example = 5.0))]
    pub resistance: Option<f64>,
    pub current: Option<f64>,
    #[serde(default, alias = "resistanceValues")]
    #[cfg_attr(feature = "openapi", schema(example = json!([2.0, 2.0])))]
    pub resistance_values: Vec<f64>,
    #[serde(default = "default_circuit_type", alias = "circuitType")]
    #[cfg_attr(feature = "openapi", schema(example = "series"))]
    pub circuit_type: String,
}

fn default_circuit_type() -> String {
    SERIES_LABEL.to_string()
}

impl Default for CalculationRequest {
    fn default() -> Self {
        Self {
            voltage: None,
            resistance: None,
            current: None,
            resistance_values: Vec::new(),
            circuit_type: default_circuit_type(),
        }
    }
}

/// Keys that may appear in a [`CalculationResult`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultKey {
    Voltage,
    Resistance,
    Current,
    Power,
    EquivalentResistance,
}

impl ResultKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Voltage => "voltage",
            Self::Resistance => "resistance",
            Self::Current => "current",
            Self::Power => "power",
            Self::EquivalentResistance => "equivalent_resistance",
        }
    }
}

/// Computed values keyed by [`ResultKey`]; only computable keys are present
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(transparent)]
pub struct CalculationResult(BTreeMap<String, f64>);

impl CalculationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: ResultKey, value: f64) {
        self.0.insert(key.as_str().to_string(), value);
    }

    pub fn get(&self, key: ResultKey) -> Option<f64> {
        self.0.get(key.as_str()).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn into_inner(self) -> BTreeMap<String, f64> {
        self.0
    }
}

/// Legacy presence rule: a zero value counts as absent
fn truthy(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0)
}

/// Fill in whatever can be derived from `request`.
///
/// 1. voltage and resistance → `current`
/// 2. voltage and current → `power`
/// 3. non-empty `resistance_values` → `equivalent_resistance`, with
///    `circuit_type` resolved by [`LenientTopology`]
///
/// Zero voltage/resistance/current values are treated as absent. An empty
/// result is a successful outcome.
///
/// # Errors
/// * `DivisionByZero` from the parallel branch of step 3
/// * `InvalidInput` when any computed value overflows or is NaN
pub fn combined_calculation(request: &CalculationRequest) -> Result<CalculationResult> {
    let mut result = CalculationResult::new();
    let voltage = truthy(request.voltage);

    if let (Some(v), Some(r)) = (voltage, truthy(request.resistance)) {
        // r is non-zero by the presence rule
        result.insert(ResultKey::Current, ensure_finite(v / r, NON_FINITE_RESULT)?);
    }

    if let (Some(v), Some(i)) = (voltage, truthy(request.current)) {
        result.insert(ResultKey::Power, checked_power(v, i)?);
    }

    if !request.resistance_values.is_empty() {
        let req = equivalent_resistance_for::<LenientTopology>(
            &request.resistance_values,
            &request.circuit_type,
        )?;
        result.insert(ResultKey::EquivalentResistance, req);
    }

    debug!(computed = result.len(), "combined_calculation");
    Ok(result)
}
