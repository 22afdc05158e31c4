//! Data Transfer Objects (DTOs) for API requests and responses
//!
//! Query DTOs double as OpenAPI parameter descriptions and as the typed form
//! of a request after [`QueryParams`] parsing.

use circuit_calc::{OhmsLawInput, OhmsLawResult, OhmsQuantity};
use errors::CircuitError;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::query::QueryParams;

/// Query for `GET /equivalent_resistance`
#[derive(Debug, Clone, PartialEq, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EquivalentResistanceQuery {
    /// Resistance values in ohms; repeat the key for each resistor
    #[param(example = json!([10.0, 20.0]))]
    #[serde(default)]
    pub values: Vec<f64>,
    /// Network topology: `series` or `parallel`
    #[param(example = "series")]
    pub circuit_type: String,
}

impl TryFrom<&QueryParams> for EquivalentResistanceQuery {
    type Error = CircuitError;

    fn try_from(params: &QueryParams) -> Result<Self, Self::Error> {
        Ok(Self {
            values: params.f64_list("values")?,
            circuit_type: params.required_str("circuit_type")?,
        })
    }
}

/// Query for `GET /ohms_law`; provide exactly two of the three
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OhmsLawQuery {
    /// Voltage in volts
    pub voltage: Option<f64>,
    /// Resistance in ohms
    pub resistance: Option<f64>,
    /// Current in amperes
    pub current: Option<f64>,
}

impl TryFrom<&QueryParams> for OhmsLawQuery {
    type Error = CircuitError;

    fn try_from(params: &QueryParams) -> Result<Self, Self::Error> {
        Ok(Self {
            voltage: params.optional_f64("voltage")?,
            resistance: params.optional_f64("resistance")?,
            current: params.optional_f64("current")?,
        })
    }
}

impl From<OhmsLawQuery> for OhmsLawInput {
    fn from(query: OhmsLawQuery) -> Self {
        OhmsLawInput::new(query.voltage, query.resistance, query.current)
    }
}

/// Query for `GET /power`
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PowerQuery {
    /// Voltage in volts
    #[param(example = 5.0)]
    pub voltage: f64,
    /// Current in amperes
    #[param(example = 3.0)]
    pub current: f64,
}

impl TryFrom<&QueryParams> for PowerQuery {
    type Error = CircuitError;

    fn try_from(params: &QueryParams) -> Result<Self, Self::Error> {
        Ok(Self {
            voltage: params.required_f64("voltage")?,
            current: params.required_f64("current")?,
        })
    }
}

/// Equivalent resistance of a resistor network
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EquivalentResistanceResponse {
    #[schema(example = 30.0)]
    pub equivalent_resistance: f64,
}

/// Electrical power in watts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PowerResponse {
    #[schema(example = 15.0)]
    pub power: f64,
}

/// Ohm's law solution; exactly one field is present
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OhmsLawResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = 20.0)]
    pub voltage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resistance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<f64>,
}

impl From<OhmsLawResult> for OhmsLawResponse {
    fn from(result: OhmsLawResult) -> Self {
        let mut response = Self::default();
        match result.quantity {
            OhmsQuantity::Voltage => response.voltage = Some(result.value),
            OhmsQuantity::Resistance => response.resistance = Some(result.value),
            OhmsQuantity::Current => response.current = Some(result.value),
        }
        response
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> QueryParams {
        QueryParams::new(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_equivalent_resistance_query_requires_type() {
        let err = EquivalentResistanceQuery::try_from(&params(&[("values", "1")])).unwrap_err();
        assert!(matches!(err, CircuitError::MissingParameter(ref p) if p == "circuit_type"));

        let query = EquivalentResistanceQuery::try_from(&params(&[("circuit_type", "series")]))
            .unwrap();
        assert!(query.values.is_empty());
    }

    #[test]
    fn test_ohms_law_response_has_single_key() {
        let response = OhmsLawResponse::from(OhmsLawResult {
            quantity: OhmsQuantity::Resistance,
            value: 4.0,
        });
        assert_eq!(
            serde_json::to_value(response).unwrap(),
            serde_json::json!({"resistance": 4.0})
        );
    }

    #[test]
    fn test_power_query_requires_both() {
        let err = PowerQuery::try_from(&params(&[("voltage", "5")])).unwrap_err();
        assert_eq!(err.status_code(), 422);
        let query = PowerQuery::try_from(&params(&[("voltage", "5"), ("current", "3")])).unwrap();
        assert_eq!(query, PowerQuery { voltage: 5.0, current: 3.0 });
    }
}
