//! Circuit Calculation API Handlers
//!
//! Thin adapters from HTTP to `circuit_calc`. Query parameters are parsed by
//! hand from ordered pairs so that rejections come back in the service's own
//! error body.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query,
    },
    response::Json,
};
use circuit_calc::{
    checked_power, combined_calculation, equivalent_resistance_for, ohms_law as solve_ohms_law,
    CalculationRequest, CalculationResult, StrictTopology,
};
use errors::{CircuitError, CircuitResult, ErrorBody};

use super::log_outcome;
use crate::dto::{
    EquivalentResistanceQuery, EquivalentResistanceResponse, OhmsLawQuery, OhmsLawResponse,
    PowerQuery, PowerResponse,
};
use crate::query::QueryParams;

type RawQuery = Result<Query<Vec<(String, String)>>, QueryRejection>;

/// Equivalent resistance of a series or parallel network
///
/// @route GET /equivalent_resistance
/// @input values: repeated f64, circuit_type: "series" | "parallel"
/// @output Json<EquivalentResistanceResponse>
/// @example /equivalent_resistance?values=10&values=20&circuit_type=series
#[utoipa::path(
    get,
    path = "/equivalent_resistance",
    params(EquivalentResistanceQuery),
    responses(
        (status = 200, description = "Equivalent resistance in ohms", body = EquivalentResistanceResponse),
        (status = 400, description = "Empty list, zero resistance in parallel, unknown type, or non-finite result", body = ErrorBody),
        (status = 422, description = "Missing or unparsable parameter", body = ErrorBody)
    ),
    tag = "circuit"
)]
pub async fn equivalent_resistance(
    query: RawQuery,
) -> CircuitResult<Json<EquivalentResistanceResponse>> {
    log_outcome("equivalent_resistance", resolve_equivalent_resistance(query))
}

fn resolve_equivalent_resistance(
    query: RawQuery,
) -> CircuitResult<Json<EquivalentResistanceResponse>> {
    let params = QueryParams::from_extractor(query)?;
    let request = EquivalentResistanceQuery::try_from(&params)?;
    let value =
        equivalent_resistance_for::<StrictTopology>(&request.values, &request.circuit_type)?;
    Ok(Json(EquivalentResistanceResponse {
        equivalent_resistance: value,
    }))
}

/// Solve Ohm's law for the missing quantity
///
/// @route GET /ohms_law
/// @input exactly two of voltage, resistance, current
/// @output Json<OhmsLawResponse> - only the solved quantity is present
/// @example /ohms_law?resistance=10&current=2 → {"voltage": 20.0}
#[utoipa::path(
    get,
    path = "/ohms_law",
    params(OhmsLawQuery),
    responses(
        (status = 200, description = "The solved quantity, e.g. {\"voltage\": 20.0}", body = OhmsLawResponse),
        (status = 400, description = "Not exactly two values, zero divisor, or non-finite result", body = ErrorBody),
        (status = 422, description = "Unparsable parameter", body = ErrorBody)
    ),
    tag = "circuit"
)]
pub async fn ohms_law(query: RawQuery) -> CircuitResult<Json<OhmsLawResponse>> {
    log_outcome("ohms_law", resolve_ohms_law(query))
}

fn resolve_ohms_law(query: RawQuery) -> CircuitResult<Json<OhmsLawResponse>> {
    let params = QueryParams::from_extractor(query)?;
    let request = OhmsLawQuery::try_from(&params)?;
    Ok(Json(solve_ohms_law(request.into())?.into()))
}

/// Power from voltage and current
///
/// @route GET /power
/// @input voltage: f64, current: f64 (both required)
/// @output Json<PowerResponse>
#[utoipa::path(
    get,
    path = "/power",
    params(PowerQuery),
    responses(
        (status = 200, description = "Power in watts", body = PowerResponse),
        (status = 400, description = "Product is not a finite number", body = ErrorBody),
        (status = 422, description = "Missing or unparsable parameter", body = ErrorBody)
    ),
    tag = "circuit"
)]
pub async fn power(query: RawQuery) -> CircuitResult<Json<PowerResponse>> {
    log_outcome("power", resolve_power(query))
}

fn resolve_power(query: RawQuery) -> CircuitResult<Json<PowerResponse>> {
    let params = QueryParams::from_extractor(query)?;
    let request = PowerQuery::try_from(&params)?;
    Ok(Json(PowerResponse {
        power: checked_power(request.voltage, request.current)?,
    }))
}

/// Derive every value computable from the request body
///
/// @route POST /calculations
/// @input Json<CalculationRequest>
/// @output Json<CalculationResult> - possibly empty
/// @example {"voltage": 10, "resistance": 5} → {"current": 2.0}
#[utoipa::path(
    post,
    path = "/calculations",
    request_body = CalculationRequest,
    responses(
        (status = 200, description = "Computed values; only derivable keys are present", body = CalculationResult),
        (status = 400, description = "Zero resistance in a parallel network, or non-finite result", body = ErrorBody),
        (status = 422, description = "Malformed JSON body", body = ErrorBody)
    ),
    tag = "circuit"
)]
pub async fn calculations(
    body: Result<Json<CalculationRequest>, JsonRejection>,
) -> CircuitResult<Json<CalculationResult>> {
    log_outcome("calculations", resolve_calculations(body))
}

fn resolve_calculations(
    body: Result<Json<CalculationRequest>, JsonRejection>,
) -> CircuitResult<Json<CalculationResult>> {
    let Json(request) = body.map_err(|rejection| CircuitError::Validation(rejection.body_text()))?;
    Ok(Json(combined_calculation(&request)?))
}
