//! API integration tests
//!
//! Drive the full router (middleware and fallback included) with
//! `tower::ServiceExt::oneshot`.

#![allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::util::ServiceExt;

use circuitsrv::{bootstrap, create_app, AppState, CircuitsrvConfig};

fn create_test_router() -> Router {
    let config = CircuitsrvConfig::default();
    let service_info = bootstrap::service_info(&config);
    create_app(Arc::new(AppState::new(service_info, config)))
}

/// Helper to make requests and decode the JSON response
async fn json_request(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request = if let Some(json) = body {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&json).unwrap()))
            .unwrap()
    } else {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    };

    let response = app.clone().oneshot(request).await.unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    let body: Value = if body_bytes.is_empty() {
        json!({})
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };

    (status, body)
}

async fn get(uri: &str) -> (StatusCode, Value) {
    json_request(&create_test_router(), "GET", uri, None).await
}

async fn post_calculation(body: Value) -> (StatusCode, Value) {
    json_request(&create_test_router(), "POST", "/calculations", Some(body)).await
}

// ============================================================================
// /equivalent_resistance
// ============================================================================

#[tokio::test]
async fn test_series_resistance_is_sum() {
    let (status, body) = get("/equivalent_resistance?values=10&values=20&values=30&circuit_type=series").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"equivalent_resistance": 60.0}));
}

#[tokio::test]
async fn test_parallel_resistance() {
    let (status, body) = get("/equivalent_resistance?values=10&values=10&circuit_type=parallel").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["equivalent_resistance"].as_f64().unwrap(), 5.0);

    let (status, body) = get("/equivalent_resistance?values=2&values=3&values=6&circuit_type=parallel").await;
    assert_eq!(status, StatusCode::OK);
    assert!((body["equivalent_resistance"].as_f64().unwrap() - 1.0).abs() < 1e-12);
}

#[tokio::test]
async fn test_empty_resistance_list_rejected() {
    let (status, body) = get("/equivalent_resistance?circuit_type=series").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "You must provide at least one resistance value.");
    assert_eq!(body["error_code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_zero_resistance_in_parallel_rejected() {
    let (status, body) = get("/equivalent_resistance?values=0&values=5&circuit_type=parallel").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["detail"],
        "Division by zero is not allowed in resistance calculation."
    );
    assert_eq!(body["error_code"], "DIVISION_BY_ZERO");
}

#[tokio::test]
async fn test_unknown_circuit_type_rejected() {
    let (status, body) = get("/equivalent_resistance?values=5&circuit_type=loop").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Invalid type, use 'series' or 'parallel'.");

    // Labels are case-sensitive
    let (status, _) = get("/equivalent_resistance?values=5&circuit_type=Series").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_equivalent_resistance_request_shape_errors() {
    let (status, body) = get("/equivalent_resistance?values=5").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].as_str().unwrap().contains("circuit_type"));

    let (status, body) = get("/equivalent_resistance?values=abc&circuit_type=series").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].as_str().unwrap().contains("values"));
}

// ============================================================================
// /ohms_law
// ============================================================================

#[tokio::test]
async fn test_ohms_law_solves_each_quantity() {
    let (status, body) = get("/ohms_law?resistance=10&current=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"voltage": 20.0}));

    let (status, body) = get("/ohms_law?voltage=12&current=3").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"resistance": 4.0}));

    let (status, body) = get("/ohms_law?voltage=10&resistance=5").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"current": 2.0}));
}

#[tokio::test]
async fn test_ohms_law_division_by_zero() {
    let (status, body) = get("/ohms_law?voltage=10&current=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["detail"],
        "Division by zero is not allowed in Ohm's law calculation."
    );
}

#[tokio::test]
async fn test_ohms_law_requires_exactly_two_values() {
    for uri in [
        "/ohms_law?voltage=1&resistance=2&current=3",
        "/ohms_law?voltage=1",
        "/ohms_law",
    ] {
        let (status, body) = get(uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(
            body["detail"],
            "Provide exactly two values to calculate the third."
        );
    }
}

#[tokio::test]
async fn test_ohms_law_explicit_zero_counts_as_present() {
    let (status, body) = get("/ohms_law?resistance=0&current=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"voltage": 0.0}));
}

// ============================================================================
// /power
// ============================================================================

#[tokio::test]
async fn test_power() {
    let (status, body) = get("/power?voltage=5&current=3").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"power": 15.0}));
}

#[tokio::test]
async fn test_power_missing_parameter() {
    let (status, body) = get("/power?voltage=5").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error_code"], "MISSING_PARAMETER");
    assert!(body["detail"].as_str().unwrap().contains("current"));
}

// ============================================================================
// /calculations
// ============================================================================

#[tokio::test]
async fn test_calculations_current_from_voltage_and_resistance() {
    let (status, body) = post_calculation(json!({"voltage": 10, "resistance": 5})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"current": 2.0}));
}

#[tokio::test]
async fn test_calculations_series_network() {
    let (status, body) =
        post_calculation(json!({"resistance_values": [2, 2], "circuit_type": "series"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"equivalent_resistance": 4.0}));
}

#[tokio::test]
async fn test_calculations_empty_request() {
    let (status, body) = post_calculation(json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));
}

#[tokio::test]
async fn test_calculations_combines_everything() {
    let (status, body) = post_calculation(json!({
        "voltage": 10,
        "resistance": 5,
        "current": 2,
        "resistanceValues": [4, 4],
        "circuit_type": "parallel"
    }))
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"current": 2.0, "power": 20.0, "equivalent_resistance": 2.0})
    );
}

#[tokio::test]
async fn test_calculations_unknown_type_falls_back_to_parallel() {
    let (status, body) =
        post_calculation(json!({"resistance_values": [2, 2], "circuit_type": "loop"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"equivalent_resistance": 1.0}));
}

#[tokio::test]
async fn test_calculations_zero_values_are_ignored() {
    let (status, body) = post_calculation(json!({"voltage": 0, "resistance": 5})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));
}

#[tokio::test]
async fn test_calculations_division_by_zero() {
    let (status, body) =
        post_calculation(json!({"resistance_values": [0, 5], "circuit_type": "parallel"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["detail"],
        "Division by zero is not allowed in resistance calculation."
    );
}

#[tokio::test]
async fn test_calculations_malformed_body() {
    let app = create_test_router();
    let request = Request::builder()
        .method("POST")
        .uri("/calculations")
        .header("content-type", "application/json")
        .body(Body::from("{\"voltage\": "))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let (status, body) = post_calculation(json!({"voltage": "ten"})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["category"], "Validation");
}

#[tokio::test]
async fn test_identical_requests_give_identical_results() {
    let uri = "/equivalent_resistance?values=3&values=7&circuit_type=parallel";
    let first = get(uri).await;
    let second = get(uri).await;
    assert_eq!(first, second);

    let request = json!({"voltage": 12, "current": 0.5});
    assert_eq!(
        post_calculation(request.clone()).await,
        post_calculation(request).await
    );
}

// ============================================================================
// Non-finite numbers
// ============================================================================

#[tokio::test]
async fn test_overflowing_result_is_rejected() {
    let (status, body) =
        get("/equivalent_resistance?values=1e308&values=1e308&circuit_type=series").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "The result is not a finite number.");
    assert_eq!(body["error_code"], "INVALID_INPUT");

    let (status, body) = get("/power?voltage=1e200&current=1e200").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "INVALID_INPUT");

    let (status, _) = get("/ohms_law?resistance=1e200&current=1e200").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = post_calculation(json!({"voltage": 1e200, "current": 1e200})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "The result is not a finite number.");
}

#[tokio::test]
async fn test_non_finite_query_values_rejected() {
    for uri in [
        "/power?voltage=nan&current=1",
        "/power?voltage=5&current=inf",
        "/ohms_law?voltage=-inf&current=2",
        "/equivalent_resistance?values=1&values=NaN&circuit_type=parallel",
        "/equivalent_resistance?values=1e999&circuit_type=series",
    ] {
        let (status, body) = get(uri).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{}", uri);
        assert_eq!(body["error_code"], "INVALID_PARAMETER", "{}", uri);
    }
}

#[tokio::test]
async fn test_out_of_range_body_number_rejected() {
    let app = create_test_router();
    let request = Request::builder()
        .method("POST")
        .uri("/calculations")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"voltage": 1e999, "resistance": 5}"#))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// ============================================================================
// Admin endpoints
// ============================================================================

#[tokio::test]
async fn test_get_log_level() {
    let (status, body) = get("/api/admin/logs/level").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["level"].is_string());
}

#[tokio::test]
async fn test_set_log_level_rejects_invalid_filter() {
    let (status, body) = json_request(
        &create_test_router(),
        "PUT",
        "/api/admin/logs/level",
        Some(json!({"level": "circuit_calc=loud"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().contains("circuit_calc=loud"));
}

#[tokio::test]
async fn test_set_log_level_without_reload_support() {
    // No subscriber is installed in this test binary
    let (status, _) = json_request(
        &create_test_router(),
        "PUT",
        "/api/admin/logs/level",
        Some(json!({"level": "debug"})),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

// ============================================================================
// Service endpoints
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let (status, body) = get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "circuitsrv");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_unknown_route() {
    let (status, body) = get("/resistance").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_code"], "NOT_FOUND");
}

#[cfg(feature = "swagger-ui")]
#[tokio::test]
async fn test_openapi_document_served() {
    let (status, body) = get("/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["info"]["title"], "Circuit Calculator API");
    assert_eq!(body["info"]["version"], "1.0.0");
    assert!(body["paths"]["/calculations"].is_object());
    assert!(body["paths"]["/api/admin/logs/level"]["put"].is_object());
}
