//! API Route Configuration
//!
//! Central route definition for all Circuit Calculator API endpoints

use axum::{
    routing::{get, post},
    Router,
};
use common::admin_api::{get_log_level, set_log_level};
use std::sync::Arc;
use tracing::info;
use utoipa::OpenApi;

use crate::api::circuit_handlers::{calculations, equivalent_resistance, ohms_law, power};
use crate::api::health_handlers::health_check;
use crate::api::not_found;
use crate::app_state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Circuit Calculator API",
        description = "API for basic electrical circuit calculations.",
        version = "1.0.0"
    ),
    paths(
        crate::api::health_handlers::health_check,
        crate::api::circuit_handlers::equivalent_resistance,
        crate::api::circuit_handlers::ohms_law,
        crate::api::circuit_handlers::power,
        crate::api::circuit_handlers::calculations,
        common::admin_api::get_log_level,
        common::admin_api::set_log_level
    ),
    components(
        schemas(
            crate::dto::EquivalentResistanceResponse,
            crate::dto::OhmsLawResponse,
            crate::dto::PowerResponse,
            circuit_calc::CalculationRequest,
            circuit_calc::CalculationResult,
            errors::ErrorBody,
            common::HealthStatus,
            common::ServiceStatus,
            common::admin_api::LogLevelResponse,
            common::admin_api::SetLogLevelRequest,
            common::admin_api::AdminErrorResponse
        )
    ),
    tags(
        (name = "circuit", description = "Electrical circuit formulas"),
        (name = "health", description = "Service health"),
        (name = "admin", description = "Runtime administration")
    )
)]
pub struct CircuitsrvApiDoc;

/// Create all API routes for the Circuit Calculator
pub fn create_routes(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Calculator endpoints
        .route("/equivalent_resistance", get(equivalent_resistance))
        .route("/ohms_law", get(ohms_law))
        .route("/power", get(power))
        .route("/calculations", post(calculations))
        // Admin endpoints
        .route(
            "/api/admin/logs/level",
            get(get_log_level).put(set_log_level),
        )
        .fallback(not_found)
        // Apply HTTP request logging middleware
        .layer(axum::middleware::from_fn(common::logging::http_request_logger))
        .with_state(state)
}

/// Routes plus the Swagger UI at `/docs` (serving `/openapi.json`)
pub fn create_app(state: Arc<AppState>) -> Router {
    let app = create_routes(state);

    #[cfg(feature = "swagger-ui")]
    let app = {
        use utoipa_swagger_ui::SwaggerUi;
        info!("Swagger UI feature ENABLED - initializing at /docs");
        app.merge(SwaggerUi::new("/docs").url("/openapi.json", CircuitsrvApiDoc::openapi()))
    };

    #[cfg(not(feature = "swagger-ui"))]
    info!("Swagger UI feature DISABLED");

    app
}
