//! Health Check API Handlers

use axum::{extract::State, response::Json};
use common::HealthStatus;
use std::sync::Arc;

use crate::app_state::AppState;

/// Health check endpoint
///
/// @route GET /health
/// @output Json<HealthStatus> - Service identity and uptime
/// @side-effects None (read-only operation)
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthStatus)
    ),
    tag = "health"
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthStatus> {
    Json(HealthStatus::healthy(
        state.service.name.clone(),
        state.service.version.clone(),
        state.started_at,
    ))
}
