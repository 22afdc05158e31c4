//! Shared admin API handlers
//!
//! Runtime log level inspection and change, mounted by each service under
//! `/api/admin/logs/level`.

use axum::{http::StatusCode, response::Json};
use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::logging::{self, SetLogLevelError};

/// Current log filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct LogLevelResponse {
    #[cfg_attr(feature = "openapi", schema(example = "info,circuit_calc=debug"))]
    pub level: String,
}

/// New log filter: a level or a full filter spec
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct SetLogLevelRequest {
    #[cfg_attr(feature = "openapi", schema(example = "debug"))]
    pub level: String,
}

/// Failure body for admin endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct AdminErrorResponse {
    pub detail: String,
}

/// Get the active log filter
///
/// @route GET /api/admin/logs/level
/// @output Json<LogLevelResponse>
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/api/admin/logs/level",
    responses(
        (status = 200, description = "Active log filter", body = LogLevelResponse)
    ),
    tag = "admin"
))]
pub async fn get_log_level() -> Json<LogLevelResponse> {
    Json(LogLevelResponse {
        level: logging::get_log_level(),
    })
}

/// Replace the active log filter
///
/// @route PUT /api/admin/logs/level
/// @input Json<SetLogLevelRequest>
/// @output Json<LogLevelResponse> - the filter now in effect
/// @side-effects Reloads the global tracing filter
#[cfg_attr(feature = "openapi", utoipa::path(
    put,
    path = "/api/admin/logs/level",
    request_body = SetLogLevelRequest,
    responses(
        (status = 200, description = "Log filter changed", body = LogLevelResponse),
        (status = 400, description = "Invalid filter", body = AdminErrorResponse),
        (status = 503, description = "Logging has no reload support", body = AdminErrorResponse)
    ),
    tag = "admin"
))]
pub async fn set_log_level(
    Json(request): Json<SetLogLevelRequest>,
) -> Result<Json<LogLevelResponse>, (StatusCode, Json<AdminErrorResponse>)> {
    let level = request.level.trim();
    match logging::set_log_level(level) {
        Ok(()) => Ok(Json(LogLevelResponse {
            level: level.to_string(),
        })),
        Err(e) => {
            let status = match e {
                SetLogLevelError::InvalidFilter(_) => StatusCode::BAD_REQUEST,
                SetLogLevelError::NotInitialized => StatusCode::SERVICE_UNAVAILABLE,
                SetLogLevelError::Reload(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
            tracing::warn!("Log level change refused: {}", e);
            Err((
                status,
                Json(AdminErrorResponse {
                    detail: e.to_string(),
                }),
            ))
        },
    }
}
