//! Circuit Calculator REST API
//!
//! Handler modules plus the shared failure logging and fallback.

pub mod circuit_handlers;
pub mod health_handlers;

use axum::http::Uri;
use errors::{CircuitError, CircuitErrorTrait, CircuitResult};
use tracing::{event, Level};

/// Log a failed request at the level its error category asks for
pub(crate) fn log_outcome<T>(endpoint: &'static str, result: CircuitResult<T>) -> CircuitResult<T> {
    if let Err(ref e) = result {
        match e.log_level() {
            Level::ERROR => event!(Level::ERROR, endpoint, code = e.error_code(), "{}", e),
            Level::WARN => event!(Level::WARN, endpoint, code = e.error_code(), "{}", e),
            _ => event!(Level::INFO, endpoint, code = e.error_code(), "Rejected: {}", e),
        }
    }
    result
}

/// Fallback for unknown routes
pub async fn not_found(uri: Uri) -> CircuitError {
    CircuitError::NotFound {
        resource: uri.path().to_string(),
    }
}
