//! Unified error handling for the circuit calculator services
//!
//! Core calculation failures, request validation failures and service
//! bootstrap failures all end up in [`CircuitError`]. HTTP mapping lives in
//! [`CircuitErrorTrait`] so handlers can return the error directly.

use circuit_calc::CalcError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// ErrorBody - API error response type
// ============================================================================

/// JSON body of every error response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorBody {
    /// Human-readable failure message
    #[cfg_attr(
        feature = "openapi",
        schema(example = "Division by zero is not allowed in resistance calculation.")
    )]
    pub detail: String,
    /// Stable machine-readable code
    #[cfg_attr(feature = "openapi", schema(example = "DIVISION_BY_ZERO"))]
    pub error_code: String,
    /// Error category name
    #[cfg_attr(feature = "openapi", schema(example = "Calculation"))]
    pub category: String,
}

// ============================================================================
// CircuitError - Main error type
// ============================================================================

/// Main error type for the circuit calculator services
#[derive(Debug, Error)]
pub enum CircuitError {
    // ======================================
    // Calculation Errors
    // ======================================
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    DivisionByZero(String),

    // ======================================
    // Request Errors
    // ======================================
    #[error("{0}")]
    Validation(String),

    #[error("Invalid parameter: {param}: {reason}")]
    InvalidParameter { param: String, reason: String },

    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    #[error("Not found: {resource}")]
    NotFound { resource: String },

    // ======================================
    // Configuration Errors
    // ======================================
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid configuration: {field}: {reason}")]
    InvalidConfig { field: String, reason: String },

    // ======================================
    // Service & Runtime Errors
    // ======================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Service startup failed: {0}")]
    StartupFailed(String),
}

/// Result type alias using CircuitError
pub type CircuitResult<T> = Result<T, CircuitError>;

impl CircuitError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self.category() {
            ErrorCategory::Calculation => 400,
            ErrorCategory::Validation => 422,
            ErrorCategory::NotFound => 404,
            ErrorCategory::Configuration | ErrorCategory::Internal => 500,
        }
    }

    /// Build the JSON error body
    pub fn to_error_body(&self) -> ErrorBody {
        ErrorBody {
            detail: self.to_string(),
            error_code: self.error_code().to_string(),
            category: format!("{:?}", self.category()),
        }
    }
}

impl From<CalcError> for CircuitError {
    fn from(err: CalcError) -> Self {
        match err {
            CalcError::InvalidInput(msg) => Self::InvalidInput(msg),
            CalcError::DivisionByZero(msg) => Self::DivisionByZero(msg),
        }
    }
}

impl CircuitErrorTrait for CircuitError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::DivisionByZero(_) => "DIVISION_BY_ZERO",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidParameter { .. } => "INVALID_PARAMETER",
            Self::MissingParameter(_) => "MISSING_PARAMETER",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::InvalidConfig { .. } => "INVALID_CONFIG",
            Self::Io(_) => "IO_ERROR",
            Self::StartupFailed(_) => "STARTUP_FAILED",
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput(_) | Self::DivisionByZero(_) => ErrorCategory::Calculation,

            Self::Validation(_) | Self::InvalidParameter { .. } | Self::MissingParameter(_) => {
                ErrorCategory::Validation
            },

            Self::NotFound { .. } => ErrorCategory::NotFound,

            Self::Configuration(_) | Self::InvalidConfig { .. } => ErrorCategory::Configuration,

            Self::Io(_) | Self::StartupFailed(_) => ErrorCategory::Internal,
        }
    }
}

// ============================================================================
// Error Trait - Architectural layer
// ============================================================================

/// Error category enum - used for classification and HTTP mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Formula rejected its input (empty list, arity, zero divisor)
    Calculation,
    /// Request could not be parsed into the expected shape
    Validation,
    NotFound,
    Configuration,
    Internal,
}

/// Common error capability trait
///
/// Gives every service error a code, a category, an HTTP mapping and a log
/// level. None of the categories are retryable.
pub trait CircuitErrorTrait: std::error::Error + Send + Sync + 'static {
    /// Get error code (for API and logs)
    fn error_code(&self) -> &'static str;

    /// Get error category
    fn category(&self) -> ErrorCategory;

    /// Convert to HTTP status code
    #[cfg(feature = "axum-support")]
    fn http_status(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self.category() {
            ErrorCategory::Calculation => StatusCode::BAD_REQUEST,
            ErrorCategory::Validation => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorCategory::NotFound => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Convert into an Axum HTTP response
    #[cfg(feature = "axum-support")]
    fn into_http_response(self) -> axum::response::Response
    where
        Self: Sized,
    {
        use axum::response::{IntoResponse, Json};

        let body = ErrorBody {
            detail: self.to_string(),
            error_code: self.error_code().to_string(),
            category: format!("{:?}", self.category()),
        };
        (self.http_status(), Json(body)).into_response()
    }

    /// Get log level
    fn log_level(&self) -> tracing::Level {
        use tracing::Level;
        match self.category() {
            ErrorCategory::Internal => Level::ERROR,
            ErrorCategory::Configuration => Level::WARN,
            ErrorCategory::Calculation | ErrorCategory::Validation | ErrorCategory::NotFound => {
                Level::INFO
            },
        }
    }
}

#[cfg(feature = "axum-support")]
impl axum::response::IntoResponse for CircuitError {
    fn into_response(self) -> axum::response::Response {
        self.into_http_response()
    }
}

// Tests
#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(CircuitError::InvalidInput("x".into()).status_code(), 400);
        assert_eq!(CircuitError::DivisionByZero("x".into()).status_code(), 400);
        assert_eq!(CircuitError::Validation("x".into()).status_code(), 422);
        assert_eq!(
            CircuitError::MissingParameter("voltage".into()).status_code(),
            422
        );
        assert_eq!(
            CircuitError::NotFound {
                resource: "/nope".into()
            }
            .status_code(),
            404
        );
        assert_eq!(
            CircuitError::StartupFailed("bind".into()).status_code(),
            500
        );
        assert_eq!(
            CircuitError::InvalidConfig {
                field: "server.port".into(),
                reason: "must not be 0".into()
            }
            .status_code(),
            500
        );
    }

    #[test]
    fn test_from_calc_error_keeps_message() {
        let err: CircuitError = CalcError::division_by_zero("boom").into();
        assert!(matches!(err, CircuitError::DivisionByZero(_)));
        assert_eq!(err.to_string(), "boom");

        let err: CircuitError = CalcError::invalid_input("bad").into();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert_eq!(err.category(), ErrorCategory::Calculation);
    }

    #[test]
    fn test_error_body() {
        let body = CircuitError::DivisionByZero("no".into()).to_error_body();
        assert_eq!(body.detail, "no");
        assert_eq!(body.error_code, "DIVISION_BY_ZERO");
        assert_eq!(body.category, "Calculation");
    }

    #[test]
    fn test_io_error_is_internal() {
        let err: CircuitError =
            std::io::Error::new(std::io::ErrorKind::AddrInUse, "in use").into();
        assert_eq!(err.error_code(), "IO_ERROR");
        assert_eq!(err.category(), ErrorCategory::Internal);
    }

    #[test]
    fn test_log_level() {
        assert_eq!(
            CircuitError::InvalidInput("x".into()).log_level(),
            tracing::Level::INFO
        );
        assert_eq!(
            CircuitError::StartupFailed("x".into()).log_level(),
            tracing::Level::ERROR
        );
    }
}
