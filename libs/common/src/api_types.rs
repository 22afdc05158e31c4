//! Shared API models for the circuit calculator services

use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Service status enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct HealthStatus {
    /// Overall health status
    pub status: ServiceStatus,
    /// Service name
    #[cfg_attr(feature = "openapi", schema(example = "circuitsrv"))]
    pub service: String,
    /// Service version
    pub version: String,
    /// Uptime in seconds
    pub uptime_seconds: u64,
    /// RFC 3339 timestamp of this check
    pub timestamp: String,
}

impl HealthStatus {
    /// Healthy status stamped with the current time
    pub fn healthy(
        service: impl Into<String>,
        version: impl Into<String>,
        started_at: chrono::DateTime<chrono::Utc>,
    ) -> Self {
        let now = chrono::Utc::now();
        let uptime = (now - started_at).num_seconds().max(0) as u64;
        Self {
            status: ServiceStatus::Healthy,
            service: service.into(),
            version: version.into(),
            uptime_seconds: uptime,
            timestamp: now.to_rfc3339(),
        }
    }
}
