//! Application State Management
//!
//! Immutable state shared across all API handlers

use chrono::{DateTime, Utc};
use common::service_bootstrap::ServiceInfo;

use crate::config::CircuitsrvConfig;

/// Application state shared by every handler
///
/// The calculator is stateless; this only carries identity for `/health`.
pub struct AppState {
    pub service: ServiceInfo,
    pub config: CircuitsrvConfig,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Create new application state
    pub fn new(service: ServiceInfo, config: CircuitsrvConfig) -> Self {
        Self {
            service,
            config,
            started_at: Utc::now(),
        }
    }
}
