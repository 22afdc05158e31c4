//! Shared service library
//!
//! Provides the pieces every circuit calculator service needs:
//! - logging (console, rolling files, runtime level reload, HTTP access log)
//! - admin endpoints for the runtime log level
//! - command-line arguments and startup helpers
//! - configuration value fallback helpers
//! - graceful shutdown
//! - shared API response types

#[cfg(feature = "axum")]
pub mod admin_api;
pub mod api_types;
pub mod bootstrap_args;
pub mod config_loader;
pub mod logging;
pub mod service_bootstrap;
pub mod shutdown;

// Re-export commonly used API types
pub use api_types::{HealthStatus, ServiceStatus};

pub use logging::LoggingConfig;

// Re-export common dependencies
pub use anyhow;
pub use serde;
pub use serde_json;
pub use tokio;

// Re-export CLI dependencies when cli feature is enabled
#[cfg(feature = "cli")]
pub use clap;

/// Default bind host for HTTP APIs
pub const DEFAULT_API_HOST: &str = "0.0.0.0";
