//! circuitsrv configuration
//!
//! Layered with figment: built-in defaults, then the YAML file, then
//! `CIRCUITSRV_` environment variables (`__` separates nested keys, e.g.
//! `CIRCUITSRV_API__PORT=7000`).

use std::path::{Path, PathBuf};

use common::LoggingConfig;
use errors::{CircuitError, CircuitResult};
use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};

pub const SERVICE_NAME: &str = "circuitsrv";
pub const DEFAULT_PORT: u16 = 6010;
pub const DEFAULT_CONFIG_PATH: &str = "config/circuitsrv.yaml";
/// Environment variable naming an explicit configuration file
pub const ENV_CONFIG_PATH: &str = "CIRCUITSRV_CONFIG";
pub const ENV_PREFIX: &str = "CIRCUITSRV_";

/// Service identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceSection {
    #[serde(default = "default_service_name")]
    pub name: String,
    #[serde(default = "default_description")]
    pub description: String,
}

fn default_service_name() -> String {
    SERVICE_NAME.to_string()
}

fn default_description() -> String {
    "API for basic electrical circuit calculations.".to_string()
}

impl Default for ServiceSection {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            description: default_description(),
        }
    }
}

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    common::DEFAULT_API_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Complete circuitsrv configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CircuitsrvConfig {
    #[serde(default)]
    pub service: ServiceSection,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CircuitsrvConfig {
    /// Resolve the configuration file path
    ///
    /// Priority: explicit path > `CIRCUITSRV_CONFIG` > `config/circuitsrv.yaml`.
    /// The boolean is true when the path was requested explicitly and must exist.
    pub fn resolve_path(explicit: Option<&Path>) -> (PathBuf, bool) {
        if let Some(path) = explicit {
            return (path.to_path_buf(), true);
        }
        match std::env::var(ENV_CONFIG_PATH) {
            Ok(path) if !path.is_empty() => (PathBuf::from(path), true),
            _ => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
        }
    }

    /// Load configuration from file and environment
    pub fn load(explicit: Option<&Path>) -> CircuitResult<Self> {
        let (path, required) = Self::resolve_path(explicit);
        if required && !path.exists() {
            return Err(CircuitError::Configuration(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }
        Self::figment(&path)
            .extract()
            .map_err(|e| CircuitError::Configuration(e.to_string()))
    }

    /// Provider stack used by [`CircuitsrvConfig::load`]
    pub fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Yaml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Reject configurations the service cannot start with
    pub fn validate(&self) -> CircuitResult<()> {
        if self.service.name.trim().is_empty() {
            return Err(invalid("service.name", "must not be empty"));
        }
        if self.api.host.trim().is_empty() {
            return Err(invalid("api.host", "must not be empty"));
        }
        if self.api.port == 0 {
            return Err(invalid("api.port", "must be between 1 and 65535"));
        }
        validate_log_filter("logging.level", &self.logging.level)
    }
}

fn invalid(field: &str, reason: &str) -> CircuitError {
    CircuitError::InvalidConfig {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

/// Anything `EnvFilter` accepts: a level, directives or bare targets
pub fn validate_log_filter(field: &str, spec: &str) -> CircuitResult<()> {
    common::logging::validate_filter(spec).map_err(|reason| invalid(field, &reason))
}
