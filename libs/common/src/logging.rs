//! Unified logging module for the circuit calculator services
//!
//! Console output always; optional daily rolling log files; runtime log
//! level reload; and an HTTP access logger routed through the `api_access`
//! target.

use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

use serde::{Deserialize, Serialize};
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    filter,
    fmt::{self, format::Writer, FmtContext, FormatEvent, FormatFields},
    layer::SubscriberExt,
    registry::LookupSpan,
    reload,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

/// Target used for HTTP access events
pub const API_ACCESS_TARGET: &str = "api_access";

/// Custom format for log level with brackets: `[INFO]`, `[WARN]`, etc.
fn format_level(level: &Level) -> &'static str {
    match *level {
        Level::TRACE => "[TRACE]",
        Level::DEBUG => "[DEBUG]",
        Level::INFO => "[INFO]",
        Level::WARN => "[WARN]",
        Level::ERROR => "[ERROR]",
    }
}

/// Custom event formatter that outputs: `timestamp [LEVEL] message`
///
/// Example output: `2025-12-02T00:50:44.809Z [INFO] Service started`
struct BracketedLevelFormat;

impl<S, N> FormatEvent<S, N> for BracketedLevelFormat
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let now = chrono::Utc::now();
        write!(writer, "{} ", now.format("%Y-%m-%dT%H:%M:%S%.6fZ"))?;

        let level = *event.metadata().level();
        if writer.has_ansi_escapes() {
            let color = match level {
                Level::TRACE => "\x1b[35m", // magenta
                Level::DEBUG => "\x1b[34m", // blue
                Level::INFO => "\x1b[32m",  // green
                Level::WARN => "\x1b[33m",  // yellow
                Level::ERROR => "\x1b[31m", // red
            };
            write!(writer, "{}{}\x1b[0m ", color, format_level(&level))?;
        } else {
            write!(writer, "{} ", format_level(&level))?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

// Keeps non-blocking file writers alive for the process lifetime
static GUARDS: OnceLock<Mutex<Vec<WorkerGuard>>> = OnceLock::new();

// ============================================================================
// Log Root Directory Configuration
// ============================================================================

/// Global log root directory (initialized once from config or env)
static LOG_ROOT: OnceLock<PathBuf> = OnceLock::new();

/// Initialize log root directory
///
/// Priority:
/// 1. `CIRCUIT_LOG_DIR` environment variable
/// 2. `config_dir` parameter (from the configuration file)
/// 3. Default value "logs"
pub fn init_log_root(config_dir: Option<&str>) {
    LOG_ROOT.get_or_init(|| resolve_log_root(config_dir));
}

fn resolve_log_root(config_dir: Option<&str>) -> PathBuf {
    std::env::var("CIRCUIT_LOG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            config_dir
                .filter(|d| !d.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("logs"))
        })
}

/// Get log root directory, falling back to env/default if not initialized
pub fn get_log_root() -> PathBuf {
    LOG_ROOT
        .get()
        .cloned()
        .unwrap_or_else(|| resolve_log_root(None))
}

// ============================================================================
// Configuration
// ============================================================================

/// Logging section of a service configuration file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level or full filter spec (e.g. "info,circuit_calc=debug")
    #[serde(default = "default_level")]
    pub level: String,
    /// Log root directory
    #[serde(default = "default_dir")]
    pub dir: String,
    /// Write daily rolling log files in addition to the console
    #[serde(default)]
    pub enable_file: bool,
    /// Use JSON lines for the file output
    #[serde(default)]
    pub enable_json: bool,
}

fn default_level() -> String {
    "info".to_string()
}

fn default_dir() -> String {
    "logs".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            dir: default_dir(),
            enable_file: false,
            enable_json: false,
        }
    }
}

/// Logger configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Service name (e.g., "circuitsrv"); used for file names
    pub service_name: String,
    /// Directory for log files
    pub log_dir: PathBuf,
    /// Filter spec applied to every layer
    pub filter: String,
    /// Write daily rolling files
    pub enable_file: bool,
    /// JSON format for the file output
    pub enable_json: bool,
    /// Colored console output
    pub ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            service_name: "unknown".to_string(),
            log_dir: get_log_root(),
            filter: "info".to_string(),
            enable_file: false,
            enable_json: false,
            ansi: true,
        }
    }
}

// Dynamic log level reload support
type EnvFilterReloadHandle = reload::Handle<EnvFilter, tracing_subscriber::Registry>;
static LOG_FILTER_HANDLE: OnceLock<EnvFilterReloadHandle> = OnceLock::new();
static CURRENT_LOG_LEVEL: OnceLock<Mutex<String>> = OnceLock::new();

fn store_guard(guard: WorkerGuard) {
    let guards = GUARDS.get_or_init(|| Mutex::new(Vec::new()));
    match guards.lock() {
        Ok(mut guards) => guards.push(guard),
        Err(poisoned) => poisoned.into_inner().push(guard),
    }
}

/// Initialize logging system with configuration
pub fn init_with_config(config: LogConfig) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_new(&config.filter)
        .map_err(|e| format!("Invalid log filter '{}': {}", config.filter, e))?;

    // Wrap EnvFilter with reload::Layer for dynamic level changes
    let (reload_filter, reload_handle) = reload::Layer::new(env_filter);

    let console_layer = fmt::layer()
        .with_ansi(config.ansi)
        .event_format(BracketedLevelFormat)
        .boxed();

    let file_layers = if config.enable_file {
        fs::create_dir_all(&config.log_dir)?;

        // Business log: {service}.log.YYYY-MM-DD, everything except access events
        let appender = tracing_appender::rolling::daily(
            &config.log_dir,
            format!("{}.log", config.service_name),
        );
        let (writer, guard) = tracing_appender::non_blocking(appender);
        store_guard(guard);

        let business_layer = if config.enable_json {
            fmt::layer()
                .json()
                .with_writer(writer)
                .with_target(true)
                .with_filter(filter::filter_fn(|metadata| {
                    metadata.target() != API_ACCESS_TARGET
                }))
                .boxed()
        } else {
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .event_format(BracketedLevelFormat)
                .with_filter(filter::filter_fn(|metadata| {
                    metadata.target() != API_ACCESS_TARGET
                }))
                .boxed()
        };

        // API log: {service}_api.log.YYYY-MM-DD, access events only
        let api_appender = tracing_appender::rolling::daily(
            &config.log_dir,
            format!("{}_api.log", config.service_name),
        );
        let (api_writer, api_guard) = tracing_appender::non_blocking(api_appender);
        store_guard(api_guard);

        let api_layer = fmt::layer()
            .with_writer(api_writer)
            .with_ansi(false)
            .event_format(BracketedLevelFormat)
            .with_filter(filter::filter_fn(|metadata| {
                metadata.target() == API_ACCESS_TARGET
            }))
            .boxed();

        Some(business_layer.and_then(api_layer))
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(reload_filter)
        .with(console_layer)
        .with(file_layers)
        .try_init()?;

    // Only record the handle once the subscriber is actually installed
    let _ = LOG_FILTER_HANDLE.set(reload_handle);
    let current = CURRENT_LOG_LEVEL.get_or_init(|| Mutex::new(String::new()));
    if let Ok(mut guard) = current.lock() {
        *guard = config.filter.clone();
    }

    if config.enable_file {
        tracing::info!("Logging: {} @ {:?}", config.service_name, config.log_dir);
    }
    Ok(())
}

/// Check a log filter spec without installing it
///
/// Accepts anything `EnvFilter` accepts: a plain level ("debug"), target
/// directives ("info,circuit_calc=debug") or bare targets ("circuit_calc").
pub fn validate_filter(spec: &str) -> Result<(), String> {
    if spec.trim().is_empty() {
        return Err("Log filter must not be empty".to_string());
    }
    EnvFilter::try_new(spec)
        .map(|_| ())
        .map_err(|e| format!("Invalid log level '{}': {}", spec, e))
}

/// Dynamically set log filter level at runtime
///
/// Accepts a plain level ("debug") or a full filter spec
/// ("info,circuit_calc=debug").
pub fn set_log_level(level: &str) -> Result<(), SetLogLevelError> {
    validate_filter(level).map_err(SetLogLevelError::InvalidFilter)?;
    let new_filter = EnvFilter::try_new(level)
        .map_err(|e| SetLogLevelError::InvalidFilter(e.to_string()))?;

    let handle = LOG_FILTER_HANDLE
        .get()
        .ok_or(SetLogLevelError::NotInitialized)?;

    handle
        .reload(new_filter)
        .map_err(|e| SetLogLevelError::Reload(e.to_string()))?;

    if let Some(current) = CURRENT_LOG_LEVEL.get() {
        if let Ok(mut guard) = current.lock() {
            *guard = level.to_string();
        }
    }

    tracing::info!("Log level changed to: {}", level);
    Ok(())
}

/// Why a runtime log level change was refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetLogLevelError {
    InvalidFilter(String),
    NotInitialized,
    Reload(String),
}

impl std::fmt::Display for SetLogLevelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidFilter(msg) => write!(f, "{}", msg),
            Self::NotInitialized => write!(f, "Logging not initialized with reload support"),
            Self::Reload(msg) => write!(f, "Failed to reload log filter: {}", msg),
        }
    }
}

impl std::error::Error for SetLogLevelError {}

/// Get current log filter level
pub fn get_log_level() -> String {
    CURRENT_LOG_LEVEL
        .get()
        .and_then(|m| m.lock().ok())
        .map(|guard| guard.clone())
        .filter(|level| !level.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Truncate a request body for logging
#[cfg(feature = "axum")]
fn truncate_body(body: &str, max_len: usize) -> String {
    if body.len() <= max_len {
        return body.to_string();
    }
    let mut cut = max_len;
    while !body.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}[truncated {} bytes]", &body[..cut], body.len() - cut)
}

/// Largest request body the access logger will buffer (axum's default body limit)
pub const MAX_LOGGED_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Whether the access logger may buffer this request's body
///
/// Only JSON bodies of write methods with a declared `content-length` within
/// [`MAX_LOGGED_BODY_BYTES`] are read.
#[cfg(feature = "axum")]
fn should_capture_body(method: &axum::http::Method, headers: &axum::http::HeaderMap) -> bool {
    use axum::http::header::{CONTENT_LENGTH, CONTENT_TYPE};

    let is_json = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.contains("application/json"));
    let within_limit = headers
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<usize>().ok())
        .is_some_and(|len| len <= MAX_LOGGED_BODY_BYTES);

    matches!(method.as_str(), "POST" | "PUT" | "PATCH") && is_json && within_limit
}

/// HTTP request logging middleware
///
/// Every request is logged on the `api_access` target with method, path,
/// query, status and duration. At DEBUG level JSON request bodies are also
/// recorded, truncated to 500 characters.
///
/// ```rust,ignore
/// use axum::{middleware, Router};
/// use common::logging::http_request_logger;
///
/// let app = Router::new()
///     // ... routes ...
///     .layer(middleware::from_fn(http_request_logger));
/// ```
#[cfg(feature = "axum")]
pub async fn http_request_logger(
    req: axum::extract::Request,
    next: axum::middleware::Next,
) -> axum::response::Response {
    use axum::body::Body;
    use std::time::Instant;
    use tracing::{debug, info, level_enabled};

    const MAX_BODY_LENGTH: usize = 500;

    let method = req.method().clone();
    let uri = req.uri().clone();
    let start = Instant::now();

    let should_read_body =
        level_enabled!(Level::DEBUG) && should_capture_body(&method, req.headers());

    let (req, body_str) = if should_read_body {
        let (parts, body) = req.into_parts();
        let bytes = match axum::body::to_bytes(body, MAX_LOGGED_BODY_BYTES).await {
            Ok(b) => b,
            Err(e) => {
                tracing::warn!("Failed to read request body: {}", e);
                let new_req = axum::extract::Request::from_parts(parts, Body::empty());
                return next.run(new_req).await;
            },
        };
        let body_str = match std::str::from_utf8(&bytes) {
            Ok(s) => truncate_body(s, MAX_BODY_LENGTH),
            Err(_) => "<binary data>".to_string(),
        };
        let new_req = axum::extract::Request::from_parts(parts, Body::from(bytes));
        (new_req, Some(body_str))
    } else {
        (req, None)
    };

    let response = next.run(req).await;

    let duration = start.elapsed();
    let status = response.status();

    match body_str {
        Some(body) => debug!(
            target: "api_access",
            method = %method,
            path = %uri.path(),
            query = %uri.query().unwrap_or("-"),
            status = %status.as_u16(),
            duration_ms = %duration.as_millis(),
            request_body = %body,
            "HTTP request (detailed)"
        ),
        None => info!(
            target: "api_access",
            method = %method,
            path = %uri.path(),
            query = %uri.query().unwrap_or("-"),
            status = %status.as_u16(),
            duration_ms = %duration.as_millis(),
            "HTTP request"
        ),
    }

    response
}
