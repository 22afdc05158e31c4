//! Unified service bootstrap utilities
//!
//! Startup banner, logging initialization and development environment setup
//! shared by every service binary.

use crate::bootstrap_args::ServiceArgs;
use crate::logging::{self, LogConfig, LoggingConfig};
use tracing::info;

/// Service metadata for startup
#[derive(Debug, Clone)]
pub struct ServiceInfo {
    /// Service name (e.g., "circuitsrv")
    pub name: String,
    /// Service version
    pub version: String,
    /// Service description
    pub description: String,
    /// Default port
    pub default_port: u16,
}

impl ServiceInfo {
    /// Create new service info
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        description: impl Into<String>,
        default_port: u16,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            description: description.into(),
            default_port,
        }
    }
}

/// Print unified startup banner for any service
pub fn print_startup_banner(service: &ServiceInfo) {
    let banner = r#"
  ██████╗██╗██████╗  ██████╗██╗   ██╗██╗████████╗
 ██╔════╝██║██╔══██╗██╔════╝██║   ██║██║╚══██╔══╝
 ██║     ██║██████╔╝██║     ██║   ██║██║   ██║
 ██║     ██║██╔══██╗██║     ██║   ██║██║   ██║
 ╚██████╗██║██║  ██║╚██████╗╚██████╔╝██║   ██║
  ╚═════╝╚═╝╚═╝  ╚═╝ ╚═════╝ ╚═════╝ ╚═╝   ╚═╝
    "#;

    info!("{}", banner);
    info!("");
    info!(" {} v{}", service.name.to_uppercase(), service.version);
    info!(" {}", service.description);
    info!(" Default Port: {}", service.default_port);
    info!("");
}

/// Initialize logging for a service
///
/// Level priority: `--log-level`/`RUST_LOG` > `logging.level` from config.
/// Log root directory priority: `CIRCUIT_LOG_DIR` > `logging.dir` > "logs".
pub fn init_logging(
    service: &ServiceInfo,
    args: &ServiceArgs,
    logging_config: &LoggingConfig,
) -> anyhow::Result<()> {
    logging::init_log_root(Some(logging_config.dir.as_str()));

    let log_config = LogConfig {
        service_name: service.name.clone(),
        log_dir: logging::get_log_root().join(&service.name),
        filter: args.effective_log_level(&logging_config.level),
        enable_file: logging_config.enable_file,
        enable_json: logging_config.enable_json,
        ansi: !args.no_color,
    };

    logging::init_with_config(log_config).map_err(|e| anyhow::anyhow!("{}", e))?;
    Ok(())
}

/// Load environment variables in development mode
///
/// In debug builds, reads `.env` from the working directory. Release builds
/// expect the environment to be set externally.
///
/// Mutates the process environment, so call it before any runtime or other
/// thread is started.
pub fn load_development_env() {
    #[cfg(debug_assertions)]
    {
        let _ = load_env_file(std::path::Path::new(".env"));
    }
}

/// Set every `KEY=VALUE` of an env file that is not already set
///
/// Returns how many variables were set. Must run while the process is still
/// single-threaded.
pub fn load_env_file(path: &std::path::Path) -> std::io::Result<usize> {
    let content = std::fs::read_to_string(path)?;
    let mut applied = 0;
    for (key, value) in parse_env_lines(&content) {
        if std::env::var_os(key).is_none() {
            std::env::set_var(key, value);
            applied += 1;
        }
    }
    Ok(applied)
}

/// Parse `KEY=VALUE` lines, skipping comments and blank lines
fn parse_env_lines(content: &str) -> Vec<(&str, &str)> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.trim(), value.trim()))
        .filter(|(key, _)| !key.is_empty())
        .collect()
}
