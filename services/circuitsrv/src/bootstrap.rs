//! Service Bootstrap and Initialization
//!
//! Command line, configuration loading, logging setup and bind address
//! resolution for circuitsrv. Shared pieces come from `common`.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tracing::{debug, info};

use common::service_bootstrap::ServiceInfo;
use common::DEFAULT_API_HOST;
use errors::{CircuitError, CircuitResult};

use crate::config::{validate_log_filter, CircuitsrvConfig, DEFAULT_PORT, SERVICE_NAME};

pub use common::bootstrap_args::ServiceArgs;

/// Command-line arguments for circuitsrv
#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "circuitsrv",
    version = env!("CARGO_PKG_VERSION"),
    about = "Circuit Calculator Service",
    long_about = None
)]
pub struct Args {
    /// Log level or filter (trace, debug, info, warn, error); overrides the config file
    #[arg(short = 'l', long, env = "RUST_LOG")]
    pub log_level: Option<String>,

    /// Bind address for API server (e.g. 127.0.0.1:6010)
    #[arg(short = 'b', long)]
    pub bind_address: Option<String>,

    /// Configuration file (YAML)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Validation mode - only validate configuration without starting service
    #[arg(long)]
    pub validate: bool,
}

impl From<Args> for ServiceArgs {
    fn from(args: Args) -> Self {
        ServiceArgs {
            log_level: args.log_level,
            bind_address: args.bind_address,
            config: args.config,
            no_color: args.no_color,
            validate: args.validate,
        }
    }
}

/// Service identity reported by the banner and `/health`
pub fn service_info(config: &CircuitsrvConfig) -> ServiceInfo {
    ServiceInfo::new(
        config.service.name.clone(),
        env!("CARGO_PKG_VERSION"),
        config.service.description.clone(),
        DEFAULT_PORT,
    )
}

/// Load and validate configuration
///
/// A `--log-level` override is checked with the same rules as `logging.level`.
pub fn load_config(args: &ServiceArgs) -> CircuitResult<CircuitsrvConfig> {
    let config = CircuitsrvConfig::load(args.config.as_deref())?;
    config.validate()?;
    validate_log_level_override(args)?;
    debug!("Configuration loaded for {}", SERVICE_NAME);
    Ok(config)
}

/// Reject an unusable `--log-level` / `RUST_LOG` value before logging starts
pub fn validate_log_level_override(args: &ServiceArgs) -> CircuitResult<()> {
    match args.log_level.as_deref().filter(|l| !l.trim().is_empty()) {
        Some(level) => validate_log_filter("--log-level", level),
        None => Ok(()),
    }
}

/// Initialize logging system with command-line arguments
///
/// Log root directory priority:
/// 1. CIRCUIT_LOG_DIR environment variable
/// 2. logging.dir from the configuration file
/// 3. Default "logs"
pub fn initialize_logging(
    args: &ServiceArgs,
    service_info: &ServiceInfo,
    config: &CircuitsrvConfig,
) -> CircuitResult<()> {
    common::service_bootstrap::init_logging(service_info, args, &config.logging)
        .map_err(|e| CircuitError::StartupFailed(format!("Failed to init logging: {}", e)))
}

/// Determine bind address from multiple sources
/// Priority: CLI > Config > ENV > Default
pub fn determine_bind_address(
    cli_arg: Option<String>,
    config_host: &str,
    config_port: u16,
) -> String {
    if let Some(addr) = cli_arg.filter(|a| !a.trim().is_empty()) {
        info!("Using bind address from command line: {}", addr);
        return addr;
    }

    let is_config_default = config_port == DEFAULT_PORT || config_port == 0;

    if !is_config_default {
        let config_addr = format!("{}:{}", config_host, config_port);
        info!("Using bind address from configuration: {}", config_addr);
        return config_addr;
    }

    let port = common::config_loader::get_config_value(
        Some(config_port),
        is_config_default,
        "SERVICE_PORT",
        DEFAULT_PORT,
    );

    let host = common::config_loader::get_string_config(
        Some(config_host.to_string()),
        config_host.is_empty() || config_host == DEFAULT_API_HOST,
        "SERVICE_HOST",
        DEFAULT_API_HOST.to_string(),
    );

    format!("{}:{}", host, port)
}

/// Parse the resolved bind address
pub fn parse_bind_address(bind_address: &str) -> CircuitResult<SocketAddr> {
    bind_address.parse().map_err(|e| CircuitError::InvalidConfig {
        field: "bind_address".to_string(),
        reason: format!("'{}': {}", bind_address, e),
    })
}
