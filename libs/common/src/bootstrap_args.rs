//! Common command-line arguments for all services
//!
//! Individual services declare their own clap `Args` and convert into
//! [`ServiceArgs`] for the shared bootstrap helpers.

use std::path::PathBuf;

#[cfg(feature = "cli")]
use clap::Parser;

/// Common service startup arguments
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "cli", derive(Parser))]
#[cfg_attr(feature = "cli", clap(author, version, about))]
pub struct ServiceArgs {
    /// Log level or filter spec (overrides the configuration file)
    #[cfg_attr(feature = "cli", clap(short = 'l', long, env = "RUST_LOG"))]
    pub log_level: Option<String>,

    /// Optional bind address override (e.g., 127.0.0.1:6010)
    #[cfg_attr(feature = "cli", clap(short = 'b', long, env = "BIND_ADDRESS"))]
    pub bind_address: Option<String>,

    /// Configuration file path
    #[cfg_attr(feature = "cli", clap(short = 'c', long))]
    pub config: Option<PathBuf>,

    /// Disable colored output (useful for log files)
    #[cfg_attr(feature = "cli", clap(long))]
    pub no_color: bool,

    /// Only validate configuration without starting service
    #[cfg_attr(feature = "cli", clap(long))]
    pub validate: bool,
}

impl ServiceArgs {
    /// Effective log filter: command line wins over the configured level
    pub fn effective_log_level(&self, configured: &str) -> String {
        self.log_level
            .clone()
            .filter(|l| !l.trim().is_empty())
            .unwrap_or_else(|| configured.to_string())
    }
}
