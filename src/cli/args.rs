//! CLI argument definitions and `LaunchProfile` construction.
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::Level;

use super::{resolve_config_path, LaunchProfile};

/// Command-line arguments for `fast-mcp-example`.
#[derive(Debug, Clone, Parser)]
#[command(
    author,
    version,
    about = "FastMCP example server (stdio)",
    long_about = None
)]
pub struct LaunchProfileArgs {
    /// Path to a TOML config file (overrides FAST_MCP_CONFIG).
    #[arg(long = "config")]
    pub config_override: Option<PathBuf>,
    /// Log level: error, warn, info, debug, or trace.
    #[arg(long = "log-level")]
    pub log_level: Option<Level>,
    /// Server name reported to clients.
    #[arg(long = "name")]
    pub name: Option<String>,
}

impl LaunchProfileArgs {
    /// Build a `LaunchProfile` from CLI args and environment variables.
    pub fn build(self) -> Result<LaunchProfile> {
        let config_path = resolve_config_path(self.config_override)?;

        Ok(LaunchProfile {
            config_path,
            log_level: self.log_level,
            name: self.name.filter(|name| !name.trim().is_empty()),
        })
    }
}
