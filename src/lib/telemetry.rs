//! Telemetry initialization and runtime log helpers.

use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};

use crate::lib::errors::FastMcpError;

/// Initialize `tracing` and format developer logs on stderr.
///
/// `RUST_LOG` takes precedence over `level`. A no-op when a global
/// dispatcher is already installed.
pub fn init_tracing(level: Level) -> Result<(), FastMcpError> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_ascii_lowercase()));
    fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_writer(std::io::stderr)
        .try_init()
        .or_else(|err| {
            // Another caller may have won the race to install a subscriber.
            if tracing::dispatcher::has_been_set() {
                Ok(())
            } else {
                Err(FastMcpError::Tracing(err.to_string()))
            }
        })
}

/// Payload for logging MCP runtime state as structured telemetry.
#[derive(Debug)]
pub struct RuntimeModeTelemetry<'a> {
    pub server_name: &'a str,
    pub server_version: &'a str,
    pub transport: &'a str,
    pub tools: usize,
    pub resources: usize,
    pub prompts: usize,
    pub sampling: bool,
    pub shutdown_signals: &'a [&'static str],
}

/// Emit runtime mode to `tracing`.
pub fn emit_runtime_mode(telemetry: &RuntimeModeTelemetry<'_>) {
    info!(
        target: "fast_mcp::runtime",
        server_name = telemetry.server_name,
        server_version = telemetry.server_version,
        transport = telemetry.transport,
        tools = telemetry.tools,
        resources = telemetry.resources,
        prompts = telemetry.prompts,
        sampling = telemetry.sampling,
        shutdown_signals = ?telemetry.shutdown_signals,
        "Starting FastMCP server"
    );
}
