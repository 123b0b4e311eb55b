use tracing::{debug, info};

use super::{ServerConfig, CONFIG_ENV_KEY};

pub fn log_env_source(path: Option<&std::path::Path>) {
    match path {
        Some(path) => info!(
            target: "fast_mcp::config",
            path = %path.display(),
            "Loading configuration using FAST_MCP_CONFIG environment variable"
        ),
        None => debug!(
            target: "fast_mcp::config",
            env = CONFIG_ENV_KEY,
            "FAST_MCP_CONFIG not set; using builder defaults"
        ),
    }
}

pub fn log_loaded(config: &ServerConfig) {
    info!(
        target: "fast_mcp::config",
        path = %config.source_path.display(),
        name = config.server.name.as_deref().unwrap_or(""),
        version = config.server.version.as_deref().unwrap_or(""),
        transport = ?config.server.transport,
        log_level = ?config.server.log_level,
        sampling = ?config.server.sampling,
        "Configuration file loaded successfully"
    );
}
