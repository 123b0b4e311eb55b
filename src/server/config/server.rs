use std::path::Path;

use serde::Deserialize;
use tracing::Level;

use crate::{lib::errors::ConfigError, server::runtime::ShutdownSignal};

pub const DEFAULT_HTTP_PORT: u16 = 8787;

/// Transport named in the configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportSetting {
    Stdio,
    Http { port: u16 },
}

/// `[server]` settings. Unset fields leave the builder untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServerSection {
    pub name: Option<String>,
    pub version: Option<String>,
    pub instructions: Option<String>,
    pub log_level: Option<Level>,
    pub sampling: Option<bool>,
    pub transport: Option<TransportSetting>,
    pub shutdown_signals: Option<Vec<ShutdownSignal>>,
}

#[derive(Debug, Deserialize, Default)]
pub struct RawServerSection {
    pub name: Option<String>,
    pub version: Option<String>,
    pub instructions: Option<String>,
    pub log_level: Option<String>,
    pub sampling: Option<bool>,
    pub transport: Option<String>,
    pub port: Option<u16>,
    pub shutdown_signals: Option<Vec<String>>,
}

pub fn parse_server_section(
    raw: Option<RawServerSection>,
    path: &Path,
) -> Result<ServerSection, ConfigError> {
    let server_raw = raw.unwrap_or_default();

    let name = non_blank(server_raw.name, "server.name", path)?;
    let version = non_blank(server_raw.version, "server.version", path)?;
    let log_level = server_raw
        .log_level
        .map(|value| parse_log_level(&value, path))
        .transpose()?;
    let transport = server_raw
        .transport
        .map(|value| parse_transport(&value, server_raw.port, path))
        .transpose()?;
    let shutdown_signals = server_raw
        .shutdown_signals
        .map(|values| parse_signals(&values, path))
        .transpose()?;

    Ok(ServerSection {
        name,
        version,
        instructions: server_raw.instructions,
        log_level,
        sampling: server_raw.sampling,
        transport,
        shutdown_signals,
    })
}

fn non_blank(
    value: Option<String>,
    field: &'static str,
    path: &Path,
) -> Result<Option<String>, ConfigError> {
    match value {
        Some(text) if text.trim().is_empty() => Err(ConfigError::InvalidField {
            path: path.to_path_buf(),
            field,
            message: "Must not be blank".into(),
        }),
        other => Ok(other),
    }
}

fn parse_log_level(value: &str, path: &Path) -> Result<Level, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidField {
        path: path.to_path_buf(),
        field: "server.log_level",
        message: format!("Unknown level `{value}`; use trace, debug, info, warn, or error"),
    })
}

fn parse_transport(
    value: &str,
    port: Option<u16>,
    path: &Path,
) -> Result<TransportSetting, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "stdio" => Ok(TransportSetting::Stdio),
        "http" => {
            let port = port.unwrap_or(DEFAULT_HTTP_PORT);
            validate_port(port, path)?;
            Ok(TransportSetting::Http { port })
        }
        _ => Err(ConfigError::InvalidField {
            path: path.to_path_buf(),
            field: "server.transport",
            message: format!("Unknown transport `{value}`; use `stdio` or `http`"),
        }),
    }
}

fn parse_signals(values: &[String], path: &Path) -> Result<Vec<ShutdownSignal>, ConfigError> {
    values
        .iter()
        .map(|value| {
            value.parse().map_err(|err| ConfigError::InvalidField {
                path: path.to_path_buf(),
                field: "server.shutdown_signals",
                message: format!("{err}"),
            })
        })
        .collect()
}

fn validate_port(port: u16, path: &Path) -> Result<(), ConfigError> {
    if (1024..=65535).contains(&port) {
        return Ok(());
    }

    Err(ConfigError::InvalidField {
        path: path.to_path_buf(),
        field: "server.port",
        message: "Use a port in the range 1024-65535".into(),
    })
}
