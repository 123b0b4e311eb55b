use std::{io, path::PathBuf};

use config::ConfigError as ConfigLoaderError;
use rmcp::model::ErrorData;
use thiserror::Error;

/// Errors that can occur while loading or validating configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to build (read) the configuration file.
    #[error("Failed to read configuration file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// Failed to deserialize TOML into a struct.
    #[error("Failed to parse configuration file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// Field failed validation.
    #[error("Configuration file {path} has invalid `{field}`: {message}")]
    InvalidField {
        path: PathBuf,
        field: &'static str,
        message: String,
    },
}

impl ConfigError {
    /// Helper to wrap `config::ConfigError` as a read failure.
    pub fn from_read_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::FileRead { path, source }
    }

    /// Helper to wrap `config::ConfigError` as a parse failure.
    pub fn from_parse_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::Parse { path, source }
    }
}

/// Failures surfaced by [`Builder::run`](crate::Builder::run).
#[derive(Debug, Error)]
pub enum FastMcpError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Server failed to start: {0}")]
    ServerStartFailed(String),
    #[error("Server stopped abnormally: {0}")]
    ServerStopped(String),
    #[error("Failed to initialize tracing: {0}")]
    Tracing(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Transport I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// Domain failure raised by a tool call.
///
/// Returned to the client as a result flagged with `is_error`, the session
/// keeps running.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ToolError {
    message: String,
}

impl ToolError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Failure while rendering prompt messages.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct PromptError {
    message: String,
}

impl PromptError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<PromptError> for ErrorData {
    fn from(value: PromptError) -> Self {
        ErrorData::internal_error(value.message, None)
    }
}

/// Failure while producing resource content.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ResourceError {
    message: String,
}

impl ResourceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<ResourceError> for ErrorData {
    fn from(value: ResourceError) -> Self {
        ErrorData::internal_error(value.message, None)
    }
}

/// Protocol error for an identifier that is not registered.
pub fn unknown_identifier(kind: &'static str, identifier: &str) -> ErrorData {
    ErrorData::invalid_params(format!("Unknown {kind}: {identifier}"), None)
}
