//! Fluent builder for MCP servers on top of `rmcp`.
//!
//! Register tools, resources, and prompts on a [`Builder`], pick a
//! [`Transport`], and `run` it:
//!
//! ```no_run
//! use fast_mcp::{demo::WeatherTool, FastMcp};
//!
//! # async fn serve() -> Result<(), fast_mcp::FastMcpError> {
//! FastMcp::builder()
//!     .name("weather")
//!     .add_tools([WeatherTool])
//!     .run()
//!     .await
//! # }
//! ```

#[path = "lib/mod.rs"]
pub mod lib_mod;
pub use lib_mod as lib;
pub mod capability;
pub mod cli;
pub mod demo;
pub mod server;

pub use capability::{
    assistant, user, Prompt, RegisteredPrompt, RegisteredResource, RegisteredTool, Resource,
    ResourceContent, StaticResource, Tool,
};
pub use lib::errors::{ConfigError, FastMcpError, PromptError, ResourceError, ToolError};
pub use server::{
    runtime::{ShutdownSignal, DEFAULT_SHUTDOWN_SIGNALS},
    transport::Transport,
    Builder,
};

/// Entry point for configuring a server.
#[derive(Debug, Clone, Copy)]
pub struct FastMcp;

impl FastMcp {
    pub fn builder() -> Builder {
        Builder::new()
    }
}
