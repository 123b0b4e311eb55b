//! MCP server startup, request routing, and shutdown signal handling.
mod handler;
mod server_info;
pub mod signals;
mod startup;

pub use handler::{FastServer, ServerIdentity};
pub use server_info::{default_server_name, DEFAULT_SERVER_VERSION};
pub use signals::{ShutdownSignal, UnknownSignal, DEFAULT_SHUTDOWN_SIGNALS};
pub use startup::{
    launch, validate_transport, HookFuture, LaunchPlan, LifecycleHook, RuntimeExit,
};
