//! CLI entrypoint module structure.
pub mod args;
pub mod profile;

pub use args::LaunchProfileArgs;
pub use profile::{resolve_config_path, LaunchProfile};
