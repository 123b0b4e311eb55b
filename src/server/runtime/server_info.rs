use std::{env, path::Path};

/// Version reported when the builder is not given one.
pub const DEFAULT_SERVER_VERSION: &str = "1.0.0";

/// Server name reported when the builder is not given one: the running
/// executable's file stem, or the crate name when that is unavailable.
pub fn default_server_name() -> String {
    env::current_exe()
        .ok()
        .as_deref()
        .and_then(Path::file_stem)
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .map(str::to_owned)
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_owned())
}
