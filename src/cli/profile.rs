//! LaunchProfile and config path resolution.
use std::{env, path::PathBuf};

use anyhow::{Context, Result};
use tracing::Level;

use crate::server::{config::CONFIG_ENV_KEY, Builder};

/// Settings given on the command line.
#[derive(Debug, Clone)]
pub struct LaunchProfile {
    pub config_path: Option<PathBuf>,
    pub log_level: Option<Level>,
    pub name: Option<String>,
}

impl LaunchProfile {
    /// CLI values win over anything loaded from a config file.
    pub fn apply(&self, mut builder: Builder) -> Builder {
        if let Some(level) = self.log_level {
            builder = builder.log_level(level);
        }
        if let Some(name) = &self.name {
            builder = builder.name(name.clone());
        }
        builder
    }
}

/// Resolve config path in the order: CLI override → env var → none.
pub fn resolve_config_path(override_path: Option<PathBuf>) -> Result<Option<PathBuf>> {
    let path = override_path.or_else(|| {
        env::var_os(CONFIG_ENV_KEY)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
    });

    let Some(path) = path else {
        return Ok(None);
    };
    if path.is_absolute() {
        return Ok(Some(path));
    }

    let cwd = env::current_dir().context("failed to obtain current directory")?;
    Ok(Some(cwd.join(path)))
}
