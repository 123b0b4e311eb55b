use async_trait::async_trait;

use crate::{
    capability::{Resource, ResourceContent},
    lib::errors::ResourceError,
};

const APP_SETTINGS: &str = r#"{
  "version": "1.0.0",
  "environment": "development",
  "features": {
    "darkMode": true,
    "notifications": true
  }
}"#;

/// Application settings as JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigResource;

#[async_trait]
impl Resource for ConfigResource {
    fn uri(&self) -> &str {
        "config://app/settings"
    }

    fn name(&self) -> &str {
        "App Settings"
    }

    fn description(&self) -> Option<&str> {
        Some("Application configuration and feature flags")
    }

    fn mime_type(&self) -> Option<&str> {
        Some("application/json")
    }

    async fn content(&self) -> Result<ResourceContent, ResourceError> {
        Ok(APP_SETTINGS.into())
    }
}

/// Host facts, computed on every read.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemInfoResource;

#[async_trait]
impl Resource for SystemInfoResource {
    fn uri(&self) -> &str {
        "system://info"
    }

    fn name(&self) -> &str {
        "System Information"
    }

    fn description(&self) -> Option<&str> {
        Some("Current system information")
    }

    fn mime_type(&self) -> Option<&str> {
        Some("text/plain")
    }

    async fn content(&self) -> Result<ResourceContent, ResourceError> {
        Ok(format!(
            "OS: {}\nArchitecture: {}\nServer Version: {}",
            std::env::consts::OS,
            std::env::consts::ARCH,
            env!("CARGO_PKG_VERSION"),
        )
        .into())
    }
}
