use async_trait::async_trait;
use rmcp::model::Content;
use schemars::JsonSchema;
use serde::Deserialize;

use crate::{capability::Tool, lib::errors::ToolError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct WeatherParameters {
    /// City or region to report on
    pub location: String,
    pub unit: Option<TemperatureUnit>,
}

/// Canned weather report.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeatherTool;

#[async_trait]
impl Tool for WeatherTool {
    type Parameters = WeatherParameters;

    fn name(&self) -> &str {
        "get_weather"
    }

    fn description(&self) -> Option<&str> {
        Some("Get current weather for a location")
    }

    async fn call(&self, parameters: Self::Parameters) -> Result<Vec<Content>, ToolError> {
        let temperature = match parameters.unit.unwrap_or_default() {
            TemperatureUnit::Celsius => "22°C",
            TemperatureUnit::Fahrenheit => "72°F",
        };
        Ok(vec![Content::text(format!(
            "Weather in {}: {temperature}, Sunny",
            parameters.location
        ))])
    }
}
