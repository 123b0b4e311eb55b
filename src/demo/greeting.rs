use async_trait::async_trait;
use rmcp::model::Content;
use schemars::JsonSchema;
use serde::Deserialize;

use crate::{capability::Tool, lib::errors::ToolError};

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GreetingParameters {
    pub name: String,
    pub formal: Option<bool>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GreetingTool;

#[async_trait]
impl Tool for GreetingTool {
    type Parameters = GreetingParameters;

    fn name(&self) -> &str {
        "greet"
    }

    fn description(&self) -> Option<&str> {
        Some("Generate a greeting message")
    }

    async fn call(&self, parameters: Self::Parameters) -> Result<Vec<Content>, ToolError> {
        let greeting = if parameters.formal == Some(true) {
            format!("Good day, {}.", parameters.name)
        } else {
            format!("Hey {}!", parameters.name)
        };
        Ok(vec![Content::text(greeting)])
    }
}
