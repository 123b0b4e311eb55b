use async_trait::async_trait;
use rmcp::model::Content;
use schemars::JsonSchema;
use serde::Deserialize;

use crate::{capability::Tool, lib::errors::ToolError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct MathParameters {
    pub operation: Operation,
    pub a: f64,
    pub b: f64,
}

/// Four-function calculator.
#[derive(Debug, Clone, Copy, Default)]
pub struct MathTool;

impl MathTool {
    /// Apply `operation` to the operands; dividing by zero is an error.
    pub fn evaluate(operation: Operation, a: f64, b: f64) -> Result<f64, ToolError> {
        match operation {
            Operation::Add => Ok(a + b),
            Operation::Subtract => Ok(a - b),
            Operation::Multiply => Ok(a * b),
            Operation::Divide if b == 0.0 => Err(ToolError::new("Division by zero")),
            Operation::Divide => Ok(a / b),
        }
    }
}

#[async_trait]
impl Tool for MathTool {
    type Parameters = MathParameters;

    fn name(&self) -> &str {
        "calculate"
    }

    fn description(&self) -> Option<&str> {
        Some("Perform basic math operations")
    }

    async fn call(&self, parameters: Self::Parameters) -> Result<Vec<Content>, ToolError> {
        let result = Self::evaluate(parameters.operation, parameters.a, parameters.b)?;
        // `{:?}` keeps the fractional part, so 8 renders as "8.0".
        Ok(vec![Content::text(format!("Result: {result:?}"))])
    }
}
