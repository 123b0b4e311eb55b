//! Tool contract and its type-erased handle.
use std::{borrow::Cow, fmt, sync::Arc};

use async_trait::async_trait;
use rmcp::model::{CallToolResult, Content, ErrorData, JsonObject, Tool as ToolDescriptor};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::{capability::schema::object_schema, lib::errors::ToolError};

/// An invocable unit exposed to MCP clients.
///
/// The input schema advertised in `tools/list` is derived from
/// [`Tool::Parameters`].
#[async_trait]
pub trait Tool: Send + Sync + 'static {
    type Parameters: DeserializeOwned + JsonSchema + Send + 'static;

    fn name(&self) -> &str;

    fn description(&self) -> Option<&str> {
        None
    }

    async fn call(&self, parameters: Self::Parameters) -> Result<Vec<Content>, ToolError>;
}

#[async_trait]
trait DynTool: Send + Sync {
    fn key(&self) -> &str;
    fn summary(&self) -> Option<&str>;
    fn descriptor(&self) -> ToolDescriptor;
    async fn invoke(&self, arguments: Option<JsonObject>) -> Result<CallToolResult, ErrorData>;
}

#[async_trait]
impl<T: Tool> DynTool for T {
    fn key(&self) -> &str {
        Tool::name(self)
    }

    fn summary(&self) -> Option<&str> {
        Tool::description(self)
    }

    fn descriptor(&self) -> ToolDescriptor {
        let mut descriptor = ToolDescriptor::new(
            Tool::name(self).to_owned(),
            "",
            object_schema::<T::Parameters>(),
        );
        descriptor.description = Tool::description(self).map(|text| Cow::Owned(text.to_owned()));
        descriptor
    }

    async fn invoke(&self, arguments: Option<JsonObject>) -> Result<CallToolResult, ErrorData> {
        let raw = Value::Object(arguments.unwrap_or_default());
        let parameters: T::Parameters = serde_json::from_value(raw).map_err(|err| {
            ErrorData::invalid_params(
                format!("Invalid arguments for tool {}: {err}", Tool::name(self)),
                None,
            )
        })?;

        match self.call(parameters).await {
            Ok(content) => Ok(CallToolResult::success(content)),
            Err(err) => {
                warn!(
                    target: "fast_mcp::handler",
                    tool = Tool::name(self),
                    error = %err,
                    "Tool call failed"
                );
                Ok(CallToolResult::error(vec![Content::text(err.message().to_owned())]))
            }
        }
    }
}

/// Cloneable handle to a registered tool.
#[derive(Clone)]
pub struct RegisteredTool {
    inner: Arc<dyn DynTool>,
}

impl RegisteredTool {
    pub fn new<T: Tool>(tool: T) -> Self {
        Self {
            inner: Arc::new(tool),
        }
    }

    pub fn name(&self) -> &str {
        self.inner.key()
    }

    pub fn description(&self) -> Option<&str> {
        self.inner.summary()
    }

    /// Descriptor advertised in `tools/list`.
    pub fn descriptor(&self) -> ToolDescriptor {
        self.inner.descriptor()
    }

    /// Decode `arguments` and run the tool.
    ///
    /// Undecodable arguments are a protocol error; a [`ToolError`] becomes a
    /// result with `is_error` set.
    pub async fn call(&self, arguments: Option<JsonObject>) -> Result<CallToolResult, ErrorData> {
        self.inner.invoke(arguments).await
    }
}

impl<T: Tool> From<T> for RegisteredTool {
    fn from(tool: T) -> Self {
        Self::new(tool)
    }
}

impl fmt::Debug for RegisteredTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredTool")
            .field("name", &self.name())
            .finish()
    }
}
