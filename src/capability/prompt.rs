//! Prompt contract and its type-erased handle.
use std::{fmt, sync::Arc};

use async_trait::async_trait;
use rmcp::model::{
    ErrorData, GetPromptResult, JsonObject, Prompt as PromptDescriptor, PromptArgument,
    PromptMessage, PromptMessageRole,
};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    capability::schema::{object_schema, property_types, required_properties},
    lib::errors::PromptError,
};

/// A parameterized template producing a conversation message sequence.
#[async_trait]
pub trait Prompt: Send + Sync + 'static {
    type Arguments: DeserializeOwned + JsonSchema + Send + 'static;

    fn name(&self) -> &str;

    fn description(&self) -> Option<&str> {
        None
    }

    async fn messages(&self, arguments: Self::Arguments)
        -> Result<Vec<PromptMessage>, PromptError>;
}

/// User-role text message.
pub fn user(text: impl Into<String>) -> PromptMessage {
    PromptMessage::new_text(PromptMessageRole::User, text.into())
}

/// Assistant-role text message.
pub fn assistant(text: impl Into<String>) -> PromptMessage {
    PromptMessage::new_text(PromptMessageRole::Assistant, text.into())
}

/// Argument descriptors for `T`, one per schema property.
pub fn prompt_arguments<T: JsonSchema>() -> Vec<PromptArgument> {
    let schema = object_schema::<T>();
    let required = required_properties(&schema);
    let Some(properties) = schema.get("properties").and_then(Value::as_object) else {
        return Vec::new();
    };

    properties
        .iter()
        .map(|(name, property)| PromptArgument {
            name: name.clone(),
            title: None,
            description: property
                .get("description")
                .and_then(Value::as_str)
                .map(str::to_owned),
            required: Some(required.contains(&name.as_str())),
        })
        .collect()
}

#[async_trait]
trait DynPrompt: Send + Sync {
    fn key(&self) -> &str;
    fn summary(&self) -> Option<&str>;
    fn descriptor(&self) -> PromptDescriptor;
    async fn render(&self, arguments: Option<JsonObject>) -> Result<GetPromptResult, ErrorData>;
}

#[async_trait]
impl<P: Prompt> DynPrompt for P {
    fn key(&self) -> &str {
        Prompt::name(self)
    }

    fn summary(&self) -> Option<&str> {
        Prompt::description(self)
    }

    fn descriptor(&self) -> PromptDescriptor {
        let arguments = prompt_arguments::<P::Arguments>();
        PromptDescriptor::new(
            Prompt::name(self),
            Prompt::description(self),
            (!arguments.is_empty()).then_some(arguments),
        )
    }

    async fn render(&self, arguments: Option<JsonObject>) -> Result<GetPromptResult, ErrorData> {
        let arguments: P::Arguments =
            decode_arguments(arguments.unwrap_or_default()).map_err(|err| {
                ErrorData::invalid_params(
                    format!("Invalid arguments for prompt {}: {err}", Prompt::name(self)),
                    None,
                )
            })?;
        let messages = self.messages(arguments).await?;
        Ok(GetPromptResult {
            description: Prompt::description(self).map(str::to_owned),
            messages,
        })
    }
}

/// Decode prompt arguments, retrying with string scalars coerced.
///
/// Clients send prompt arguments as strings, so `"true"` or `"3"` must still
/// decode into `bool` or numeric fields. Only properties whose schema type is
/// boolean, number, or integer are coerced; string fields keep their text.
fn decode_arguments<T: DeserializeOwned + JsonSchema>(
    arguments: JsonObject,
) -> Result<T, serde_json::Error> {
    match serde_json::from_value(Value::Object(arguments.clone())) {
        Ok(decoded) => Ok(decoded),
        Err(err) => {
            let schema = object_schema::<T>();
            let coerced: JsonObject = arguments
                .into_iter()
                .map(|(key, value)| {
                    let value = coerce_scalar(value, &property_types(&schema, &key));
                    (key, value)
                })
                .collect();
            serde_json::from_value(Value::Object(coerced)).map_err(|_| err)
        }
    }
}

fn coerce_scalar(value: Value, accepted: &[&str]) -> Value {
    let Value::String(text) = value else {
        return value;
    };
    match serde_json::from_str::<Value>(&text) {
        Ok(parsed @ Value::Bool(_)) if accepted.contains(&"boolean") => parsed,
        Ok(parsed @ Value::Number(_))
            if accepted.contains(&"number") || accepted.contains(&"integer") =>
        {
            parsed
        }
        _ => Value::String(text),
    }
}

/// Cloneable handle to a registered prompt.
#[derive(Clone)]
pub struct RegisteredPrompt {
    inner: Arc<dyn DynPrompt>,
}

impl RegisteredPrompt {
    pub fn new<P: Prompt>(prompt: P) -> Self {
        Self {
            inner: Arc::new(prompt),
        }
    }

    pub fn name(&self) -> &str {
        self.inner.key()
    }

    pub fn description(&self) -> Option<&str> {
        self.inner.summary()
    }

    /// Descriptor advertised in `prompts/list`.
    pub fn descriptor(&self) -> PromptDescriptor {
        self.inner.descriptor()
    }

    /// Decode `arguments` and render the prompt messages.
    pub async fn get(&self, arguments: Option<JsonObject>) -> Result<GetPromptResult, ErrorData> {
        self.inner.render(arguments).await
    }
}

impl<P: Prompt> From<P> for RegisteredPrompt {
    fn from(prompt: P) -> Self {
        Self::new(prompt)
    }
}

impl fmt::Debug for RegisteredPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredPrompt")
            .field("name", &self.name())
            .finish()
    }
}
