use std::time::Duration;

use anyhow::Result;
use fast_mcp::{
    demo::{
        CodeReviewPrompt, ConfigResource, GreetingPrompt, GreetingTool, MathTool,
        SystemInfoResource, WeatherTool,
    },
    FastMcp, RegisteredPrompt, RegisteredResource, RegisteredTool, StaticResource,
};
use rmcp::{
    model::{
        CallToolRequestParam, ErrorCode, GetPromptRequestParam, PromptMessageRole,
        ReadResourceRequestParam, ResourceContents,
    },
    ServiceError,
};
use serde_json::json;
use tokio::time::timeout;

use crate::common::{arguments, connect, message_text, texts, Client, ServerTask};

async fn demo_server() -> Result<(Client, ServerTask)> {
    connect(
        FastMcp::builder()
            .name("In Memory")
            .version("0.9.0")
            .instructions("Use the demo tools.")
            .add_tools([
                RegisteredTool::from(WeatherTool),
                MathTool.into(),
                GreetingTool.into(),
            ])
            .add_resources([
                RegisteredResource::from(ConfigResource),
                SystemInfoResource.into(),
            ])
            .add_prompts([RegisteredPrompt::from(GreetingPrompt), CodeReviewPrompt.into()]),
    )
    .await
}

async fn shut_down(client: Client, server: ServerTask) -> Result<()> {
    client.cancel().await?;
    timeout(Duration::from_secs(5), server).await???;
    Ok(())
}

fn call(name: &'static str, value: serde_json::Value) -> CallToolRequestParam {
    CallToolRequestParam {
        name: name.into(),
        arguments: arguments(value),
    }
}

#[tokio::test]
async fn initialize_reports_identity_and_capabilities() -> Result<()> {
    let (client, server) = demo_server().await?;
    let info = client.peer_info().expect("server info after handshake");
    assert_eq!(info.server_info.name, "In Memory");
    assert_eq!(info.server_info.version, "0.9.0");
    assert_eq!(info.instructions.as_deref(), Some("Use the demo tools."));
    assert!(info.capabilities.tools.is_some());
    assert!(info.capabilities.resources.is_some());
    assert!(info.capabilities.prompts.is_some());
    assert!(info.capabilities.experimental.is_none());
    shut_down(client, server).await
}

#[tokio::test]
async fn empty_server_advertises_no_capabilities() -> Result<()> {
    let (client, server) = connect(FastMcp::builder().name("Empty")).await?;
    let info = client.peer_info().expect("server info after handshake");
    assert!(info.capabilities.tools.is_none());
    assert!(info.capabilities.resources.is_none());
    assert!(info.capabilities.prompts.is_none());
    shut_down(client, server).await
}

#[tokio::test]
async fn tools_are_listed_in_registration_order() -> Result<()> {
    let (client, server) = demo_server().await?;
    let listed = client.list_tools(None).await?;
    let names: Vec<&str> = listed.tools.iter().map(|tool| tool.name.as_ref()).collect();
    assert_eq!(names, vec!["get_weather", "calculate", "greet"]);
    let weather = &listed.tools[0];
    assert_eq!(
        weather.description.as_deref(),
        Some("Get current weather for a location")
    );
    assert!(weather
        .input_schema
        .get("properties")
        .and_then(|props| props.get("location"))
        .is_some());
    shut_down(client, server).await
}

#[tokio::test]
async fn tool_calls_return_text_content() -> Result<()> {
    let (client, server) = demo_server().await?;

    let weather = client
        .call_tool(call("get_weather", json!({ "location": "Lisbon", "unit": "fahrenheit" })))
        .await?;
    assert_eq!(texts(&weather.content), vec!["Weather in Lisbon: 72°F, Sunny"]);

    let sum = client
        .call_tool(call("calculate", json!({ "operation": "add", "a": 5, "b": 3 })))
        .await?;
    assert_ne!(sum.is_error, Some(true));
    assert_eq!(texts(&sum.content), vec!["Result: 8.0"]);

    let greeting = client
        .call_tool(call("greet", json!({ "name": "Ada", "formal": true })))
        .await?;
    assert_eq!(texts(&greeting.content), vec!["Good day, Ada."]);

    shut_down(client, server).await
}

#[tokio::test]
async fn tool_failure_is_an_error_result_and_server_keeps_serving() -> Result<()> {
    let (client, server) = demo_server().await?;

    let failed = client
        .call_tool(call("calculate", json!({ "operation": "divide", "a": 10, "b": 0 })))
        .await?;
    assert_eq!(failed.is_error, Some(true));
    assert_eq!(texts(&failed.content), vec!["Division by zero"]);

    let next = client
        .call_tool(call("calculate", json!({ "operation": "divide", "a": 7, "b": 2 })))
        .await?;
    assert_eq!(texts(&next.content), vec!["Result: 3.5"]);

    shut_down(client, server).await
}

#[tokio::test]
async fn unknown_tool_and_bad_arguments_are_protocol_errors() -> Result<()> {
    let (client, server) = demo_server().await?;

    match client.call_tool(call("teleport", json!({}))).await {
        Err(ServiceError::McpError(error)) => {
            assert_eq!(error.code, ErrorCode::INVALID_PARAMS);
            assert_eq!(error.message, "Unknown tool: teleport");
        }
        other => panic!("expected unknown tool error, got {other:?}"),
    }

    match client
        .call_tool(call("calculate", json!({ "operation": "modulo", "a": 1, "b": 2 })))
        .await
    {
        Err(ServiceError::McpError(error)) => {
            assert_eq!(error.code, ErrorCode::INVALID_PARAMS);
        }
        other => panic!("expected invalid params, got {other:?}"),
    }

    shut_down(client, server).await
}

#[tokio::test]
async fn resources_are_listed_and_read() -> Result<()> {
    let (client, server) = demo_server().await?;

    let listed = client.list_resources(None).await?;
    let uris: Vec<&str> = listed
        .resources
        .iter()
        .map(|resource| resource.uri.as_str())
        .collect();
    assert_eq!(uris, vec!["config://app/settings", "system://info"]);

    let read = client
        .read_resource(ReadResourceRequestParam {
            uri: "config://app/settings".into(),
        })
        .await?;
    match &read.contents[..] {
        [ResourceContents::TextResourceContents {
            uri,
            mime_type,
            text,
            ..
        }] => {
            assert_eq!(uri, "config://app/settings");
            assert_eq!(mime_type.as_deref(), Some("application/json"));
            let settings: serde_json::Value = serde_json::from_str(text)?;
            assert_eq!(settings["environment"], "development");
        }
        other => panic!("expected one text content, got {other:?}"),
    }

    match client
        .read_resource(ReadResourceRequestParam {
            uri: "config://missing".into(),
        })
        .await
    {
        Err(ServiceError::McpError(error)) => {
            assert_eq!(error.code, ErrorCode::RESOURCE_NOT_FOUND);
        }
        other => panic!("expected resource not found, got {other:?}"),
    }

    shut_down(client, server).await
}

#[tokio::test]
async fn prompts_are_listed_and_rendered() -> Result<()> {
    let (client, server) = demo_server().await?;

    let listed = client.list_prompts(None).await?;
    let names: Vec<&str> = listed.prompts.iter().map(|prompt| prompt.name.as_str()).collect();
    assert_eq!(names, vec!["greeting", "code_review"]);
    let greeting_arguments = listed.prompts[0]
        .arguments
        .as_ref()
        .expect("greeting prompt declares arguments");
    assert!(greeting_arguments
        .iter()
        .any(|argument| argument.name == "name" && argument.required == Some(true)));

    let greeting = client
        .get_prompt(GetPromptRequestParam {
            name: "greeting".into(),
            arguments: arguments(json!({ "name": "Lin", "formal": "true" })),
        })
        .await?;
    assert_eq!(greeting.messages.len(), 2);
    assert_eq!(greeting.messages[0].role, PromptMessageRole::User);
    assert_eq!(
        message_text(&greeting.messages[1]),
        "Good day, Lin. How may I assist you today?"
    );

    let review = client
        .get_prompt(GetPromptRequestParam {
            name: "code_review".into(),
            arguments: arguments(json!({ "language": "Rust" })),
        })
        .await?;
    assert_eq!(review.messages.len(), 4);
    assert_eq!(
        review.description.as_deref(),
        Some("Guide the assistant through a code review")
    );

    match client
        .get_prompt(GetPromptRequestParam {
            name: "haiku".into(),
            arguments: None,
        })
        .await
    {
        Err(ServiceError::McpError(error)) => {
            assert_eq!(error.message, "Unknown prompt: haiku");
        }
        other => panic!("expected unknown prompt error, got {other:?}"),
    }

    shut_down(client, server).await
}

#[tokio::test]
async fn duplicate_registrations_are_served_once() -> Result<()> {
    let (client, server) = connect(
        FastMcp::builder()
            .add_tools([RegisteredTool::from(WeatherTool), MathTool.into()])
            .add_tools([RegisteredTool::from(WeatherTool), GreetingTool.into()])
            .add_resources([StaticResource::new("memo://a", "First", "one")])
            .add_resources([StaticResource::new("memo://a", "Second", "two")]),
    )
    .await?;

    let tools = client.list_tools(None).await?;
    assert_eq!(tools.tools.len(), 3);

    let resources = client.list_resources(None).await?;
    assert_eq!(resources.resources.len(), 1);
    assert_eq!(resources.resources[0].name, "First");

    shut_down(client, server).await
}

#[tokio::test]
async fn sampling_is_advertised_as_experimental() -> Result<()> {
    let (client, server) = connect(
        FastMcp::builder()
            .add_tools([GreetingTool])
            .enable_sampling(true),
    )
    .await?;
    let info = client.peer_info().expect("server info after handshake");
    assert!(info
        .capabilities
        .experimental
        .as_ref()
        .is_some_and(|experimental| experimental.contains_key("sampling")));
    shut_down(client, server).await
}
