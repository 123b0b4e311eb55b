use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use anyhow::Result;
use fast_mcp::{demo::GreetingTool, FastMcp, FastMcpError, Transport};
use rmcp::model::CallToolRequestParam;
use serde_json::json;
use tokio::time::timeout;
use tracing::Level;

use crate::common::{arguments, connect, CapturedLogs};

type Events = Arc<Mutex<Vec<&'static str>>>;

fn record(events: &Events, event: &'static str) {
    events.lock().expect("events lock").push(event);
}

#[tokio::test]
async fn hooks_run_around_the_session() -> Result<()> {
    let events: Events = Arc::default();
    let on_start = Arc::clone(&events);
    let on_shutdown = Arc::clone(&events);

    let (client, server) = connect(
        FastMcp::builder()
            .add_tools([GreetingTool])
            .on_start(move || async move { record(&on_start, "start") })
            .on_shutdown(move || async move { record(&on_shutdown, "shutdown") }),
    )
    .await?;

    assert_eq!(*events.lock().expect("events lock"), vec!["start"]);

    client.cancel().await?;
    timeout(Duration::from_secs(5), server).await???;

    assert_eq!(
        *events.lock().expect("events lock"),
        vec!["start", "shutdown"]
    );
    Ok(())
}

#[tokio::test]
async fn closing_the_client_ends_run_cleanly() -> Result<()> {
    let (client, server) = connect(FastMcp::builder()).await?;
    drop(client);
    let outcome = timeout(Duration::from_secs(5), server).await??;
    assert!(outcome.is_ok(), "run should return Ok: {outcome:?}");
    Ok(())
}

#[tokio::test]
async fn http_transport_is_rejected_without_running_hooks() {
    let events: Events = Arc::default();
    let on_start = Arc::clone(&events);

    let outcome = FastMcp::builder()
        .transport(Transport::Http { port: 8080 })
        .on_start(move || async move { record(&on_start, "start") })
        .run()
        .await;

    assert!(matches!(outcome, Err(FastMcpError::InvalidConfiguration(_))));
    assert!(events.lock().expect("events lock").is_empty());
}

#[tokio::test]
async fn custom_byte_stream_transport_is_served() -> Result<()> {
    let (server_stream, client_stream) = tokio::io::duplex(16 * 1024);
    let server = tokio::spawn(
        FastMcp::builder()
            .add_tools([GreetingTool])
            .transport(Transport::custom(server_stream))
            .shutdown_signals([])
            .run(),
    );
    let client =
        rmcp::serve_client(rmcp::model::ClientInfo::default(), client_stream).await?;
    let tools = client.list_tools(None).await?;
    assert_eq!(tools.tools.len(), 1);
    client.cancel().await?;
    timeout(Duration::from_secs(5), server).await???;
    Ok(())
}

#[tokio::test]
async fn custom_logger_receives_handler_events() -> Result<()> {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_ansi(false)
        .with_max_level(Level::DEBUG)
        .finish();

    let (client, server) = connect(
        FastMcp::builder()
            .name("Logged")
            .add_tools([GreetingTool])
            .logger(subscriber),
    )
    .await?;

    let greeted = client
        .call_tool(CallToolRequestParam {
            name: "greet".into(),
            arguments: arguments(json!({ "name": "Ada" })),
        })
        .await?;
    assert_ne!(greeted.is_error, Some(true));
    let unknown = client
        .call_tool(CallToolRequestParam {
            name: "teleport".into(),
            arguments: None,
        })
        .await;
    assert!(unknown.is_err());

    client.cancel().await?;
    timeout(Duration::from_secs(5), server).await???;

    let captured = logs.contents();
    assert!(captured.contains("Starting FastMCP server"), "{captured}");
    assert!(captured.contains("Calling tool"), "{captured}");
    assert!(captured.contains("Unknown tool requested"), "{captured}");
    Ok(())
}
