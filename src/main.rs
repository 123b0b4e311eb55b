//! Entry point for the FastMCP example server.
use std::process::ExitCode;

use clap::Parser;
use fast_mcp::{
    cli::{LaunchProfile, LaunchProfileArgs},
    demo::{
        CodeReviewPrompt, ConfigResource, GreetingPrompt, GreetingTool, MathTool,
        SystemInfoResource, WeatherTool,
    },
    server::{config::ServerConfig, runtime::RuntimeExit},
    FastMcp, FastMcpError, RegisteredPrompt, RegisteredResource, RegisteredTool,
};
use tracing::info;

fn main() -> ExitCode {
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => return RuntimeExit::from_error(FastMcpError::Io(err)).report(),
    };

    let outcome = runtime.block_on(bootstrap());
    // A stdin read can still be parked on a blocking thread after a signal.
    runtime.shutdown_background();

    match outcome {
        Ok(_) => ExitCode::SUCCESS,
        Err(exit) => exit.report(),
    }
}

async fn bootstrap() -> Result<(), RuntimeExit> {
    let profile = LaunchProfileArgs::parse()
        .build()
        .map_err(RuntimeExit::from_error)?;
    run_server(profile).await
}

async fn run_server(profile: LaunchProfile) -> Result<(), RuntimeExit> {
    let config = match &profile.config_path {
        Some(path) => Some(ServerConfig::load_from_path(path.clone())),
        None => ServerConfig::load_from_env().transpose(),
    }
    .transpose()
    .map_err(RuntimeExit::from_error)?;

    let tools = [
        RegisteredTool::from(WeatherTool),
        MathTool.into(),
        GreetingTool.into(),
    ];
    let tool_names = tools
        .iter()
        .map(RegisteredTool::name)
        .collect::<Vec<_>>()
        .join(", ");
    let tool_count = tools.len();

    let mut builder = FastMcp::builder()
        .name("FastMCP Example Server")
        .version(env!("CARGO_PKG_VERSION"));
    if let Some(config) = &config {
        builder = builder.apply_config(config);
    }

    profile
        .apply(builder)
        .add_tools(tools)
        .add_resources([RegisteredResource::from(ConfigResource), SystemInfoResource.into()])
        .add_prompts([RegisteredPrompt::from(GreetingPrompt), CodeReviewPrompt.into()])
        .on_start(move || async move {
            info!(
                target: "fast_mcp::example",
                tools = %tool_names,
                "Example server started with {tool_count} tools"
            );
        })
        .on_shutdown(|| async {
            info!(target: "fast_mcp::example", "Example server shutting down");
        })
        .run()
        .await
        .map_err(RuntimeExit::from_error)
}
