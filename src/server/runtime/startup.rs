use std::{future::Future, pin::Pin, process::ExitCode};

use anyhow::Error;
use rmcp::{transport::IntoTransport, RoleServer, ServiceExt};
use tracing::{info, warn, Dispatch};

use crate::{
    capability::{RegisteredPrompt, RegisteredResource, RegisteredTool},
    lib::{
        errors::{ConfigError, FastMcpError},
        telemetry::{self, RuntimeModeTelemetry},
    },
    server::{
        capabilities::{assemble, CapabilityFlags},
        runtime::{
            handler::{FastServer, ServerIdentity},
            signals::{ShutdownListener, ShutdownSignal},
        },
        transport::{ByteStream, Transport},
    },
};

/// Future returned by a lifecycle hook.
pub type HookFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

/// Callback run once around the serve loop.
pub type LifecycleHook = Box<dyn FnOnce() -> HookFuture + Send>;

/// Everything the serve loop needs, taken from a validated builder.
pub struct LaunchPlan {
    pub name: String,
    pub version: String,
    pub instructions: Option<String>,
    pub tools: Vec<RegisteredTool>,
    pub resources: Vec<RegisteredResource>,
    pub prompts: Vec<RegisteredPrompt>,
    pub sampling_enabled: bool,
    pub transport: Transport,
    pub shutdown_signals: Vec<ShutdownSignal>,
    /// Dispatcher for the handler's request logs.
    pub logger: Option<Dispatch>,
    pub on_start: Option<LifecycleHook>,
    pub on_shutdown: Option<LifecycleHook>,
}

fn http_unsupported(port: u16) -> FastMcpError {
    FastMcpError::InvalidConfiguration(format!(
        "HTTP transport (port {port}) is not implemented yet; use stdio, in-memory, or a custom transport"
    ))
}

/// Reject transports that cannot be served.
pub fn validate_transport(transport: &Transport) -> Result<(), FastMcpError> {
    match transport {
        Transport::Http { port } => Err(http_unsupported(*port)),
        _ => Ok(()),
    }
}

/// A transport that can actually be served.
enum Endpoint {
    Stdio,
    Stream(Box<dyn ByteStream>),
}

fn open_endpoint(transport: Transport) -> Result<Endpoint, FastMcpError> {
    match transport {
        Transport::Stdio => Ok(Endpoint::Stdio),
        Transport::InMemory(stream) => Ok(Endpoint::Stream(Box::new(stream))),
        Transport::Custom(stream) => Ok(Endpoint::Stream(stream)),
        Transport::Http { port } => Err(http_unsupported(port)),
    }
}

/// Build the handler, run the start hook, serve until the session ends or a
/// shutdown signal arrives, then run the shutdown hook.
///
/// Signal handlers are installed before the start hook, so a signal that
/// arrives during the hook or the handshake still ends in the shutdown hook.
pub async fn launch(plan: LaunchPlan) -> Result<(), FastMcpError> {
    let LaunchPlan {
        name,
        version,
        instructions,
        tools,
        resources,
        prompts,
        sampling_enabled,
        transport,
        shutdown_signals,
        logger,
        on_start,
        on_shutdown,
    } = plan;

    let transport_label = transport.as_str();
    let endpoint = open_endpoint(transport)?;

    if tools.is_empty() && resources.is_empty() && prompts.is_empty() {
        warn!(
            target: "fast_mcp::runtime",
            "Server starting with no tools, resources, or prompts registered"
        );
    }

    let capabilities = assemble(CapabilityFlags {
        tools: !tools.is_empty(),
        resources: !resources.is_empty(),
        prompts: !prompts.is_empty(),
        sampling: sampling_enabled,
    });

    let signal_names: Vec<&'static str> = shutdown_signals.iter().map(|s| s.as_str()).collect();
    telemetry::emit_runtime_mode(&RuntimeModeTelemetry {
        server_name: &name,
        server_version: &version,
        transport: transport_label,
        tools: tools.len(),
        resources: resources.len(),
        prompts: prompts.len(),
        sampling: sampling_enabled,
        shutdown_signals: &signal_names,
    });

    let mut server = FastServer::new(
        ServerIdentity {
            name,
            version,
            instructions,
            capabilities,
        },
        tools,
        resources,
        prompts,
    );
    if let Some(dispatch) = logger {
        server = server.with_logger(dispatch);
    }

    let mut shutdown = ShutdownListener::install(&shutdown_signals);

    if let Some(hook) = on_start {
        hook().await;
    }

    let outcome = match endpoint {
        Endpoint::Stdio => serve_on(server, rmcp::transport::stdio(), &mut shutdown).await,
        Endpoint::Stream(stream) => serve_on(server, stream, &mut shutdown).await,
    };
    drop(shutdown);

    if let Some(hook) = on_shutdown {
        hook().await;
    }

    match &outcome {
        Ok(()) => info!(target: "fast_mcp::runtime", "FastMCP server stopped"),
        Err(err) => warn!(
            target: "fast_mcp::runtime",
            error = %err,
            "FastMCP server stopped with an error"
        ),
    }
    outcome
}

async fn serve_on<T, E, A>(
    server: FastServer,
    transport: T,
    shutdown: &mut ShutdownListener,
) -> Result<(), FastMcpError>
where
    T: IntoTransport<RoleServer, E, A>,
    E: std::error::Error + Send + Sync + 'static,
{
    let running = tokio::select! {
        served = server.serve(transport) => {
            served.map_err(|err| FastMcpError::ServerStartFailed(err.to_string()))?
        }
        signal = shutdown.recv() => {
            info!(
                target: "fast_mcp::runtime",
                signal = %signal,
                "Received shutdown signal before initialization; skipping session"
            );
            return Ok(());
        }
    };
    info!(target: "fast_mcp::runtime", "FastMCP server started");

    let cancel = running.cancellation_token();
    let waiting = running.waiting();
    tokio::pin!(waiting);

    let outcome = tokio::select! {
        outcome = &mut waiting => outcome,
        signal = shutdown.recv() => {
            info!(
                target: "fast_mcp::runtime",
                signal = %signal,
                "Received shutdown signal; closing session"
            );
            cancel.cancel();
            waiting.await
        }
    };

    match outcome {
        Ok(reason) => {
            info!(target: "fast_mcp::runtime", reason = ?reason, "Session ended");
            Ok(())
        }
        Err(err) => Err(FastMcpError::ServerStopped(err.to_string())),
    }
}

/// Bundles a runtime error message with an exit code.
#[derive(Debug)]
pub struct RuntimeExit {
    message: String,
    code: u8,
}

impl RuntimeExit {
    pub fn from_error(err: impl Into<Error>) -> Self {
        let err = err.into();
        let code = match err.downcast_ref::<FastMcpError>() {
            Some(FastMcpError::InvalidConfiguration(_) | FastMcpError::Config(_)) => 2,
            _ if err.is::<ConfigError>() => 2,
            _ => 1,
        };
        Self {
            message: format!("{err:?}"),
            code,
        }
    }

    pub fn report(self) -> ExitCode {
        eprintln!("{}", self.message);
        self.exit_code()
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.code)
    }

    pub fn code(&self) -> u8 {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
