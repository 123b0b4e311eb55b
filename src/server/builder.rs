//! Fluent server configuration.
use std::{fmt, future::Future};

use tracing::{instrument::WithSubscriber, Dispatch, Level};

use crate::{
    capability::{RegisteredPrompt, RegisteredResource, RegisteredTool},
    lib::{errors::FastMcpError, telemetry},
    server::{
        config::{ServerConfig, TransportSetting},
        registry::deduplicate,
        runtime::{
            self, default_server_name, HookFuture, LaunchPlan, LifecycleHook, ShutdownSignal,
            DEFAULT_SERVER_VERSION, DEFAULT_SHUTDOWN_SIGNALS,
        },
        transport::Transport,
    },
};

/// Accumulates server configuration; every setter returns the updated builder.
///
/// ```no_run
/// use fast_mcp::{demo::{GreetingTool, MathTool}, FastMcp};
///
/// # async fn serve() -> Result<(), fast_mcp::FastMcpError> {
/// FastMcp::builder()
///     .name("calculator")
///     .add_tools([MathTool])
///     .add_tools([GreetingTool])
///     .run()
///     .await
/// # }
/// ```
#[must_use = "a builder does nothing until `run` is awaited"]
pub struct Builder {
    server_name: String,
    server_version: String,
    instructions: Option<String>,
    tools: Vec<RegisteredTool>,
    resources: Vec<RegisteredResource>,
    prompts: Vec<RegisteredPrompt>,
    sampling_enabled: bool,
    transport: Transport,
    log_level: Level,
    logger: Option<Dispatch>,
    shutdown_signals: Vec<ShutdownSignal>,
    on_start: Option<LifecycleHook>,
    on_shutdown: Option<LifecycleHook>,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            server_name: default_server_name(),
            server_version: DEFAULT_SERVER_VERSION.to_owned(),
            instructions: None,
            tools: Vec::new(),
            resources: Vec::new(),
            prompts: Vec::new(),
            sampling_enabled: false,
            transport: Transport::Stdio,
            log_level: Level::INFO,
            logger: None,
            shutdown_signals: DEFAULT_SHUTDOWN_SIGNALS.to_vec(),
            on_start: None,
            on_shutdown: None,
        }
    }
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.server_name = name.into();
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.server_version = version.into();
        self
    }

    /// Instructions returned to clients in the `initialize` response.
    pub fn instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    /// Register tools; names already registered are skipped.
    pub fn add_tools<I, T>(mut self, tools: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<RegisteredTool>,
    {
        self.tools = deduplicate(self.tools, tools.into_iter().map(Into::into));
        self
    }

    /// Register resources; URIs already registered are skipped.
    pub fn add_resources<I, R>(mut self, resources: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<RegisteredResource>,
    {
        self.resources = deduplicate(self.resources, resources.into_iter().map(Into::into));
        self
    }

    /// Register prompts; names already registered are skipped.
    pub fn add_prompts<I, P>(mut self, prompts: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<RegisteredPrompt>,
    {
        self.prompts = deduplicate(self.prompts, prompts.into_iter().map(Into::into));
        self
    }

    pub fn enable_sampling(mut self, enabled: bool) -> Self {
        self.sampling_enabled = enabled;
        self
    }

    pub fn transport(mut self, transport: Transport) -> Self {
        self.transport = transport;
        self
    }

    /// Level for the stderr subscriber installed by `run` when no logger is set.
    pub fn log_level(mut self, level: Level) -> Self {
        self.log_level = level;
        self
    }

    /// Route the server's own logs, including per-request handler events, to
    /// `logger` instead of the global subscriber.
    pub fn logger(mut self, logger: impl Into<Dispatch>) -> Self {
        self.logger = Some(logger.into());
        self
    }

    /// Signals that end the session; an empty list disables signal handling.
    pub fn shutdown_signals(mut self, signals: impl IntoIterator<Item = ShutdownSignal>) -> Self {
        self.shutdown_signals = signals.into_iter().collect();
        self
    }

    /// Run `hook` right before the serve loop starts.
    pub fn on_start<F, Fut>(mut self, hook: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.on_start = Some(boxed_hook(hook));
        self
    }

    /// Run `hook` once the serve loop has exited.
    pub fn on_shutdown<F, Fut>(mut self, hook: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.on_shutdown = Some(boxed_hook(hook));
        self
    }

    /// Overlay the fields set in `config`.
    pub fn apply_config(mut self, config: &ServerConfig) -> Self {
        let section = &config.server;
        if let Some(name) = &section.name {
            self.server_name = name.clone();
        }
        if let Some(version) = &section.version {
            self.server_version = version.clone();
        }
        if let Some(instructions) = &section.instructions {
            self.instructions = Some(instructions.clone());
        }
        if let Some(level) = section.log_level {
            self.log_level = level;
        }
        if let Some(sampling) = section.sampling {
            self.sampling_enabled = sampling;
        }
        match section.transport {
            Some(TransportSetting::Stdio) => self.transport = Transport::Stdio,
            Some(TransportSetting::Http { port }) => self.transport = Transport::Http { port },
            None => {}
        }
        if let Some(signals) = &section.shutdown_signals {
            self.shutdown_signals = signals.clone();
        }
        self
    }

    pub fn server_name(&self) -> &str {
        &self.server_name
    }

    pub fn server_version(&self) -> &str {
        &self.server_version
    }

    pub fn tools(&self) -> &[RegisteredTool] {
        &self.tools
    }

    pub fn resources(&self) -> &[RegisteredResource] {
        &self.resources
    }

    pub fn prompts(&self) -> &[RegisteredPrompt] {
        &self.prompts
    }

    pub fn sampling_enabled(&self) -> bool {
        self.sampling_enabled
    }

    pub fn transport_config(&self) -> &Transport {
        &self.transport
    }

    pub fn configured_log_level(&self) -> Level {
        self.log_level
    }

    pub fn configured_shutdown_signals(&self) -> &[ShutdownSignal] {
        &self.shutdown_signals
    }

    pub fn has_on_start(&self) -> bool {
        self.on_start.is_some()
    }

    pub fn has_on_shutdown(&self) -> bool {
        self.on_shutdown.is_some()
    }

    /// Validate, serve on the configured transport, and return once the
    /// session ends or a shutdown signal arrives.
    ///
    /// An unsupported transport fails before any hook runs.
    pub async fn run(self) -> Result<(), FastMcpError> {
        runtime::validate_transport(&self.transport)?;

        let logger = self.logger.clone();
        let log_level = self.log_level;
        let plan = self.into_plan();

        match logger {
            Some(dispatch) => runtime::launch(plan).with_subscriber(dispatch).await,
            None => {
                telemetry::init_tracing(log_level)?;
                runtime::launch(plan).await
            }
        }
    }

    fn into_plan(self) -> LaunchPlan {
        LaunchPlan {
            name: self.server_name,
            version: self.server_version,
            instructions: self.instructions,
            tools: self.tools,
            resources: self.resources,
            prompts: self.prompts,
            sampling_enabled: self.sampling_enabled,
            transport: self.transport,
            shutdown_signals: self.shutdown_signals,
            logger: self.logger,
            on_start: self.on_start,
            on_shutdown: self.on_shutdown,
        }
    }
}

fn boxed_hook<F, Fut>(hook: F) -> LifecycleHook
where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    Box::new(move || -> HookFuture { Box::pin(hook()) })
}

impl fmt::Debug for Builder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builder")
            .field("server_name", &self.server_name)
            .field("server_version", &self.server_version)
            .field("tools", &self.tools)
            .field("resources", &self.resources)
            .field("prompts", &self.prompts)
            .field("sampling_enabled", &self.sampling_enabled)
            .field("transport", &self.transport)
            .field("log_level", &self.log_level)
            .field("shutdown_signals", &self.shutdown_signals)
            .field("on_start", &self.on_start.is_some())
            .field("on_shutdown", &self.on_shutdown.is_some())
            .finish()
    }
}
