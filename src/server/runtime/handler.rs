use std::{future::Future, sync::Arc};

use rmcp::{
    handler::server::ServerHandler,
    model::{
        CallToolRequestParam, CallToolResult, ErrorData, GetPromptRequestParam, GetPromptResult,
        Implementation, ListPromptsResult, ListResourcesResult, ListToolsResult,
        PaginatedRequestParam, ReadResourceRequestParam, ReadResourceResult, ServerInfo,
    },
    service::RequestContext,
    RoleServer,
};
use tracing::{debug, instrument::WithSubscriber, warn, Dispatch};

use crate::{
    capability::{RegisteredPrompt, RegisteredResource, RegisteredTool},
    lib::errors::unknown_identifier,
    server::capabilities::Capabilities,
};

/// Identity and capabilities reported in the `initialize` response.
#[derive(Debug, Clone)]
pub struct ServerIdentity {
    pub name: String,
    pub version: String,
    pub instructions: Option<String>,
    pub capabilities: Capabilities,
}

/// `ServerHandler` routing requests to the registered tools, resources, and prompts.
#[derive(Debug, Clone)]
pub struct FastServer {
    identity: Arc<ServerIdentity>,
    tools: Arc<[RegisteredTool]>,
    resources: Arc<[RegisteredResource]>,
    prompts: Arc<[RegisteredPrompt]>,
    logger: Option<Dispatch>,
}

impl FastServer {
    pub fn new(
        identity: ServerIdentity,
        tools: Vec<RegisteredTool>,
        resources: Vec<RegisteredResource>,
        prompts: Vec<RegisteredPrompt>,
    ) -> Self {
        Self {
            identity: Arc::new(identity),
            tools: tools.into(),
            resources: resources.into(),
            prompts: prompts.into(),
            logger: None,
        }
    }

    /// Send request-handling events to `dispatch`.
    ///
    /// Requests run on tasks spawned by `rmcp`, which otherwise only see the
    /// global default dispatcher.
    pub fn with_logger(mut self, dispatch: Dispatch) -> Self {
        self.logger = Some(dispatch);
        self
    }

    async fn scoped<F: Future>(&self, future: F) -> F::Output {
        match &self.logger {
            Some(dispatch) => future.with_subscriber(dispatch.clone()).await,
            None => future.await,
        }
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

    /// Run the named tool; tool failures come back as error results.
    pub async fn invoke_tool(
        &self,
        request: CallToolRequestParam,
    ) -> Result<CallToolResult, ErrorData> {
        let Some(tool) = self.tools.iter().find(|tool| tool.name() == request.name) else {
            warn!(target: "fast_mcp::handler", tool = %request.name, "Unknown tool requested");
            return Err(unknown_identifier("tool", &request.name));
        };
        debug!(target: "fast_mcp::handler", tool = tool.name(), "Calling tool");
        tool.call(request.arguments).await
    }

    pub async fn render_prompt(
        &self,
        request: GetPromptRequestParam,
    ) -> Result<GetPromptResult, ErrorData> {
        let Some(prompt) = self
            .prompts
            .iter()
            .find(|prompt| prompt.name() == request.name)
        else {
            warn!(target: "fast_mcp::handler", prompt = %request.name, "Unknown prompt requested");
            return Err(unknown_identifier("prompt", &request.name));
        };
        debug!(target: "fast_mcp::handler", prompt = prompt.name(), "Rendering prompt");
        prompt.get(request.arguments).await
    }

    pub async fn read(
        &self,
        request: ReadResourceRequestParam,
    ) -> Result<ReadResourceResult, ErrorData> {
        let Some(resource) = self
            .resources
            .iter()
            .find(|resource| resource.uri() == request.uri)
        else {
            warn!(target: "fast_mcp::handler", uri = %request.uri, "Unknown resource requested");
            return Err(ErrorData::resource_not_found(
                format!("Unknown resource: {}", request.uri),
                None,
            ));
        };
        debug!(target: "fast_mcp::handler", uri = resource.uri(), "Reading resource");
        let contents = resource.read().await?;
        Ok(ReadResourceResult {
            contents: vec![contents],
        })
    }
}

impl ServerHandler for FastServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: self.identity.capabilities.into(),
            server_info: Implementation {
                name: self.identity.name.clone(),
                version: self.identity.version.clone(),
                ..Implementation::default()
            },
            instructions: self.identity.instructions.clone(),
            ..ServerInfo::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult::with_all_items(
            self.tools.iter().map(RegisteredTool::descriptor).collect(),
        ))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        self.scoped(self.invoke_tool(request)).await
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, ErrorData> {
        Ok(ListResourcesResult::with_all_items(
            self.resources
                .iter()
                .map(RegisteredResource::descriptor)
                .collect(),
        ))
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, ErrorData> {
        self.scoped(self.read(request)).await
    }

    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, ErrorData> {
        Ok(ListPromptsResult::with_all_items(
            self.prompts
                .iter()
                .map(RegisteredPrompt::descriptor)
                .collect(),
        ))
    }

    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, ErrorData> {
        self.scoped(self.render_prompt(request)).await
    }
}
