//! Capability descriptor assembly.
use rmcp::model::{
    ExperimentalCapabilities, JsonObject, PromptsCapability, ResourcesCapability,
    ServerCapabilities, ToolsCapability,
};

/// Which optional features a server instance has something to offer for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CapabilityFlags {
    pub tools: bool,
    pub resources: bool,
    pub prompts: bool,
    pub sampling: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolsFeature {
    pub list_changed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourcesFeature {
    pub subscribe: bool,
    pub list_changed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptsFeature {
    pub list_changed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplingFeature;

/// Capability descriptor advertised during initialization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub tools: Option<ToolsFeature>,
    pub resources: Option<ResourcesFeature>,
    pub prompts: Option<PromptsFeature>,
    pub sampling: Option<SamplingFeature>,
}

/// Map each flag to its capability, present only when the flag is set.
pub fn assemble(flags: CapabilityFlags) -> Capabilities {
    Capabilities {
        tools: flags.tools.then_some(ToolsFeature {
            list_changed: false,
        }),
        resources: flags.resources.then_some(ResourcesFeature {
            subscribe: false,
            list_changed: false,
        }),
        prompts: flags.prompts.then_some(PromptsFeature {
            list_changed: false,
        }),
        sampling: flags.sampling.then_some(SamplingFeature),
    }
}

impl Capabilities {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl From<Capabilities> for ServerCapabilities {
    fn from(value: Capabilities) -> Self {
        let experimental = value.sampling.map(|_| {
            let mut experimental = ExperimentalCapabilities::new();
            experimental.insert("sampling".into(), JsonObject::new());
            experimental
        });

        ServerCapabilities {
            tools: value.tools.map(|tools| ToolsCapability {
                list_changed: Some(tools.list_changed),
            }),
            resources: value.resources.map(|resources| ResourcesCapability {
                subscribe: Some(resources.subscribe),
                list_changed: Some(resources.list_changed),
            }),
            prompts: value.prompts.map(|prompts| PromptsCapability {
                list_changed: Some(prompts.list_changed),
            }),
            experimental,
            ..ServerCapabilities::default()
        }
    }
}
