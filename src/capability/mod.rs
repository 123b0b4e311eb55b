//! Capability contracts for the items a server exposes: tools, resources, and prompts.
//!
//! Each contract has a typed trait for implementors and a cloneable,
//! type-erased `Registered*` handle the builder stores.

pub mod prompt;
pub mod resource;
pub mod schema;
pub mod tool;

pub use prompt::{assistant, user, Prompt, RegisteredPrompt};
pub use resource::{RegisteredResource, Resource, ResourceContent, StaticResource};
pub use tool::{RegisteredTool, Tool};
