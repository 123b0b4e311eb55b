//! Resource contract, static resources, and the type-erased handle.
use std::{fmt, sync::Arc};

use async_trait::async_trait;
use rmcp::model::{AnnotateAble, RawResource, Resource as ResourceDescriptor, ResourceContents};

use crate::lib::errors::ResourceError;

/// Text served for a `resources/read` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceContent {
    Text(String),
}

impl ResourceContent {
    pub fn as_text(&self) -> &str {
        match self {
            ResourceContent::Text(text) => text,
        }
    }
}

impl From<String> for ResourceContent {
    fn from(value: String) -> Self {
        ResourceContent::Text(value)
    }
}

impl From<&str> for ResourceContent {
    fn from(value: &str) -> Self {
        ResourceContent::Text(value.to_owned())
    }
}

/// A URI-addressed content source.
///
/// `content` runs on every read, so implementors may compute it lazily.
#[async_trait]
pub trait Resource: Send + Sync + 'static {
    fn uri(&self) -> &str;

    fn name(&self) -> &str;

    fn description(&self) -> Option<&str> {
        None
    }

    fn mime_type(&self) -> Option<&str> {
        None
    }

    async fn content(&self) -> Result<ResourceContent, ResourceError>;
}

/// Resource whose content is fixed at construction.
#[derive(Debug, Clone)]
pub struct StaticResource {
    uri: String,
    name: String,
    description: Option<String>,
    mime_type: Option<String>,
    content: ResourceContent,
}

impl StaticResource {
    pub fn new(
        uri: impl Into<String>,
        name: impl Into<String>,
        content: impl Into<ResourceContent>,
    ) -> Self {
        Self {
            uri: uri.into(),
            name: name.into(),
            description: None,
            mime_type: None,
            content: content.into(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }
}

#[async_trait]
impl Resource for StaticResource {
    fn uri(&self) -> &str {
        &self.uri
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }

    async fn content(&self) -> Result<ResourceContent, ResourceError> {
        Ok(self.content.clone())
    }
}

/// Cloneable handle to a registered resource.
#[derive(Clone)]
pub struct RegisteredResource {
    inner: Arc<dyn Resource>,
}

impl RegisteredResource {
    pub fn new<R: Resource>(resource: R) -> Self {
        Self {
            inner: Arc::new(resource),
        }
    }

    pub fn uri(&self) -> &str {
        self.inner.uri()
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    /// Descriptor advertised in `resources/list`.
    pub fn descriptor(&self) -> ResourceDescriptor {
        let mut raw = RawResource::new(self.inner.uri(), self.inner.name());
        raw.description = self.inner.description().map(str::to_owned);
        raw.mime_type = self.inner.mime_type().map(str::to_owned);
        raw.no_annotation()
    }

    /// Produce the contents returned by `resources/read`.
    pub async fn read(&self) -> Result<ResourceContents, ResourceError> {
        let ResourceContent::Text(text) = self.inner.content().await?;
        let mut contents = ResourceContents::text(text, self.inner.uri());
        if let ResourceContents::TextResourceContents { mime_type, .. } = &mut contents {
            *mime_type = self.inner.mime_type().map(str::to_owned);
        }
        Ok(contents)
    }
}

impl<R: Resource> From<R> for RegisteredResource {
    fn from(resource: R) -> Self {
        Self::new(resource)
    }
}

impl fmt::Debug for RegisteredResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredResource")
            .field("uri", &self.uri())
            .field("name", &self.name())
            .finish()
    }
}
