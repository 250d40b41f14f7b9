//! Tool registration and dispatch.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use library_docs::DocsBackend;

use crate::types::{McpError, McpResult, ToolCallResult, ToolDefinition};

use super::schema::{OperationDescriptor, ValidatedArgs};
use super::{get_library_docs, resolve_library_id};

/// A tool with a typed parameter struct.
#[async_trait]
pub trait Tool: Send + Sync + 'static {
    type Params: DeserializeOwned + Send;

    fn descriptor(&self) -> OperationDescriptor;

    async fn run(&self, params: Self::Params) -> McpResult<ToolCallResult>;
}

/// Object-safe handler stored by the registry.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    async fn call(&self, args: ValidatedArgs) -> McpResult<ToolCallResult>;
}

#[async_trait]
impl<T: Tool> ToolHandler for T {
    async fn call(&self, args: ValidatedArgs) -> McpResult<ToolCallResult> {
        let params = args.into_params::<T::Params>()?;
        self.run(params).await
    }
}

struct RegisteredTool {
    descriptor: OperationDescriptor,
    handler: Arc<dyn ToolHandler>,
}

/// The set of tools this server exposes.
///
/// Built once at startup, then shared read-only between requests.
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<RegisteredTool>,
    by_name: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with `resolve-library-id` and `get-library-docs` backed by `backend`.
    pub fn with_builtin_tools(backend: Arc<dyn DocsBackend>) -> McpResult<Self> {
        let mut registry = Self::new();
        registry.register_tool(resolve_library_id::ResolveLibraryId::new(backend.clone()))?;
        registry.register_tool(get_library_docs::GetLibraryDocs::new(backend))?;
        Ok(registry)
    }

    pub fn register(
        &mut self,
        descriptor: OperationDescriptor,
        handler: Arc<dyn ToolHandler>,
    ) -> McpResult<()> {
        if self.by_name.contains_key(&descriptor.name) {
            return Err(McpError::DuplicateTool(descriptor.name));
        }
        tracing::debug!("Registered tool {}", descriptor.name);
        self.by_name.insert(descriptor.name.clone(), self.tools.len());
        self.tools.push(RegisteredTool {
            descriptor,
            handler,
        });
        Ok(())
    }

    pub fn register_tool<T: Tool>(&mut self, tool: T) -> McpResult<()> {
        let descriptor = tool.descriptor();
        self.register(descriptor, Arc::new(tool))
    }

    fn entry(&self, name: &str) -> McpResult<&RegisteredTool> {
        self.by_name
            .get(name)
            .map(|&i| &self.tools[i])
            .ok_or_else(|| McpError::ToolNotFound(name.to_string()))
    }

    pub fn resolve(&self, name: &str) -> McpResult<Arc<dyn ToolHandler>> {
        self.entry(name).map(|t| t.handler.clone())
    }

    pub fn validate(&self, name: &str, arguments: Option<Value>) -> McpResult<ValidatedArgs> {
        self.entry(name)?.descriptor.validate(arguments)
    }

    /// Resolve, validate, then run a tool.
    pub async fn call(&self, name: &str, arguments: Option<Value>) -> McpResult<ToolCallResult> {
        let handler = self.resolve(name)?;
        let args = self.validate(name, arguments)?;
        handler.call(args).await
    }

    /// Tool definitions in registration order.
    pub fn list_tools(&self) -> Vec<ToolDefinition> {
        self.tools
            .iter()
            .map(|t| t.descriptor.to_definition())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::schema::{ParamKind, ParamSpec};
    use serde::Deserialize;
    use serde_json::json;

    struct Echo;

    #[derive(Deserialize)]
    struct EchoParams {
        text: String,
    }

    #[async_trait]
    impl Tool for Echo {
        type Params = EchoParams;

        fn descriptor(&self) -> OperationDescriptor {
            OperationDescriptor::new("echo", "Echo text back").param(ParamSpec::required(
                "text",
                ParamKind::String,
                "Text to echo",
            ))
        }

        async fn run(&self, params: EchoParams) -> McpResult<ToolCallResult> {
            Ok(ToolCallResult::text(params.text))
        }
    }

    #[test]
    fn test_duplicate_registration() {
        let mut registry = ToolRegistry::new();
        registry.register_tool(Echo).unwrap();
        let err = registry.register_tool(Echo).unwrap_err();
        assert!(matches!(err, McpError::DuplicateTool(ref name) if name == "echo"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_resolve_unknown() {
        let registry = ToolRegistry::new();
        let err = registry.resolve("missing").err().unwrap();
        assert_eq!(err.code(), -32803);
    }

    #[tokio::test]
    async fn test_call_echo() {
        let mut registry = ToolRegistry::new();
        registry.register_tool(Echo).unwrap();
        let result = registry
            .call("echo", Some(json!({ "text": "hello" })))
            .await
            .unwrap();
        assert_eq!(result.content.len(), 1);
        assert_eq!(result.content[0].as_text(), Some("hello"));
    }

    #[tokio::test]
    async fn test_call_rejects_before_handler() {
        let mut registry = ToolRegistry::new();
        registry.register_tool(Echo).unwrap();
        let err = registry
            .call("echo", Some(json!({ "text": 5 })))
            .await
            .unwrap_err();
        assert!(matches!(err, McpError::Validation { ref field, .. } if field == "text"));
    }

    #[test]
    fn test_builtin_tools_order() {
        let backend = Arc::new(library_docs::PlaceholderBackend::new());
        let registry = ToolRegistry::with_builtin_tools(backend).unwrap();
        let names: Vec<String> = registry.list_tools().into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["resolve-library-id", "get-library-docs"]);
    }
}
