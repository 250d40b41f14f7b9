//! Tool: resolve-library-id — Map a library name to a library ID.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use library_docs::DocsBackend;

use crate::types::{McpResult, ToolCallResult};

use super::registry::Tool;
use super::schema::{OperationDescriptor, ParamKind, ParamSpec};

pub const NAME: &str = "resolve-library-id";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveParams {
    pub library_name: String,
}

pub struct ResolveLibraryId {
    backend: Arc<dyn DocsBackend>,
}

impl ResolveLibraryId {
    pub fn new(backend: Arc<dyn DocsBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl Tool for ResolveLibraryId {
    type Params = ResolveParams;

    fn descriptor(&self) -> OperationDescriptor {
        OperationDescriptor::new(
            NAME,
            "Resolves a library name to a library ID usable with get-library-docs",
        )
        .param(ParamSpec::required(
            "libraryName",
            ParamKind::String,
            "Library name to search for",
        ))
    }

    async fn run(&self, params: ResolveParams) -> McpResult<ToolCallResult> {
        let id = self.backend.lookup(&params.library_name).await?;
        tracing::info!(
            "Resolved {:?} to {id} via {}",
            params.library_name,
            self.backend.name()
        );
        Ok(ToolCallResult::text(id.into_inner()))
    }
}
