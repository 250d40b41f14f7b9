//! Tool: get-library-docs — Fetch documentation for a library ID.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use library_docs::{DocsBackend, DocsQuery, LibraryId};

use crate::types::{McpResult, ToolCallResult};

use super::registry::Tool;
use super::schema::{OperationDescriptor, ParamKind, ParamSpec};

pub const NAME: &str = "get-library-docs";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocsParams {
    #[serde(rename = "context7CompatibleLibraryID")]
    pub library_id: String,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub tokens: Option<u64>,
}

impl From<DocsParams> for DocsQuery {
    fn from(params: DocsParams) -> Self {
        DocsQuery {
            library_id: LibraryId::new(params.library_id),
            topic: params.topic,
            tokens: params.tokens,
        }
    }
}

pub struct GetLibraryDocs {
    backend: Arc<dyn DocsBackend>,
}

impl GetLibraryDocs {
    pub fn new(backend: Arc<dyn DocsBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl Tool for GetLibraryDocs {
    type Params = DocsParams;

    fn descriptor(&self) -> OperationDescriptor {
        OperationDescriptor::new(NAME, "Fetches documentation for a library")
            .param(ParamSpec::required(
                "context7CompatibleLibraryID",
                ParamKind::String,
                "Library ID, as returned by resolve-library-id",
            ))
            .param(ParamSpec::optional(
                "topic",
                ParamKind::String,
                "Topic to focus the documentation on (e.g. 'routing')",
            ))
            .param(ParamSpec::optional(
                "tokens",
                ParamKind::NonNegativeInteger,
                "Maximum number of tokens of documentation to return",
            ))
    }

    async fn run(&self, params: DocsParams) -> McpResult<ToolCallResult> {
        let query = DocsQuery::from(params);
        let text = self.backend.fetch_docs(&query).await?;
        tracing::info!(
            "Fetched {} bytes of docs for {} via {}",
            text.len(),
            query.library_id,
            self.backend.name()
        );
        Ok(ToolCallResult::text(text))
    }
}
