//! Placeholder backend that answers every request from fixed templates.

use async_trait::async_trait;

use crate::backend::DocsBackend;
use crate::types::{DocsQuery, DocsResult, LibraryId};

/// Identifier returned by `PlaceholderBackend::lookup` unless overridden.
pub const DEFAULT_PLACEHOLDER_ID: &str = "/nextjs/nextjs/v14";

/// A backend with no catalog behind it.
///
/// `lookup` answers the same identifier for every name and `fetch_docs`
/// renders a template around the query. No I/O is performed.
#[derive(Debug, Clone)]
pub struct PlaceholderBackend {
    library_id: LibraryId,
}

impl PlaceholderBackend {
    pub fn new() -> Self {
        Self::with_library_id(DEFAULT_PLACEHOLDER_ID)
    }

    pub fn with_library_id(library_id: impl Into<LibraryId>) -> Self {
        Self {
            library_id: library_id.into(),
        }
    }

    fn render(query: &DocsQuery) -> String {
        let mut text = format!("# Documentation for {}\n\n", query.library_id);

        if let Some(topic) = &query.topic {
            text.push_str(&format!("Topic: {topic}\n"));
        }
        if let Some(tokens) = query.tokens {
            text.push_str(&format!("Token limit: {tokens}\n"));
        }
        if query.topic.is_some() || query.tokens.is_some() {
            text.push('\n');
        }

        text.push_str(&format!(
            "This is placeholder documentation for {}. \
             No documentation source is configured, so no real content was retrieved.",
            query.library_id
        ));
        if let Some(topic) = &query.topic {
            text.push_str(&format!(" Requested topic: {topic}."));
        }
        text
    }
}

impl Default for PlaceholderBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocsBackend for PlaceholderBackend {
    fn name(&self) -> &str {
        "placeholder"
    }

    async fn lookup(&self, library_name: &str) -> DocsResult<LibraryId> {
        tracing::debug!("Placeholder lookup for {library_name:?}");
        Ok(self.library_id.clone())
    }

    async fn fetch_docs(&self, query: &DocsQuery) -> DocsResult<String> {
        tracing::debug!(
            "Placeholder docs for {} (topic: {:?}, tokens: {:?})",
            query.library_id,
            query.topic,
            query.tokens
        );
        Ok(Self::render(query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_constant() {
        let backend = PlaceholderBackend::new();
        for name in ["Next.js", "react", "tokio"] {
            let id = tokio_test::block_on(backend.lookup(name)).unwrap();
            assert_eq!(id.as_str(), DEFAULT_PLACEHOLDER_ID);
        }
    }

    #[test]
    fn test_lookup_custom_id() {
        let backend = PlaceholderBackend::with_library_id("/tokio-rs/tokio");
        let id = tokio_test::block_on(backend.lookup("tokio")).unwrap();
        assert_eq!(id.as_str(), "/tokio-rs/tokio");
    }

    #[test]
    fn test_fetch_docs_embeds_id() {
        let backend = PlaceholderBackend::new();
        let text = tokio_test::block_on(backend.fetch_docs(&DocsQuery::new("/vercel/next.js")))
            .unwrap();
        assert!(!text.is_empty());
        assert!(text.contains("/vercel/next.js"));
        assert!(!text.contains("Topic:"));
        assert!(!text.contains("Token limit:"));
    }

    #[test]
    fn test_fetch_docs_with_topic_and_tokens() {
        let backend = PlaceholderBackend::new();
        let query = DocsQuery::new("/nextjs/nextjs/v14")
            .with_topic("routing")
            .with_tokens(5000);
        let text = tokio_test::block_on(backend.fetch_docs(&query)).unwrap();
        assert!(text.contains("/nextjs/nextjs/v14"));
        assert!(text.contains("Topic: routing"));
        assert!(text.contains("Token limit: 5000"));
    }
}
