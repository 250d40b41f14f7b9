//! Retrieval backend abstraction.
//!
//! The server never looks libraries up itself: it is handed a `DocsBackend`
//! at startup and forwards every lookup and fetch to it.

use async_trait::async_trait;

use crate::types::{DocsQuery, DocsResult, LibraryId};

/// A source of library identifiers and documentation text.
#[async_trait]
pub trait DocsBackend: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Resolve a human-readable library name to the best-matching identifier.
    ///
    /// Returns `DocsError::LibraryNotFound` when nothing matches.
    async fn lookup(&self, library_name: &str) -> DocsResult<LibraryId>;

    /// Fetch documentation for a library, optionally filtered by topic and
    /// limited to a token budget.
    async fn fetch_docs(&self, query: &DocsQuery) -> DocsResult<String>;
}
