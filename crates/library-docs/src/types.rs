//! Core data types for library lookups and documentation queries.

use serde::{Deserialize, Serialize};

/// A library identifier understood by a documentation backend, e.g. `/vercel/next.js`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LibraryId(String);

impl LibraryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for LibraryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LibraryId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for LibraryId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A request for documentation of a single library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocsQuery {
    pub library_id: LibraryId,
    /// Narrow the documentation to one topic (e.g. "routing").
    pub topic: Option<String>,
    /// Upper bound on the size of the returned documentation, in tokens.
    pub tokens: Option<u64>,
}

impl DocsQuery {
    pub fn new(library_id: impl Into<LibraryId>) -> Self {
        Self {
            library_id: library_id.into(),
            topic: None,
            tokens: None,
        }
    }

    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    pub fn with_tokens(mut self, tokens: u64) -> Self {
        self.tokens = Some(tokens);
        self
    }
}

/// Errors from documentation backends.
#[derive(thiserror::Error, Debug)]
pub enum DocsError {
    #[error("Library not found: {0}")]
    LibraryNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Backend unavailable: {0}")]
    Unavailable(String),
}

pub type DocsResult<T> = Result<T, DocsError>;
