//! library-docs — core library for resolving library names and retrieving their documentation.

pub mod backend;
pub mod placeholder;
pub mod types;

pub use backend::DocsBackend;
pub use placeholder::{PlaceholderBackend, DEFAULT_PLACEHOLDER_ID};
pub use types::*;
