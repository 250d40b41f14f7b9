//! MCP tool implementations.

pub mod get_library_docs;
pub mod registry;
pub mod resolve_library_id;
pub mod schema;

pub use registry::{Tool, ToolHandler, ToolRegistry};
pub use schema::{OperationDescriptor, ParamKind, ParamSpec, ValidatedArgs};
