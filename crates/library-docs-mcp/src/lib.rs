//! library-docs MCP server — resolve library names and fetch their documentation.

pub mod config;
pub mod protocol;
pub mod tools;
pub mod transport;
pub mod types;

pub use config::resolve_listen_addr;
pub use protocol::ProtocolHandler;
pub use tools::ToolRegistry;
pub use transport::{HttpTransport, StdioTransport};
