//! library-docs MCP server — entry point.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use library_docs::{DocsBackend, PlaceholderBackend};
use library_docs_mcp::config::resolve_listen_addr;
use library_docs_mcp::protocol::ProtocolHandler;
use library_docs_mcp::tools::ToolRegistry;
use library_docs_mcp::transport::{HttpTransport, StdioTransport};

#[derive(Parser)]
#[command(
    name = "library-docs-mcp",
    about = "MCP server for library-docs — resolve library names and fetch their documentation",
    version
)]
struct Cli {
    /// Log level (trace, debug, info, warn, error). RUST_LOG takes precedence.
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start MCP server over HTTP (default).
    Serve {
        /// Listen address.
        #[arg(long)]
        host: Option<IpAddr>,

        /// Listen port. Also reads from PORT env var; defaults to 3000.
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Start MCP server over stdio.
    Stdio,

    /// Print server capabilities as JSON.
    Info,

    /// Generate shell completion scripts.
    ///
    /// Examples:
    ///   library-docs-mcp completions bash > ~/.local/share/bash-completion/completions/library-docs-mcp
    ///   library-docs-mcp completions zsh > ~/.zfunc/_library-docs-mcp
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish).
        shell: Shell,
    },
}

/// Build the tool registry. Failure is logged here and fatal to the caller.
fn build_registry(backend: Arc<dyn DocsBackend>) -> anyhow::Result<ToolRegistry> {
    ToolRegistry::with_builtin_tools(backend).map_err(|e| {
        tracing::error!("Failed to register tools: {e}");
        e.into()
    })
}

/// Resolve the HTTP listen address. Failure is logged here and fatal to the caller.
fn listen_addr(host: Option<IpAddr>, port: Option<u16>) -> anyhow::Result<SocketAddr> {
    resolve_listen_addr(host, port).map_err(|e| {
        tracing::error!("Invalid listen address: {e}");
        e.into()
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let backend: Arc<dyn DocsBackend> = Arc::new(PlaceholderBackend::new());

    match cli.command.unwrap_or(Commands::Serve {
        host: None,
        port: None,
    }) {
        Commands::Serve { host, port } => {
            let addr = listen_addr(host, port)?;
            tracing::info!("library-docs MCP server (backend: {})", backend.name());
            let handler = ProtocolHandler::new(build_registry(backend)?);
            let transport = HttpTransport::new(handler);
            transport.run(addr).await?;
        }

        Commands::Stdio => {
            tracing::info!("library-docs MCP server (backend: {})", backend.name());
            let handler = ProtocolHandler::new(build_registry(backend)?);
            let transport = StdioTransport::new(handler);
            transport.run().await?;
        }

        Commands::Info => {
            let capabilities = library_docs_mcp::types::InitializeResult::default_result();
            let tools = build_registry(backend)?.list_tools();
            let info = serde_json::json!({
                "server": capabilities.server_info,
                "protocol_version": capabilities.protocol_version,
                "capabilities": capabilities.capabilities,
                "tools": tools.iter().map(|t| &t.name).collect::<Vec<_>>(),
                "tool_count": tools.len(),
            });
            println!("{}", serde_json::to_string_pretty(&info)?);
        }

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "library-docs-mcp", &mut std::io::stdout());
        }
    }

    Ok(())
}
