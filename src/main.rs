//! MCP Tool Server - Rust Implementation
//!
//! A Model Context Protocol (MCP) server exposing a registry of tools over
//! JSON-RPC 2.0 on HTTP.

use std::sync::Arc;

use clap::{Parser, Subcommand};

use mcp_tool_server::config::Config;
use mcp_tool_server::error::Result;
use mcp_tool_server::features::FeatureRegistry;
use mcp_tool_server::mcp::http;
use mcp_tool_server::mcp::server::McpServer;
use mcp_tool_server::tools::ToolRegistry;

/// MCP Tool Server
#[derive(Parser)]
#[command(name = "mcp-tool-server")]
#[command(author, version, about = "MCP Tool Server - JSON-RPC 2.0 tool registry over HTTP")]
struct Cli {
    /// Bind address (overrides MCP_HOST)
    #[arg(long, global = true)]
    host: Option<String>,

    /// Listen port (overrides MCP_PORT)
    #[arg(long, global = true)]
    port: Option<u16>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server (default)
    Serve,

    /// Print the registered tools as JSON and exit
    Tools,

    /// Print the registered features as JSON and exit
    Features,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = Config::new()?.with_overrides(cli.host, cli.port)?;

    let registry = Arc::new(ToolRegistry::with_builtin_tools()?);
    let features = Arc::new(FeatureRegistry::with_builtin_features()?);

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Tools => {
            let listing = serde_json::to_string_pretty(&registry.list())?;
            println!("{listing}");
        }
        Commands::Features => {
            let listing = serde_json::to_string_pretty(&features.list())?;
            println!("{listing}");
        }
        Commands::Serve => {
            let server = Arc::new(McpServer::new(registry).with_features(features));
            http::serve(&config, server).await?;
        }
    }

    Ok(())
}
