//! PomoDash MCP server binary.
//!
//! Resolves configuration, builds the backend client and serves the MCP tools
//! on the selected transport.

use std::net::IpAddr;

use clap::Parser;
use miette::Diagnostic;
use pomodash_mcp::backend::{BackendClient, BackendError};
use pomodash_mcp::config::{Config, ConfigError};
use pomodash_mcp::mcp::{McpServer, RegistryError};
use pomodash_mcp::transport::{self, HttpConfig, Transport, TransportError};
use thiserror::Error;
use tracing::info;

#[derive(Error, Diagnostic, Debug)]
enum BinaryError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Backend(#[from] BackendError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Transport(#[from] TransportError),
}

#[derive(Parser)]
#[command(name = "pomodash-mcp")]
#[command(author, version, about = "PomoDash MCP server", long_about = None)]
struct Cli {
    /// Backend root URL (default: POMODASH_API_URL env or https://mcp.pomodash.mindsnapz.de)
    #[arg(long)]
    api_url: Option<String>,

    /// Bearer credential (default: POMODASH_API_KEY env)
    #[arg(long)]
    api_key: Option<String>,

    /// MCP transport to serve on
    #[arg(long, value_enum, default_value = "stdio")]
    transport: Transport,

    /// Host address to bind to (http transport)
    #[arg(long, default_value = "127.0.0.1")]
    host: IpAddr,

    /// Port to listen on (http transport)
    #[arg(short, long, default_value = "3000")]
    port: u16,
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    run().await.map_err(Into::into)
}

async fn run() -> Result<(), BinaryError> {
    let cli = Cli::parse();
    let _ = rustls::crypto::ring::default_provider().install_default();
    transport::init_tracing();

    let config = Config::resolve(cli.api_url, cli.api_key)?;
    let backend = BackendClient::new(&config.api_url, &config.api_key)?;
    info!(api_url = %backend.root(), "using PomoDash backend");

    let server = McpServer::new(backend)?;
    info!(tools = server.tools().len(), transport = ?cli.transport, "tools registered");

    match cli.transport {
        Transport::Stdio => transport::run_stdio(server).await?,
        Transport::Http => {
            transport::run_http(
                server,
                HttpConfig {
                    host: cli.host,
                    port: cli.port,
                },
            )
            .await?
        }
    }

    Ok(())
}
