//! Serving the MCP server over stdio or Streamable HTTP.

use std::net::IpAddr;

use axum::Router;
use clap::ValueEnum;
use miette::Diagnostic;
use rmcp::ServiceExt;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::mcp::{McpServer, create_mcp_service};

/// Which MCP transport to serve on
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Transport {
    /// JSON-RPC over stdin/stdout
    Stdio,
    /// Streamable HTTP at `/mcp`
    Http,
}

/// HTTP transport configuration
pub struct HttpConfig {
    /// Host address to bind to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
        }
    }
}

#[derive(Error, Diagnostic, Debug)]
pub enum TransportError {
    #[error("Failed to bind {addr}")]
    #[diagnostic(
        code(pomodash_mcp::transport::bind),
        help("Is another process listening on this port? Try --port.")
    )]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("MCP transport error: {message}")]
    #[diagnostic(code(pomodash_mcp::transport::serve))]
    Serve { message: String },
}

/// Initialize tracing subscriber with env filter
///
/// Logs go to stderr: stdout belongs to the stdio transport.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pomodash_mcp=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Serve over stdin/stdout until the client disconnects
pub async fn run_stdio(server: McpServer) -> Result<(), TransportError> {
    info!("PomoDash MCP server running on stdio");

    let service = server
        .serve(rmcp::transport::stdio())
        .await
        .map_err(|e| TransportError::Serve {
            message: e.to_string(),
        })?;

    service.waiting().await.map_err(|e| TransportError::Serve {
        message: e.to_string(),
    })?;
    Ok(())
}

/// Serve Streamable HTTP at `/mcp` until Ctrl-C
pub async fn run_http(server: McpServer, config: HttpConfig) -> Result<(), TransportError> {
    let ct = CancellationToken::new();
    let app = Router::new()
        .nest_service("/mcp", create_mcp_service(server, ct.child_token()))
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| TransportError::Bind {
            addr: addr.clone(),
            source,
        })?;
    info!("PomoDash MCP server listening on http://{}/mcp", addr);

    let shutdown = ct.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutting down");
            shutdown.cancel();
        }
    });

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { ct.cancelled_owned().await })
        .await
        .map_err(|e| TransportError::Serve {
            message: e.to_string(),
        })
}
