//! MCP Streamable HTTP service creation
//!
//! This module provides functions to create the MCP service
//! that can be integrated with an Axum router.

use rmcp::transport::streamable_http_server::{
    StreamableHttpServerConfig, StreamableHttpService, session::local::LocalSessionManager,
};
use tokio_util::sync::CancellationToken;

use super::server::McpServer;

/// Create MCP Streamable HTTP service
///
/// Each session gets its own clone of `server`; clones share the backend
/// client.
///
/// # Example
/// ```no_run
/// use axum::Router;
/// use tokio_util::sync::CancellationToken;
/// # use pomodash_mcp::backend::BackendClient;
/// # use pomodash_mcp::mcp::{McpServer, create_mcp_service};
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// # let server = McpServer::new(BackendClient::new("https://example.com", "token")?)?;
///
/// let ct = CancellationToken::new();
/// let mcp_service = create_mcp_service(server, ct);
///
/// let app: Router = Router::new().nest_service("/mcp", mcp_service);
/// # Ok(())
/// # }
/// ```
pub fn create_mcp_service(
    server: McpServer,
    cancellation_token: CancellationToken,
) -> StreamableHttpService<McpServer, LocalSessionManager> {
    // Service factory: hands each new session a clone of the server
    // Note: Returns io::Error to match rmcp's expected signature
    let service_factory = move || -> Result<McpServer, std::io::Error> { Ok(server.clone()) };

    let config = StreamableHttpServerConfig::default()
        .with_stateful_mode(true)
        .with_cancellation_token(cancellation_token);

    StreamableHttpService::new(
        service_factory,
        LocalSessionManager::default().into(),
        config,
    )
}
