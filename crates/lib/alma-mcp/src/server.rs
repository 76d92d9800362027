//! MCP server runners for alma-schema-mcp.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use alma_core::gateway::SchemaGateway;
use axum::Router;
use axum::routing::get;
use rmcp::serve_server;
use rmcp::transport::io::stdio;
use rmcp::transport::streamable_http_server::{
    StreamableHttpServerConfig,
    StreamableHttpService,
    session::local::LocalSessionManager,
};
use tracing::info;

use crate::AlmaMcp;

/// Configuration for the MCP streamable HTTP server.
#[derive(Debug, Clone)]
pub struct McpHttpServerConfig {
    pub addr: SocketAddr,
    pub stateful_mode: bool,
    pub sse_keep_alive: Option<Duration>,
}

impl McpHttpServerConfig {
    #[must_use]
    pub const fn new(addr: SocketAddr) -> Self {
        Self {
            addr,
            stateful_mode: true,
            sse_keep_alive: Some(Duration::from_secs(15)),
        }
    }

    #[must_use]
    pub const fn with_stateful_mode(mut self, stateful_mode: bool) -> Self {
        self.stateful_mode = stateful_mode;
        self
    }

    #[must_use]
    pub const fn with_sse_keep_alive(mut self, sse_keep_alive: Option<Duration>) -> Self {
        self.sse_keep_alive = sse_keep_alive;
        self
    }
}

impl Default for McpHttpServerConfig {
    fn default() -> Self {
        Self::new("127.0.0.1:4040".parse().expect("valid MCP HTTP address"))
    }
}

/// Serves the MCP server over stdio until the session ends.
///
/// Stdout belongs to the protocol in this mode; nothing else in the process
/// may write to it.
///
/// # Errors
/// Returns any transport or server error.
pub async fn serve_stdio(
    gateway: Arc<SchemaGateway>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let service = AlmaMcp::with_gateway(gateway);
    let (stdin, stdout) = stdio();
    let running = serve_server(service, (stdin, stdout)).await?;
    let _ = running.waiting().await?;
    Ok(())
}

/// Serves the MCP server using streamable HTTP transport.
///
/// The MCP endpoint is nested under `/mcp`; `/health` answers liveness
/// probes.
///
/// # Errors
/// Returns any listener or server error.
pub async fn serve_streamable_http(
    gateway: Arc<SchemaGateway>,
    config: McpHttpServerConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let service_gateway = gateway.clone();
    let service: StreamableHttpService<AlmaMcp, LocalSessionManager> = StreamableHttpService::new(
        move || Ok(AlmaMcp::with_gateway(service_gateway.clone())),
        Arc::new(LocalSessionManager::default()),
        StreamableHttpServerConfig {
            sse_keep_alive: config.sse_keep_alive,
            stateful_mode: config.stateful_mode,
            ..Default::default()
        },
    );

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .nest_service("/mcp", service);
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!("alma-schema-mcp listening on {}", config.addr);
    axum::serve(listener, app).await?;
    Ok(())
}
