//! alma-mcpd: MCP daemon fronting the Alma schema API.

mod config;

use std::sync::Arc;

use alma_core::gateway::{GatewayConfig, SchemaGateway};
use alma_mcp::server::{self, McpHttpServerConfig};
use tracing::error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::AlmaConfig;

#[tokio::main]
async fn main() {
    // Logs go to stderr: stdout is the MCP protocol channel in stdio mode.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_ansi(false))
        .with(EnvFilter::from_default_env())
        .init();

    if let Err(err) = run().await {
        error!("fatal: {err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = AlmaConfig::from_args()?;

    let gateway_config =
        GatewayConfig::new(config.api_base_url.clone()).with_timeout(config.http_timeout);
    let gateway = Arc::new(SchemaGateway::new(gateway_config)?);

    match (config.enable_stdio, config.mcp_http_serve) {
        (true, true) => {
            let http_config = McpHttpServerConfig::new(config.mcp_http_addr);
            tokio::try_join!(
                server::serve_stdio(gateway.clone()),
                server::serve_streamable_http(gateway, http_config),
            )?;
        }
        (true, false) => server::serve_stdio(gateway).await?,
        (false, true) => {
            let http_config = McpHttpServerConfig::new(config.mcp_http_addr);
            server::serve_streamable_http(gateway, http_config).await?;
        }
        // Rejected during configuration validation.
        (false, false) => {}
    }

    Ok(())
}
