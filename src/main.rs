use anyhow::Context;
use passport_connector::api::HttpApiClient;
use passport_connector::mcp::McpServer;
use passport_connector::{Config, logging};
use secrecy::ExposeSecret;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;
    logging::init(&config.logging)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        base_url = %config.api.base_url,
        api_token = %config
            .api
            .api_token
            .as_ref()
            .map(|token| logging::redact_token(token.expose_secret()))
            .unwrap_or_else(|| "none".to_string()),
        "starting passport MCP connector"
    );

    let api = Arc::new(HttpApiClient::new(&config.api)?);
    McpServer::new(api).run_stdio().await
}
