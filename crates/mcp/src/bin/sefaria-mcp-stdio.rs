// Standalone MCP server binary speaking JSON-RPC over stdio

use anyhow::{Context, Result};
use sefaria_mcp::{sefaria_registry, McpServer, ToolSettings};
use sefaria_sdk::{SefariaClient, DEFAULT_BASE_URL};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Stdout carries the protocol, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    tracing::info!("Sefaria MCP server (stdio) starting...");

    let base_url =
        std::env::var("SEFARIA_API_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    let client = SefariaClient::builder()
        .base_url(&base_url)
        .build()
        .with_context(|| format!("Invalid Sefaria API base URL: {}", base_url))?;

    let registry = sefaria_registry(Arc::new(client), ToolSettings::default());
    tracing::info!(base_url = %base_url, "Registered {} tools", registry.len());

    McpServer::new(registry).serve_stdio().await
}
