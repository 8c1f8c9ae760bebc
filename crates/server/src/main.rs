use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod api;
mod config;
mod session;
mod sse;

use config::{AppState, ServerConfig};

#[derive(Parser, Debug)]
#[command(name = "sefaria-mcp")]
#[command(about = "MCP server exposing the Sefaria library of Jewish texts", long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "sefaria-mcp.toml")]
    config: PathBuf,

    /// Port to listen on
    #[arg(short, long, env = "SEFARIA_MCP_PORT", default_value = "8088")]
    port: u16,

    /// Host to bind to
    #[arg(long, env = "SEFARIA_MCP_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Sefaria API base URL, overrides the configuration file
    #[arg(long, env = "SEFARIA_API_BASE_URL")]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env values feed the clap env fallbacks below
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "sefaria_server=info,sefaria_mcp=info,sefaria_sdk=info,tower_http=debug".into()
            }),
        )
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    let args = Args::parse();

    tracing::info!("Starting Sefaria MCP server");

    // Load configuration
    let mut config = ServerConfig::load(&args.config)?;
    if let Some(base_url) = args.base_url {
        config.sefaria.base_url = base_url;
    }
    tracing::info!("Sefaria API: {}", config.sefaria.base_url);

    let state = AppState::new(&config)?;

    // Start SSE server
    let addr = format!("{}:{}", args.host, args.port);
    api::serve(&addr, state).await?;

    Ok(())
}
