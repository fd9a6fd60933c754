//! newsdesk API server binary.
//!
//! Usage:
//!   newsdesk-api --config newsdesk.toml
//!   newsdesk-api --port 8080 --bind 0.0.0.0
//!
//! # Environment Variables
//!
//! - `NEWSDESK_API_KEY` - bearer token for the session routes (recommended)
//! - `NEWSDESK_BIND_ADDR` - server bind address (default: 127.0.0.1)
//! - `NEWSDESK_CORS_ORIGINS` - CORS allowed origins (comma-separated)
//! - `OPENAI_API_KEY`, `NEWSAPI_KEY` - upstream credentials

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use newsdesk_api::{serve, ApiKeyConfig, AppState};
use newsdesk_coordinator::{NewsdeskConfig, Newsroom};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "newsdesk-api", version, about = "HTTP gateway for newsdesk sessions")]
struct Cli {
    /// Port to listen on
    #[arg(short, long, default_value_t = 8080)]
    port: u16,

    /// Bind address
    #[arg(short, long, env = "NEWSDESK_BIND_ADDR", default_value = "127.0.0.1")]
    bind: String,

    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// CORS allowed origins (comma-separated)
    #[arg(long, env = "NEWSDESK_CORS_ORIGINS", value_delimiter = ',')]
    cors_origins: Option<Vec<String>>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,newsdesk_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if cli.bind == "0.0.0.0" {
        tracing::warn!(
            "Server binding to 0.0.0.0 exposes the API to all network interfaces. \
             Configure NEWSDESK_API_KEY and a firewall."
        );
    }

    let config = match &cli.config {
        Some(path) => {
            tracing::info!(path = %path.display(), "Loading configuration");
            NewsdeskConfig::from_file(path)?
        }
        None => {
            tracing::info!("Using default configuration");
            NewsdeskConfig::default()
        }
    };

    let mut state = AppState::new(Newsroom::from_config(&config)?);

    match ApiKeyConfig::from_env() {
        Some(key) => {
            state = state.with_api_key(key);
            tracing::info!("API key authentication enabled");
        }
        None => tracing::warn!(
            "NEWSDESK_API_KEY not set; the API will run without authentication."
        ),
    }

    let cors_origins = cli
        .cors_origins
        .map(|origins| origins.into_iter().map(|o| o.trim().to_string()).collect());

    let addr: SocketAddr = format!("{}:{}", cli.bind, cli.port).parse()?;
    serve(Arc::new(state), addr, cors_origins).await?;

    Ok(())
}
