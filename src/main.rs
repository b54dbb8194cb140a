//! Maikani - WaniKani critical items proxy
//!
//! Serves the review items a user gets wrong most often, together with their
//! subject details, caching subjects in memory for the lifetime of the process.

use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use maikani::aggregator::Aggregator;
use maikani::cache::SubjectCache;
use maikani::cli::{Cli, ServerConfig};
use maikani::data::WaniKaniClient;
use maikani::server::{build_app, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = ServerConfig::from_cli(&cli)?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Created once and shared by every request until shutdown
    let client = WaniKaniClient::with_timeout(config.api_url.clone(), config.upstream_timeout)?;
    let cache = Arc::new(SubjectCache::new());
    let app = build_app(AppState::new(Aggregator::new(client, cache)));

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!(
        addr = %config.addr,
        api_url = %config.api_url,
        timeout_secs = config.upstream_timeout.as_secs(),
        "Listening"
    );

    axum::serve(listener, app).await?;

    Ok(())
}
