//! Command-line interface parsing for the proxy
//!
//! This module handles parsing of CLI arguments using clap. Every flag can also
//! be set through an environment variable so the server can be configured in a
//! container without a wrapper script.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use clap::Parser;
use thiserror::Error;

use crate::data::wanikani::WANIKANI_API_URL;

/// Error types for CLI argument validation
#[derive(Debug, Error)]
pub enum CliError {
    /// The upstream timeout must be positive
    #[error("Invalid timeout: must be at least 1 second")]
    InvalidTimeout,

    /// The API URL must be an http(s) URL
    #[error("Invalid API URL: '{0}'. Expected an http:// or https:// URL")]
    InvalidApiUrl(String),
}

/// Maikani - serve WaniKani critical review items with cached subject details
#[derive(Parser, Debug)]
#[command(name = "maikani")]
#[command(about = "HTTP proxy serving WaniKani critical items with cached subject details")]
#[command(version)]
pub struct Cli {
    /// Port to listen on
    #[arg(long, env = "MAIKANI_PORT", default_value_t = 1234)]
    pub port: u16,

    /// Address to bind to
    #[arg(long, env = "MAIKANI_BIND", default_value = "0.0.0.0")]
    pub bind: IpAddr,

    /// Base URL of the WaniKani v2 API
    #[arg(long, env = "WANIKANI_API_URL", default_value = WANIKANI_API_URL)]
    pub api_url: String,

    /// Seconds to wait on a WaniKani request before giving up
    #[arg(long, env = "MAIKANI_UPSTREAM_TIMEOUT", default_value_t = 30)]
    pub timeout_secs: u64,
}

/// Validated server configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Socket address to listen on
    pub addr: SocketAddr,
    /// Base URL of the WaniKani API
    pub api_url: String,
    /// Timeout applied to each upstream request
    pub upstream_timeout: Duration,
}

impl ServerConfig {
    /// Creates a ServerConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(ServerConfig)` with validated settings
    /// * `Err(CliError)` if the timeout or API URL is unusable
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        if cli.timeout_secs == 0 {
            return Err(CliError::InvalidTimeout);
        }
        if !(cli.api_url.starts_with("http://") || cli.api_url.starts_with("https://")) {
            return Err(CliError::InvalidApiUrl(cli.api_url.clone()));
        }

        Ok(ServerConfig {
            addr: SocketAddr::new(cli.bind, cli.port),
            api_url: cli.api_url.clone(),
            upstream_timeout: Duration::from_secs(cli.timeout_secs),
        })
    }
}
