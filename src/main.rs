//! mpgate server — gRPC gateway for the WeChat Official Account platform.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use mpgate_client::HttpClient;
use mpgate_core::config::AppConfig;
use mpgate_core::{GatewayError, GatewayResult};
use mpgate_proxy::MpProxy;

#[tokio::main]
async fn main() {
    let env = std::env::var("MPGATE_ENV").unwrap_or_else(|_| "development".to_string());
    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> GatewayResult<()> {
    tracing::info!("Starting mpgate v{}", env!("CARGO_PKG_VERSION"));

    // Redis is connected and health-checked at startup; no handler reads
    // or writes through it.
    let _redis = if config.redis.enabled {
        Some(connect_redis(&config.redis.url).await?)
    } else {
        tracing::info!("Redis disabled");
        None
    };

    tracing::info!(domain = %config.upstream.api_domain, "Building upstream HTTP client");
    let http = HttpClient::new(&config.upstream)?;
    let proxy = Arc::new(MpProxy::new(http));

    mpgate_rpc::server::serve(&config.server, proxy).await
}

/// Connect to Redis and verify the connection with a PING.
async fn connect_redis(url: &str) -> GatewayResult<redis::aio::ConnectionManager> {
    tracing::info!("Connecting to Redis...");
    let client = redis::Client::open(url)
        .map_err(|e| GatewayError::configuration(format!("invalid Redis URL: {e}")))?;
    let mut manager = redis::aio::ConnectionManager::new(client)
        .await
        .map_err(|e| GatewayError::internal(format!("Redis connection failed: {e}")))?;

    let _pong: String = redis::cmd("PING")
        .query_async(&mut manager)
        .await
        .map_err(|e| GatewayError::internal(format!("Redis ping failed: {e}")))?;

    tracing::info!("Redis connected");
    Ok(manager)
}
