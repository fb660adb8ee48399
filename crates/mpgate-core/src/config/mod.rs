//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod logging;
pub mod redis;
pub mod server;
pub mod upstream;

use serde::{Deserialize, Serialize};

use self::logging::LoggingConfig;
use self::redis::RedisConfig;
use self::server::ServerConfig;
use self::upstream::UpstreamConfig;

use crate::error::GatewayError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// gRPC server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Upstream platform settings.
    #[serde(default)]
    pub upstream: UpstreamConfig,
    /// Redis connection settings.
    #[serde(default)]
    pub redis: RedisConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `MPGATE_`.
    pub fn load(env: &str) -> Result<Self, GatewayError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("MPGATE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| GatewayError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| GatewayError::configuration(format!("Failed to deserialize config: {e}")))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            upstream: UpstreamConfig::default(),
            redis: RedisConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_complete() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 10109);
        assert_eq!(config.upstream.api_domain, "api.weixin.qq.com");
        assert_eq!(config.logging.level, "info");
    }
}
