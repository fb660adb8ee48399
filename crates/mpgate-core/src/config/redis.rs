//! Redis connection configuration.

use serde::{Deserialize, Serialize};

/// Redis connection settings.
///
/// The connection is established and health-checked at startup. No
/// business handler reads or writes through it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisConfig {
    /// Whether to connect to Redis on startup.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Redis connection URL.
    #[serde(default = "default_url")]
    pub url: String,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            url: default_url(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_url() -> String {
    "redis://localhost:6379".to_string()
}
