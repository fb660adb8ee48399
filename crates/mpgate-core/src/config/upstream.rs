//! Upstream platform configuration.

use serde::{Deserialize, Serialize};

/// Settings for the shared HTTP client that fronts the platform API.
///
/// The timeout is global: every call uses it, and there is no per-call
/// override.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Hostname of the platform API.
    #[serde(default = "default_api_domain")]
    pub api_domain: String,
    /// Request timeout in seconds, applied to every call.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Idle connection pool timeout in seconds.
    #[serde(default = "default_idle_timeout")]
    pub pool_idle_timeout_seconds: u64,
    /// Maximum number of redirects to follow before failing.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
}

impl UpstreamConfig {
    /// Base URL for every platform call.
    pub fn base_url(&self) -> String {
        format!("https://{}", self.api_domain)
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            api_domain: default_api_domain(),
            timeout_seconds: default_timeout(),
            pool_idle_timeout_seconds: default_idle_timeout(),
            max_redirects: default_max_redirects(),
        }
    }
}

fn default_api_domain() -> String {
    "api.weixin.qq.com".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_idle_timeout() -> u64 {
    90
}

fn default_max_redirects() -> usize {
    3
}
