//! # mpgate-proxy
//!
//! One async method per platform operation, grouped by platform area.
//! Every handler follows the same shape: build the URL from a path
//! constant and the caller-supplied access token, issue exactly one HTTP
//! call on the shared client, decode the enveloped response, check the
//! error code, and return the typed payload.
//!
//! Handlers hold no state beyond the injected [`HttpClient`]; nothing is
//! retried or recovered locally.

pub mod kf;
pub mod material;
pub mod member;
pub mod menu;
pub mod qrcode;
pub mod subscribe;
pub mod tag;
pub mod template;

use mpgate_client::HttpClient;

/// The platform proxy: the full operation surface over one shared client.
#[derive(Debug, Clone)]
pub struct MpProxy {
    http: HttpClient,
}

impl MpProxy {
    /// Create a proxy over the shared HTTP client.
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}
