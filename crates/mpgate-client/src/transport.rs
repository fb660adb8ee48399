//! Shared HTTP transport for the upstream platform.
//!
//! One client is constructed at startup and injected into every handler.
//! The request timeout and redirect limit are global; no call overrides
//! them.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde::de::DeserializeOwned;

use mpgate_core::config::upstream::UpstreamConfig;
use mpgate_core::{GatewayError, GatewayResult};

use crate::envelope::{build_request_body, decode_response};

/// The shared HTTP client fronting the platform API.
///
/// Read-only after construction; cheap to clone (the inner `reqwest`
/// client is reference-counted).
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: reqwest::Client,
    base_url: String,
}

impl HttpClient {
    /// Build the client against the configured platform domain.
    pub fn new(config: &UpstreamConfig) -> GatewayResult<Self> {
        Self::with_base_url(config.base_url(), config)
    }

    /// Build the client against an explicit base URL.
    ///
    /// Used by tests to point at a stub upstream.
    pub fn with_base_url(
        base_url: impl Into<String>,
        config: &UpstreamConfig,
    ) -> GatewayResult<Self> {
        let inner = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .pool_idle_timeout(Duration::from_secs(config.pool_idle_timeout_seconds))
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()
            .map_err(|e| {
                GatewayError::configuration(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            inner,
            base_url: base_url.into(),
        })
    }

    /// GET an operation path and decode the JSON response.
    ///
    /// The access token and any extra parameters are carried in the query
    /// string.
    pub async fn get_json<T>(
        &self,
        path: &str,
        access_token: &str,
        query: &[(&str, &str)],
    ) -> GatewayResult<T>
    where
        T: DeserializeOwned,
    {
        tracing::debug!(path, "GET upstream");

        let response = self
            .inner
            .get(format!("{}{}", self.base_url, path))
            .query(&[("access_token", access_token)])
            .query(query)
            .send()
            .await
            .map_err(|e| GatewayError::transport(format!("GET {path}: {e}"), e))?;

        let body = response
            .bytes()
            .await
            .map_err(|e| GatewayError::transport(format!("GET {path}: read body: {e}"), e))?;

        decode_response(path, &body)
    }

    /// POST a JSON payload to an operation path and decode the response.
    pub async fn post_json<B, T>(&self, path: &str, access_token: &str, body: &B) -> GatewayResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        tracing::debug!(path, "POST upstream");

        let payload = build_request_body(body)?;

        let response = self
            .inner
            .post(format!("{}{}", self.base_url, path))
            .query(&[("access_token", access_token)])
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await
            .map_err(|e| GatewayError::transport(format!("POST {path}: {e}"), e))?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| GatewayError::transport(format!("POST {path}: read body: {e}"), e))?;

        decode_response(path, &bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::ErrorEnvelope;
    use mpgate_core::ErrorKind;

    fn test_config() -> UpstreamConfig {
        UpstreamConfig {
            timeout_seconds: 2,
            ..UpstreamConfig::default()
        }
    }

    #[tokio::test]
    async fn test_connection_refused_is_a_transport_error() {
        // Bind a port, then drop the listener so nothing is serving.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = HttpClient::with_base_url(format!("http://{addr}"), &test_config()).unwrap();
        let err = client
            .get_json::<ErrorEnvelope>("/cgi-bin/menu/get", "TOKEN", &[])
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Transport);
    }

    #[tokio::test]
    async fn test_get_carries_token_and_query_parameters() {
        use axum::extract::Query;
        use std::collections::HashMap;

        let app = axum::Router::new().route(
            "/cgi-bin/user/info",
            axum::routing::get(|Query(params): Query<HashMap<String, String>>| async move {
                assert_eq!(params.get("access_token").unwrap(), "TOKEN");
                assert_eq!(params.get("openid").unwrap(), "oXYZ");
                r#"{"errcode":0,"errmsg":"ok"}"#
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

        let client = HttpClient::with_base_url(format!("http://{addr}"), &test_config()).unwrap();
        let rsp: ErrorEnvelope = client
            .get_json("/cgi-bin/user/info", "TOKEN", &[("openid", "oXYZ")])
            .await
            .unwrap();
        assert!(rsp.is_ok());
    }
}
