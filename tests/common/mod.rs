//! Shared test helpers: a stub upstream server and proxy construction.

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Bytes;
use axum::http::header::CONTENT_TYPE;

use mpgate_client::HttpClient;
use mpgate_core::config::upstream::UpstreamConfig;
use mpgate_proxy::MpProxy;

/// One request observed by the stub.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    /// Parsed JSON body; `Null` for bodyless requests.
    pub body: serde_json::Value,
}

/// A stub upstream serving canned JSON per path and recording every
/// request it receives.
pub struct StubUpstream {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubUpstream {
    /// Start the stub on an ephemeral port with `(path, response body)`
    /// routes.
    pub async fn start(responses: &[(&str, &str)]) -> Self {
        let requests: Arc<Mutex<Vec<RecordedRequest>>> = Arc::new(Mutex::new(Vec::new()));

        let mut router = Router::new();
        for (path, response) in responses {
            let response = response.to_string();
            let recorded = Arc::clone(&requests);
            let request_path = path.to_string();
            router = router.route(
                path,
                axum::routing::any(move |body: Bytes| {
                    let response = response.clone();
                    let recorded = Arc::clone(&recorded);
                    let request_path = request_path.clone();
                    async move {
                        let parsed =
                            serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
                        recorded.lock().unwrap().push(RecordedRequest {
                            path: request_path,
                            body: parsed,
                        });
                        ([(CONTENT_TYPE, "application/json")], response)
                    }
                }),
            );
        }

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });

        Self {
            base_url: format!("http://{addr}"),
            requests,
        }
    }

    /// A proxy whose client points at this stub.
    pub fn proxy(&self) -> MpProxy {
        let config = UpstreamConfig {
            timeout_seconds: 2,
            ..UpstreamConfig::default()
        };
        MpProxy::new(HttpClient::with_base_url(self.base_url.clone(), &config).unwrap())
    }

    /// Everything the stub has seen so far.
    pub fn recorded(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

/// A proxy pointing at a port nothing listens on.
pub fn unreachable_proxy() -> MpProxy {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = UpstreamConfig {
        timeout_seconds: 2,
        ..UpstreamConfig::default()
    };
    MpProxy::new(HttpClient::with_base_url(format!("http://{addr}"), &config).unwrap())
}
