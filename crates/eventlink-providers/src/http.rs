//! reqwest-backed [`Transport`].
//!
//! No request timeout is configured here; the client's defaults apply.

use serde_json::Value;
use tracing::debug;

use crate::error::{ProviderError, ProviderResult};
use crate::provider::{BoxFuture, ProviderRequest, Transport};

/// HTTP transport using a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http_client: reqwest::Client,
}

impl HttpTransport {
    /// Creates a transport with a fresh HTTP client.
    ///
    /// # Errors
    ///
    /// Returns a setup error if the TLS backend cannot be
    /// initialized.
    pub fn new() -> ProviderResult<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(concat!("eventlink/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                ProviderError::setup(format!("failed to create HTTP client: {}", e))
                    .with_source(e)
            })?;

        Ok(Self { http_client })
    }

    async fn post(&self, request: &ProviderRequest) -> ProviderResult<Value> {
        let mut builder = self.http_client.post(&request.endpoint);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        // Headers first: `json` only sets Content-Type when it is absent.
        let builder = builder.json(&request.body);

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::network("request timeout")
            } else if e.is_connect() {
                ProviderError::network(format!("connection failed: {}", e))
            } else {
                ProviderError::network(format!("request failed: {}", e))
            }
        })?;

        let status = response.status();
        debug!(status = %status, endpoint = %request.endpoint, "provider responded");

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::network(format!("failed to read response: {}", e)))?;

        serde_json::from_str(&body).map_err(|e| {
            ProviderError::invalid_response(format!(
                "failed to parse response (HTTP {}): {}",
                status, e
            ))
            .with_source(e)
        })
    }
}

impl Transport for HttpTransport {
    fn send<'a>(&'a self, request: &'a ProviderRequest) -> BoxFuture<'a, ProviderResult<Value>> {
        Box::pin(self.post(request))
    }
}
