//! ProviderAdapter and Transport trait definitions.
//!
//! A [`ProviderAdapter`] translates between the [`ExtractedEvent`] contract
//! and one model vendor's request and response shapes. It never performs
//! I/O: requests are described by a [`ProviderRequest`] and sent by a
//! [`Transport`].

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use eventlink_core::ExtractedEvent;
use serde_json::Value;

use crate::error::ProviderResult;
use crate::instructions::EventInstructions;

/// Header names whose values are never printed.
const SECRET_HEADERS: &[&str] = &["authorization", "x-goog-api-key"];

/// A ready-to-send HTTP request.
///
/// Requests are always sent as a `POST` with a JSON body.
#[derive(Clone, PartialEq)]
pub struct ProviderRequest {
    /// Full endpoint URL.
    pub endpoint: String,
    /// Extra request headers (credentials included).
    pub headers: Vec<(String, String)>,
    /// JSON request body.
    pub body: Value,
}

impl ProviderRequest {
    /// Creates a request with no extra headers.
    pub fn new(endpoint: impl Into<String>, body: Value) -> Self {
        Self {
            endpoint: endpoint.into(),
            headers: Vec::new(),
            body,
        }
    }

    /// Builder method to add a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Returns the value of a header, matched case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Debug for ProviderRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers: Vec<(&str, &str)> = self
            .headers
            .iter()
            .map(|(k, v)| {
                let secret = SECRET_HEADERS.iter().any(|s| k.eq_ignore_ascii_case(s));
                (k.as_str(), if secret { "<redacted>" } else { v.as_str() })
            })
            .collect();

        f.debug_struct("ProviderRequest")
            .field("endpoint", &self.endpoint)
            .field("headers", &headers)
            .field("body", &self.body)
            .finish()
    }
}

/// A boxed future for async trait methods.
///
/// Boxed futures keep [`Transport`] object-safe.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Translates between [`ExtractedEvent`] and one model provider's API.
///
/// Implementations are stateless; one exists per provider.
pub trait ProviderAdapter: Send + Sync {
    /// Returns the provider name (e.g., "openai", "gemini").
    fn name(&self) -> &'static str;

    /// Builds the request that asks the model to extract an event from
    /// `selected_text`.
    ///
    /// `model` is the vendor's model identifier. This never fails and never
    /// performs I/O.
    fn build_request(
        &self,
        selected_text: &str,
        api_key: &str,
        model: &str,
        instructions: &EventInstructions,
    ) -> ProviderRequest;

    /// Parses a raw JSON response body into an extracted event.
    ///
    /// # Errors
    ///
    /// Returns `InvalidApiKey` when the body reports an authentication
    /// failure and `InvalidResponse` when the event fields are missing.
    fn parse_response(&self, body: &Value) -> ProviderResult<ExtractedEvent>;
}

/// Sends provider requests and returns the decoded JSON body.
///
/// Non-success HTTP statuses are not errors at this layer: provider error
/// bodies are returned so [`ProviderAdapter::parse_response`] can classify
/// them.
pub trait Transport: Send + Sync {
    /// Sends the request and decodes the response body as JSON.
    fn send<'a>(&'a self, request: &'a ProviderRequest) -> BoxFuture<'a, ProviderResult<Value>>;
}

/// Returns true if a response body reports a rejected API key.
///
/// Recognized shapes:
/// - `error.type == "invalid_request_error"` (OpenAI)
/// - `error.details[0].reason == "API_KEY_INVALID"` (Gemini)
/// - `error.code == 403` (Gemini permission denied)
pub fn is_auth_failure(body: &Value) -> bool {
    let Some(error) = body.get("error") else {
        return false;
    };

    error.get("type").and_then(Value::as_str) == Some("invalid_request_error")
        || error.pointer("/details/0/reason").and_then(Value::as_str) == Some("API_KEY_INVALID")
        || error.get("code").and_then(Value::as_i64) == Some(403)
}

/// Returns the provider error message, if the body carries an `error` object.
pub fn error_message(body: &Value) -> Option<String> {
    let error = body.get("error")?;
    Some(
        error
            .get("message")
            .and_then(Value::as_str)
            .map(String::from)
            .unwrap_or_else(|| error.to_string()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_builder() {
        let request = ProviderRequest::new("https://example.com/v1", json!({"a": 1}))
            .with_header("Content-Type", "application/json")
            .with_header("Authorization", "Bearer sk-secret");

        assert_eq!(request.header("content-type"), Some("application/json"));
        assert_eq!(request.header("AUTHORIZATION"), Some("Bearer sk-secret"));
        assert_eq!(request.header("x-missing"), None);
    }

    #[test]
    fn debug_redacts_credentials() {
        let request = ProviderRequest::new("https://example.com/v1", json!({}))
            .with_header("Authorization", "Bearer sk-secret")
            .with_header("x-goog-api-key", "AIza-secret")
            .with_header("Content-Type", "application/json");

        let debug = format!("{:?}", request);
        assert!(!debug.contains("sk-secret"));
        assert!(!debug.contains("AIza-secret"));
        assert!(debug.contains("<redacted>"));
        assert!(debug.contains("application/json"));
    }

    #[test]
    fn auth_failure_openai_shape() {
        let body = json!({
            "error": {
                "message": "Incorrect API key provided: sk-abc.",
                "type": "invalid_request_error",
                "param": null,
                "code": "invalid_api_key"
            }
        });
        assert!(is_auth_failure(&body));
    }

    #[test]
    fn auth_failure_gemini_reason_shape() {
        let body = json!({
            "error": {
                "code": 400,
                "message": "API key not valid. Please pass a valid API key.",
                "status": "INVALID_ARGUMENT",
                "details": [{
                    "@type": "type.googleapis.com/google.rpc.ErrorInfo",
                    "reason": "API_KEY_INVALID",
                    "domain": "googleapis.com"
                }]
            }
        });
        assert!(is_auth_failure(&body));
    }

    #[test]
    fn auth_failure_forbidden_code_shape() {
        let body = json!({
            "error": {
                "code": 403,
                "message": "Method doesn't allow unregistered callers.",
                "status": "PERMISSION_DENIED"
            }
        });
        assert!(is_auth_failure(&body));
    }

    #[test]
    fn other_errors_are_not_auth_failures() {
        let rate_limited = json!({
            "error": { "code": 429, "message": "Resource exhausted", "status": "RESOURCE_EXHAUSTED" }
        });
        assert!(!is_auth_failure(&rate_limited));
        assert!(!is_auth_failure(&json!({ "choices": [] })));
    }

    #[test]
    fn error_message_extraction() {
        let body = json!({ "error": { "code": 500, "message": "internal" } });
        assert_eq!(error_message(&body), Some("internal".to_string()));

        let body = json!({ "error": "boom" });
        assert_eq!(error_message(&body), Some("\"boom\"".to_string()));

        assert_eq!(error_message(&json!({})), None);
    }

    struct CannedTransport(Value);

    impl Transport for CannedTransport {
        fn send<'a>(
            &'a self,
            _request: &'a ProviderRequest,
        ) -> BoxFuture<'a, ProviderResult<Value>> {
            Box::pin(async move { Ok(self.0.clone()) })
        }
    }

    #[tokio::test]
    async fn transport_is_object_safe() {
        let transport: Box<dyn Transport> =
            Box::new(CannedTransport(json!({ "error": { "code": 403 } })));
        let request = ProviderRequest::new("https://example.com/v1", json!({}));

        let body = transport.send(&request).await.unwrap();
        assert!(is_auth_failure(&body));
    }
}
