//! Errors raised while asking a model provider for an event.
//!
//! Every failure carries a [`ProviderErrorKind`]. The trigger only branches
//! on one distinction, [`ProviderError::is_invalid_api_key`]; the other kinds
//! exist for logs and for `eventlink config validate`.

use std::fmt;
use thiserror::Error;

/// What went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderErrorKind {
    /// The provider rejected the API key.
    InvalidApiKey,
    /// The request never produced a response body.
    Network,
    /// The body is not JSON or does not hold the event fields.
    InvalidResponse,
    /// The provider answered with an error object that is not about the key.
    Reported,
    /// The model identifier is not one of the supported ids.
    UnknownModel,
    /// The HTTP client could not be built.
    Setup,
}

impl fmt::Display for ProviderErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::InvalidApiKey => "API key rejected",
            Self::Network => "request failed",
            Self::InvalidResponse => "unusable response",
            Self::Reported => "provider error",
            Self::UnknownModel => "unknown model",
            Self::Setup => "transport setup failed",
        })
    }
}

/// A failure from one provider exchange.
#[derive(Debug, Error)]
pub struct ProviderError {
    kind: ProviderErrorKind,
    message: String,
    provider: Option<&'static str>,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ProviderError {
    fn of(kind: ProviderErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            provider: None,
            source: None,
        }
    }

    pub fn invalid_api_key(message: impl Into<String>) -> Self {
        Self::of(ProviderErrorKind::InvalidApiKey, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::of(ProviderErrorKind::Network, message)
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::of(ProviderErrorKind::InvalidResponse, message)
    }

    pub fn reported(message: impl Into<String>) -> Self {
        Self::of(ProviderErrorKind::Reported, message)
    }

    pub fn unknown_model(message: impl Into<String>) -> Self {
        Self::of(ProviderErrorKind::UnknownModel, message)
    }

    pub fn setup(message: impl Into<String>) -> Self {
        Self::of(ProviderErrorKind::Setup, message)
    }

    /// Tags the error with the adapter that raised it.
    pub fn with_provider(mut self, provider: &'static str) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Attaches the underlying cause.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> ProviderErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn provider(&self) -> Option<&'static str> {
        self.provider
    }

    /// Returns true if the provider rejected the API key.
    pub fn is_invalid_api_key(&self) -> bool {
        self.kind == ProviderErrorKind::InvalidApiKey
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.provider {
            Some(provider) => write!(f, "{} {}: {}", provider, self.kind, self.message),
            None => write!(f, "{}: {}", self.kind, self.message),
        }
    }
}

pub type ProviderResult<T> = Result<T, ProviderError>;
