//! ProviderAdapter trait and implementations.
//!
//! This crate provides the model-provider layer:
//!
//! - [`ProviderAdapter`] - builds requests for, and parses responses from, one vendor
//! - [`Model`] - the closed set of selectable models, each mapped to its adapter
//! - [`EventInstructions`] - the extraction task sent to every provider
//! - [`Transport`] - sends a [`ProviderRequest`]; [`HttpTransport`] is the reqwest implementation
//! - [`ProviderError`] - error types for provider operations
//!
//! # Architecture
//!
//! ```text
//!  selected text
//!       │
//!       ▼  Model::adapter().build_request()
//! ┌──────────────────┐
//! │ ProviderRequest  │
//! └────────┬─────────┘
//!          ▼  Transport::send()
//! ┌──────────────────┐
//! │  JSON response   │
//! └────────┬─────────┘
//!          ▼  ProviderAdapter::parse_response()
//! ┌──────────────────┐
//! │  ExtractedEvent  │
//! └──────────────────┘
//! ```

pub mod error;
pub mod gemini;
#[cfg(feature = "http")]
pub mod http;
pub mod instructions;
pub mod model;
pub mod openai;
pub mod provider;

// Re-export main types at crate root
pub use error::{ProviderError, ProviderErrorKind, ProviderResult};
pub use gemini::GeminiAdapter;
#[cfg(feature = "http")]
pub use http::HttpTransport;
pub use instructions::{EXTRACT_FUNCTION_NAME, EventInstructions};
pub use model::Model;
pub use openai::OpenAiAdapter;
pub use provider::{
    BoxFuture, ProviderAdapter, ProviderRequest, Transport, error_message, is_auth_failure,
};
