//! Errors surfaced by `eventlink` commands.

use eventlink_providers::ProviderError;
use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Bad or missing settings.
    #[error("configuration error: {0}")]
    Config(String),

    /// The model provider could not produce an event.
    #[error("extraction failed: {0}")]
    Provider(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// No usable selected text.
    #[error("invalid input: {0}")]
    Input(String),

    /// Opening a page or touching the clipboard failed.
    #[error("action failed: {0}")]
    Action(String),
}

impl From<ProviderError> for ClientError {
    fn from(err: ProviderError) -> Self {
        Self::Provider(err.to_string())
    }
}
