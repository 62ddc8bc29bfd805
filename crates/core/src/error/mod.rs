mod api;

pub use api::ApiError;

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for all client operations
#[derive(Error, Debug)]
pub enum Error {
    /// The remote API rejected the request, the transport failed, or the
    /// response body could not be decoded
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The request was rejected client-side; nothing was sent to the remote
    #[error("invalid request: {0}")]
    Validation(String),

    /// A client configuration value could not be applied
    #[error("configuration error: {0}")]
    Config(String),

    #[error("serialization error")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        Error::Config(message.into())
    }

    /// HTTP status of the failed request, if the remote produced a response
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Api(api) => api.status,
            _ => None,
        }
    }

    /// Check whether this error comes from a 404 response
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Error>;
