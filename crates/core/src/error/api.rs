use std::fmt;

use reqwest::StatusCode;

/// Uniform error for any failed interaction with the remote API.
///
/// HTTP failures carry the response status; transport and decode failures
/// have no status to report and leave it empty.
#[derive(Debug)]
pub struct ApiError {
    /// Status of the response, if the remote produced one
    pub status: Option<StatusCode>,
    /// Human-readable description of what went wrong
    pub message: String,
}

impl ApiError {
    /// The remote answered with a non-success status code
    pub fn http(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
        }
    }

    /// The request never produced a response (DNS, connect, timeout)
    pub fn transport(context: &str, source: &reqwest::Error) -> Self {
        Self {
            status: None,
            message: format!("{context}: {source}"),
        }
    }

    /// The response body did not match the expected schema
    pub fn decode(context: &str, source: &reqwest::Error) -> Self {
        Self {
            status: None,
            message: format!("{context}: failed to decode response body: {source}"),
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status == Some(StatusCode::NOT_FOUND)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "Modrinth API error (HTTP {status}): {}", self.message),
            None => write!(f, "Modrinth API error: {}", self.message),
        }
    }
}

impl std::error::Error for ApiError {}
