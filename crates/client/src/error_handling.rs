use modrinth_core::{ApiError, Error, Result};
use reqwest::Response;
use serde::Deserialize;
use tracing::{error, warn};

/// Error body shape the remote uses for failed requests
#[derive(Debug, Deserialize)]
struct RawApiError {
    error: String,
    description: String,
}

/// Standard HTTP response handling for all endpoints
pub(crate) async fn handle_http_response(response: Response, context: &str) -> Result<Response> {
    let status = response.status();
    let url = response.url().clone();

    if status.is_success() {
        Ok(response)
    } else {
        let body = response.text().await.unwrap_or_default();
        warn!(
            url = %url,
            status = %status,
            context = %context,
            "HTTP request failed"
        );

        Err(ApiError::http(status, error_message(&body, context)).into())
    }
}

/// Standard JSON parsing with context
pub(crate) async fn parse_json_response<T>(response: Response, context: &str) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::decode(context, &e).into())
}

/// Wrap a network-level send failure into the uniform API error
pub(crate) fn transport_error(context: &str, source: reqwest::Error) -> Error {
    error!(
        context = %context,
        error = %source,
        "transport failure"
    );
    ApiError::transport(context, &source).into()
}

/// Prefer the structured error body the remote sends; fall back to the raw
/// body, or to just the context for an empty body.
fn error_message(body: &str, context: &str) -> String {
    match serde_json::from_str::<RawApiError>(body) {
        Ok(raw) => format!("{context}: {}: {}", raw.error, raw.description),
        Err(_) if body.trim().is_empty() => context.to_string(),
        Err(_) => format!("{context}: {body}"),
    }
}
