use std::time::Duration;

use modrinth_core::{Error, Result};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use url::Url;

use crate::config::ClientConfig;
use crate::endpoints::version::VersionEndpoint;

/// Async client for the Modrinth HTTP API.
///
/// The client holds no per-call state, so any number of operations may be
/// awaited concurrently. Cloning is cheap; clones share the underlying
/// connection pool. Dropping an operation's future cancels it: the in-flight
/// request is aborted and no further requests are issued.
#[derive(Debug, Clone)]
pub struct ModrinthClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ModrinthClient {
    /// Create a client against the production API with default settings
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| Error::config(format!("invalid base URL {:?}: {e}", config.base_url)))?;

        let mut headers = HeaderMap::new();
        if let Some(token) = &config.api_token {
            let mut value = HeaderValue::from_str(token)
                .map_err(|_| Error::config("API token is not a valid header value"))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let http = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, base_url })
    }

    /// Operations on version resources
    pub fn version(&self) -> VersionEndpoint<'_> {
        VersionEndpoint::new(self)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(crate) fn inner_client(&self) -> &reqwest::Client {
        &self.http
    }

    /// Resolve an API path against the configured base URL
    pub(crate) fn api_url(&self, path: &str) -> String {
        format!(
            "{base}/{path}",
            base = self.base_url.as_str().trim_end_matches('/')
        )
    }
}
