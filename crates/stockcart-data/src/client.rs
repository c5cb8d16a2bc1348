//! JSON fetch client.

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::FetchError;

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// HTTP client for JSON endpoints under a common base URL.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct FetchClient {
    http: reqwest::Client,
    base_url: String,
}

impl FetchClient {
    /// Create a client for `base_url` with [`DEFAULT_TIMEOUT`].
    pub fn new(base_url: impl Into<String>) -> Result<Self, FetchError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a client for `base_url` with an explicit request timeout.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let base_url = base_url.into();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(FetchError::InvalidUrl(base_url));
        }

        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The base URL requests are resolved against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve `path` against the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// GET `path` and decode the body as `T`.
    ///
    /// Any non-2xx status is an error.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let (status, body) = self.get(path).await?;
        if !status.is_success() {
            return Err(http_error(status));
        }
        Ok(serde_json::from_slice(&body)?)
    }

    /// GET `path` and decode the body as `T`, treating "no such record" as
    /// `None`.
    ///
    /// A 404, an empty body, or a JSON `null` all mean absence. Other
    /// non-2xx statuses are errors.
    pub async fn get_json_opt<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Option<T>, FetchError> {
        let (status, body) = self.get(path).await?;
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(http_error(status));
        }
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        Ok(serde_json::from_slice::<Option<T>>(&body)?)
    }

    async fn get(&self, path: &str) -> Result<(reqwest::StatusCode, Vec<u8>), FetchError> {
        let url = self.url(path);
        let response = self.http.get(&url).send().await?;
        let status = response.status();
        tracing::debug!(%url, status = status.as_u16(), "fetched");

        let body = response.bytes().await?;
        Ok((status, body.to_vec()))
    }
}

fn http_error(status: reqwest::StatusCode) -> FetchError {
    FetchError::HttpError {
        status: status.as_u16(),
        message: status.canonical_reason().unwrap_or("unknown status").to_string(),
    }
}
