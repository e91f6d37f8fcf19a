//! Backend connection settings. Values come from the command line or the
//! environment and are normalized here so empty strings behave like unset
//! values. The API token is kept as a secret and only exposed when a request
//! header is built.

use super::ApiError;
use secrecy::SecretString;
use std::time::Duration;
use url::Url;

/// Default request timeout applied to every backend call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub base_url: String,
    pub token: Option<SecretString>,
    pub timeout: Duration,
}

impl ApiConfig {
    /// Builds a config for `base_url`, which must be an absolute http(s) URL.
    ///
    /// # Errors
    /// Returns `ApiError::Config` when the URL is empty, malformed or not http(s).
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let base_url = normalize_value(base_url)
            .ok_or_else(|| ApiError::Config("API base URL is required.".to_string()))?;

        let parsed = Url::parse(&base_url)
            .map_err(|err| ApiError::Config(format!("Invalid API base URL: {err}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::Config(format!(
                "Unsupported API base URL scheme: {}",
                parsed.scheme()
            )));
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Attaches a bearer token; blank values are ignored.
    #[must_use]
    pub fn with_token(mut self, token: Option<&str>) -> Self {
        self.token = token.and_then(normalize_value).map(SecretString::from);
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        if !timeout.is_zero() {
            self.timeout = timeout;
        }
        self
    }

    /// Joins the base URL and an endpoint path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        build_url_with_base(&self.base_url, path)
    }
}

/// Builds a URL from an explicit base URL and the provided path.
pub(crate) fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

/// Appends `segment` to `path` as one percent-encoded path segment, so ids
/// containing `/`, `?` or `#` cannot address another resource.
pub(crate) fn push_path_segment(path: &str, segment: &str) -> Result<String, ApiError> {
    if segment.is_empty() || segment == "." || segment == ".." {
        return Err(ApiError::Serialization(format!(
            "Invalid path segment: {segment:?}"
        )));
    }

    let mut url = Url::parse("http://localhost/")
        .and_then(|base| base.join(path))
        .map_err(|err| ApiError::Serialization(format!("Invalid request path: {err}")))?;
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|()| ApiError::Serialization("Invalid request path.".to_string()))?;
        segments.pop_if_empty().push(segment);
    }

    Ok(url.path().to_string())
}

fn normalize_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
