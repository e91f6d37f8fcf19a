//! Shared `reqwest` client and request helpers. The helpers attach the
//! configured bearer token, wrap every call in a tracing span and map failures
//! into [`ApiError`]. Request bodies are never logged.

use super::{ApiConfig, ApiError};
use reqwest::{multipart::Form, Client, Method, RequestBuilder, Response};
use secrecy::ExposeSecret;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, info_span, Instrument};

/// Maximum number of error body characters surfaced to the user.
const MAX_ERROR_CHARS: usize = 200;

#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    config: ApiConfig,
}

impl ApiClient {
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let http = Client::builder()
            .user_agent(crate::APP_USER_AGENT)
            .timeout(config.timeout)
            .build()
            .map_err(|err| ApiError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self { http, config })
    }

    /// Posts JSON and parses the body as `T`, also on a 4xx status when it
    /// decodes. The auth endpoints report rejections as 4xx with the same
    /// `{success, message}` shape they use for success; 5xx is always an error.
    pub(crate) async fn post_json_with_error_body<B, T>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .send(Method::POST, path, |builder| builder.json(body))
            .await?;

        if response.status().is_success() {
            return handle_json_response(response).await;
        }

        let status = response.status();
        let text = response.text().await?;
        if !status.is_client_error() {
            return Err(http_error(status.as_u16(), &text));
        }

        match serde_json::from_str::<T>(&text) {
            Ok(parsed) => {
                debug!(status = status.as_u16(), "decoded error response body");
                Ok(parsed)
            }
            Err(_) => Err(http_error(status.as_u16(), &text)),
        }
    }

    /// Sends a multipart form with the given method and parses a JSON response.
    pub(crate) async fn send_multipart<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        form: Form,
    ) -> Result<T, ApiError> {
        let response = self
            .send(method, path, |builder| builder.multipart(form))
            .await?;
        handle_json_response(response).await
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        with_body: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> Result<Response, ApiError> {
        let url = self.config.url(path);
        let span = info_span!("api.request", http.method = %method, url = %url);

        let mut builder = self.http.request(method, &url);
        if let Some(token) = &self.config.token {
            builder = builder.bearer_auth(token.expose_secret());
        }
        let request = with_body(builder).build()?;

        self.http
            .execute(request)
            .instrument(span)
            .await
            .map_err(ApiError::from)
    }
}

/// Parses JSON responses and surfaces HTTP errors with sanitized bodies.
async fn handle_json_response<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    if status.is_success() {
        response
            .json::<T>()
            .await
            .map_err(|err| ApiError::Parse(format!("Failed to decode response: {err}")))
    } else {
        let body = response.text().await?;
        Err(http_error(status.as_u16(), &body))
    }
}

fn http_error(status: u16, body: &str) -> ApiError {
    ApiError::Http {
        status,
        message: error_message(body),
    }
}

/// Prefers the `message` field of a JSON error body, falling back to the raw
/// body trimmed and truncated.
fn error_message(body: &str) -> String {
    let from_json = serde_json::from_str::<Value>(body).ok().and_then(|json| {
        json.get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
    });

    sanitize_body(from_json.as_deref().unwrap_or(body))
}

fn sanitize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed.".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}
