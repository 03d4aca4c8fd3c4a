//! Reqwest-backed survey API transport.
//!
//! # Responsibility
//! - Resolve paths against the configured base URL.
//! - Attach `Accept: application/json` and the bearer token when present.
//!
//! # Invariants
//! - Absolute URLs (pagination links) bypass base-URL joining.
//! - Error bodies are capped before being carried in `ApiError::Status`.

use super::{ApiError, ApiResult, ApiTransport, HttpMethod};
use async_trait::async_trait;
use reqwest::header;
use serde_json::Value;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const ERROR_BODY_SNIPPET_CHARS: usize = 200;

/// Production transport for the survey backend.
pub struct SurveyApiClient {
    http: reqwest::Client,
    base_url: String,
    bearer: Mutex<Option<String>>,
}

impl SurveyApiClient {
    /// Creates a transport rooted at `base_url` with no credentials attached.
    pub fn new(base_url: impl Into<String>) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            bearer: Mutex::new(None),
        })
    }

    /// Creates a transport that authenticates with `token` from the start.
    ///
    /// Used when a rehydrated session already carries a bearer token.
    pub fn with_bearer(base_url: impl Into<String>, token: impl Into<String>) -> ApiResult<Self> {
        let client = Self::new(base_url)?;
        client.set_bearer(Some(token.into()));
        Ok(client)
    }

    /// Installs or clears the bearer token attached to subsequent requests.
    pub fn set_bearer(&self, token: Option<String>) {
        *self.bearer.lock().unwrap_or_else(PoisonError::into_inner) = token;
    }

    fn current_bearer(&self) -> Option<String> {
        self.bearer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn resolve_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl ApiTransport for SurveyApiClient {
    async fn send(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&Value>,
    ) -> ApiResult<Value> {
        let url = self.resolve_url(path);

        let mut request = match method {
            HttpMethod::Get => self.http.get(&url),
            HttpMethod::Post => self.http.post(&url),
            HttpMethod::Put => self.http.put(&url),
            HttpMethod::Delete => self.http.delete(&url),
        }
        .header(header::ACCEPT, "application/json");

        if let Some(token) = self.current_bearer() {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: text.chars().take(ERROR_BODY_SNIPPET_CHARS).collect(),
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_str(&text)?)
    }
}
