//! HTTP transport boundary for the survey API.
//!
//! # Responsibility
//! - Define the transport contract the store issues requests through.
//! - Classify transport, HTTP-status and body-decoding failures.
//!
//! # Invariants
//! - The store never constructs URLs beyond path concatenation; base URL and
//!   auth header handling live behind this boundary.
//!
//! # See also
//! - docs/architecture/state-model.md

use async_trait::async_trait;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod client;

pub use client::SurveyApiClient;

pub type ApiResult<T> = Result<T, ApiError>;

/// Transport-layer error for survey API calls.
#[derive(Debug)]
pub enum ApiError {
    /// Connection, TLS or timeout failure before an HTTP status was read.
    Transport(reqwest::Error),
    /// Non-2xx response. `body` holds a capped snippet for diagnostics.
    Status { status: u16, body: String },
    /// The response claimed success but its body was not valid JSON.
    Decode(serde_json::Error),
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(err) => write!(f, "{err}"),
            Self::Status { status, body } => {
                write!(f, "survey API returned status {status}: {body}")
            }
            Self::Decode(err) => write!(f, "invalid JSON in survey API response: {err}"),
        }
    }
}

impl Error for ApiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Transport(err) => Some(err),
            Self::Status { .. } => None,
            Self::Decode(err) => Some(err),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport(value)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(value: serde_json::Error) -> Self {
        Self::Decode(value)
    }
}

/// HTTP verbs the survey API is consumed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// Contract for issuing survey API requests.
///
/// The store talks to the backend exclusively through this trait, enabling
/// pluggable transports (reqwest in production, scripted fakes in tests).
#[async_trait]
pub trait ApiTransport: Send + Sync {
    /// Issues one request and returns the decoded JSON body.
    ///
    /// `path` is either a path joined onto the transport's base URL or an
    /// absolute URL honored verbatim (pagination links arrive absolute).
    /// Empty 2xx bodies decode to `Value::Null`.
    async fn send(&self, method: HttpMethod, path: &str, body: Option<&Value>)
        -> ApiResult<Value>;
}
