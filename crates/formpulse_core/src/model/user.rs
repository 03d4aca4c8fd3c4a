//! User identity model and authentication payloads.
//!
//! # Responsibility
//! - Define the minimal identity carried by the user slice.
//! - Model the request/response bodies of the auth endpoints.
//!
//! # Invariants
//! - Identity fields mirror what the local key/value store persists.

use serde::{Deserialize, Serialize};

/// Minimal identity carried in state and mirrored to local persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
}

/// Payload returned by `POST /login` and `POST /register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    /// Bearer token authenticating subsequent API calls.
    pub token: String,
    pub user: UserProfile,
}

/// Body for `POST /register`. Sent as-is; the backend validates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

/// Body for `POST /login`. Sent as-is; the backend validates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}
