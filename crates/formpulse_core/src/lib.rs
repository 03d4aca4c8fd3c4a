//! Client-side state container for the formpulse survey application.
//!
//! Holds the in-memory state tree the UI renders from, mirrors session
//! identity into a persistent local key/value store, and mediates async
//! calls to the remote survey API. This crate is the single source of truth
//! for state-write discipline: mutations are the only write path.

pub mod api;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod state;
pub mod store;

pub use api::{ApiError, ApiResult, ApiTransport, HttpMethod, SurveyApiClient};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::survey::{PageLink, QuestionType, Survey, SurveyEnvelope, SurveyId, SurveyPage};
pub use model::user::{AuthSession, LoginRequest, RegisterRequest, UserProfile};
pub use repo::session_repo::{
    RepoError, RepoResult, SessionRepository, SqliteSessionRepository, EMAIL_KEY, NAME_KEY,
    TOKEN_KEY,
};
pub use state::AppState;
pub use store::{StoreError, StoreResult, SurveyStore, NOTIFICATION_TTL, SURVEYS_PATH};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
