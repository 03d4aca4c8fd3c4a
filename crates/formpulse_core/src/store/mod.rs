//! Survey store: async actions over the state tree.
//!
//! # Responsibility
//! - Orchestrate transport calls, state mutations and session persistence.
//! - Enforce the loading-flag discipline on success and failure paths alike.
//!
//! # Invariants
//! - All state writes go through mutation commits; the state lock is never
//!   held across an await point.
//! - Slice data is never replaced from a failed call.
//! - Errors are returned to the caller, never swallowed.
//!
//! # See also
//! - docs/architecture/state-model.md

use crate::api::{ApiError, ApiTransport, HttpMethod};
use crate::logging::sanitize_message;
use crate::model::survey::{Survey, SurveyEnvelope, SurveyId, SurveyPage};
use crate::model::user::{AuthSession, LoginRequest, RegisterRequest};
use crate::repo::session_repo::{
    RepoError, SessionRepository, EMAIL_KEY, NAME_KEY, TOKEN_KEY,
};
use crate::state::AppState;
use log::{error, info};
use serde_json::{json, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Default survey collection path. Pagination links supersede it.
pub const SURVEYS_PATH: &str = "/survey";

/// How long the notification banner stays visible before auto-dismissal.
pub const NOTIFICATION_TTL: Duration = Duration::from_millis(3000);

const DASHBOARD_PATH: &str = "/dashboard";
const REGISTER_PATH: &str = "/register";
const LOGIN_PATH: &str = "/login";
const LOGOUT_PATH: &str = "/logout";

const MAX_LOGGED_MESSAGE_CHARS: usize = 120;

pub type StoreResult<T> = Result<T, StoreError>;

/// Action-level error union.
#[derive(Debug)]
pub enum StoreError {
    Api(ApiError),
    Session(RepoError),
    Decode(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Api(err) => write!(f, "{err}"),
            Self::Session(err) => write!(f, "session persistence failed: {err}"),
            Self::Decode(err) => write!(f, "survey API payload mismatch: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Api(err) => Some(err),
            Self::Session(err) => Some(err),
            Self::Decode(err) => Some(err),
        }
    }
}

impl From<ApiError> for StoreError {
    fn from(value: ApiError) -> Self {
        Self::Api(value)
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::Session(value)
    }
}

/// The application state container.
///
/// Owns the state tree, a transport to the survey API and the session
/// repository that mirrors the user slice. UI layers read through
/// [`SurveyStore::read`] and trigger the async actions below; the actions
/// commit mutations and, for the user slice, persist identity afterwards.
pub struct SurveyStore<T: ApiTransport, S: SessionRepository> {
    state: Arc<Mutex<AppState>>,
    api: T,
    session: S,
}

impl<T: ApiTransport, S: SessionRepository> SurveyStore<T, S> {
    /// Builds a store whose user slice is rehydrated from `session`.
    pub fn open(api: T, session: S) -> StoreResult<Self> {
        let token = session.get(TOKEN_KEY)?;
        let name = session.get(NAME_KEY)?;
        let email = session.get(EMAIL_KEY)?;

        Ok(Self {
            state: Arc::new(Mutex::new(AppState::with_identity(token, name, email))),
            api,
            session,
        })
    }

    /// Runs `read` against a consistent view of the state tree.
    pub fn read<R>(&self, read: impl FnOnce(&AppState) -> R) -> R {
        read(&self.lock_state())
    }

    /// Clones the current state tree.
    pub fn snapshot(&self) -> AppState {
        self.read(AppState::clone)
    }

    /// Applies one mutation batch synchronously. The single write path.
    fn commit<R>(&self, mutate: impl FnOnce(&mut AppState) -> R) -> R {
        mutate(&mut self.lock_state())
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, AppState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fetches the dashboard summary.
    ///
    /// The loading flag clears on both outcomes; `dashboard.data` is only
    /// replaced on success.
    pub async fn load_dashboard(&self) -> StoreResult<Value> {
        let started_at = Instant::now();
        info!("event=dashboard_fetch module=store status=start");
        self.commit(|state| state.set_dashboard_loading(true));

        match self.api.send(HttpMethod::Get, DASHBOARD_PATH, None).await {
            Ok(body) => {
                self.commit(|state| {
                    state.set_dashboard_loading(false);
                    state.set_dashboard_data(body.clone());
                });
                info!(
                    "event=dashboard_fetch module=store status=ok duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(body)
            }
            Err(err) => {
                self.commit(|state| state.set_dashboard_loading(false));
                error!(
                    "event=dashboard_fetch module=store status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err.into())
            }
        }
    }

    /// Fetches one survey by its backend id.
    pub async fn load_survey(&self, id: SurveyId) -> StoreResult<Survey> {
        self.fetch_current_survey(&survey_path(id), "survey_fetch")
            .await
    }

    /// Fetches one survey by its public slug (shareable, unauthenticated).
    pub async fn load_survey_by_slug(&self, slug: &str) -> StoreResult<Survey> {
        self.fetch_current_survey(&survey_by_slug_path(slug), "survey_fetch_by_slug")
            .await
    }

    async fn fetch_current_survey(&self, path: &str, event: &str) -> StoreResult<Survey> {
        let started_at = Instant::now();
        info!("event={event} module=store status=start path={path}");
        self.commit(|state| state.set_current_survey_loading(true));

        match decode_survey(self.api.send(HttpMethod::Get, path, None).await) {
            Ok(survey) => {
                self.commit(|state| {
                    state.set_current_survey(survey.clone());
                    state.set_current_survey_loading(false);
                });
                info!(
                    "event={event} module=store status=ok duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(survey)
            }
            Err(err) => {
                self.commit(|state| state.set_current_survey_loading(false));
                error!(
                    "event={event} module=store status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    /// Fetches one page of the survey collection.
    ///
    /// `page_url` traverses pagination links verbatim; `None` targets the
    /// default collection path.
    pub async fn load_surveys(&self, page_url: Option<&str>) -> StoreResult<SurveyPage> {
        let path = page_url.unwrap_or(SURVEYS_PATH);
        let started_at = Instant::now();
        info!("event=survey_list module=store status=start path={path}");
        self.commit(|state| state.set_surveys_loading(true));

        let outcome = match self.api.send(HttpMethod::Get, path, None).await {
            Ok(body) => serde_json::from_value::<SurveyPage>(body).map_err(StoreError::Decode),
            Err(err) => Err(err.into()),
        };

        match outcome {
            Ok(page) => {
                self.commit(|state| {
                    state.set_surveys_loading(false);
                    state.set_surveys(page.data.clone(), page.meta.links.clone());
                });
                info!(
                    "event=survey_list module=store status=ok duration_ms={} count={}",
                    started_at.elapsed().as_millis(),
                    page.data.len()
                );
                Ok(page)
            }
            Err(err) => {
                self.commit(|state| state.set_surveys_loading(false));
                error!(
                    "event=survey_list module=store status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    /// Creates (`id` absent) or updates (`id` present) a survey.
    ///
    /// No loading flag is toggled; saves are deliberately distinguished from
    /// loads. `image_url` is dropped during serialization and never reaches
    /// the wire. On success the current-survey slice is replaced from the
    /// response; failures leave state untouched.
    pub async fn save_survey(&self, survey: &Survey) -> StoreResult<Survey> {
        let (method, path) = match survey.id {
            Some(id) => (HttpMethod::Put, survey_path(id)),
            None => (HttpMethod::Post, SURVEYS_PATH.to_string()),
        };

        let started_at = Instant::now();
        info!(
            "event=survey_save module=store status=start method={} path={path}",
            method.as_str()
        );

        let payload = serde_json::to_value(survey).map_err(StoreError::Decode)?;

        match decode_survey(self.api.send(method, &path, Some(&payload)).await) {
            Ok(saved) => {
                self.commit(|state| state.set_current_survey(saved.clone()));
                info!(
                    "event=survey_save module=store status=ok duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(saved)
            }
            Err(err) => {
                error!(
                    "event=survey_save module=store status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    /// Deletes a survey.
    ///
    /// Fire-and-forget: no state is touched on success and failures are
    /// returned untouched. Callers own the reaction to either outcome.
    pub async fn delete_survey(&self, id: SurveyId) -> StoreResult<Value> {
        info!("event=survey_delete module=store status=start id={id}");

        match self
            .api
            .send(HttpMethod::Delete, &survey_path(id), None)
            .await
        {
            Ok(body) => {
                info!("event=survey_delete module=store status=ok id={id}");
                Ok(body)
            }
            Err(err) => {
                error!("event=survey_delete module=store status=error id={id} error={err}");
                Err(err.into())
            }
        }
    }

    /// Submits a respondent's answers for `survey_id`.
    ///
    /// The endpoint records data server-side; nothing beyond the loading
    /// flag changes locally.
    pub async fn submit_answers(&self, survey_id: SurveyId, answers: &Value) -> StoreResult<()> {
        let started_at = Instant::now();
        info!("event=answer_submit module=store status=start survey_id={survey_id}");
        self.commit(|state| state.set_current_survey_loading(true));

        let body = json!({ "answers": answers });
        let outcome = self
            .api
            .send(HttpMethod::Post, &survey_answer_path(survey_id), Some(&body))
            .await;

        self.commit(|state| state.set_current_survey_loading(false));

        match outcome {
            Ok(_) => {
                info!(
                    "event=answer_submit module=store status=ok survey_id={survey_id} duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=answer_submit module=store status=error survey_id={survey_id} duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err.into())
            }
        }
    }

    /// Creates an account and opens a session for it.
    pub async fn register(&self, request: &RegisterRequest) -> StoreResult<AuthSession> {
        let payload = serde_json::to_value(request).map_err(StoreError::Decode)?;
        self.authenticate(REGISTER_PATH, &payload, "auth_register")
            .await
    }

    /// Authenticates existing credentials.
    pub async fn login(&self, request: &LoginRequest) -> StoreResult<AuthSession> {
        let payload = serde_json::to_value(request).map_err(StoreError::Decode)?;
        self.authenticate(LOGIN_PATH, &payload, "auth_login").await
    }

    async fn authenticate(
        &self,
        path: &str,
        payload: &Value,
        event: &str,
    ) -> StoreResult<AuthSession> {
        let started_at = Instant::now();
        info!("event={event} module=store status=start");

        let outcome = match self.api.send(HttpMethod::Post, path, Some(payload)).await {
            Ok(body) => serde_json::from_value::<AuthSession>(body).map_err(StoreError::Decode),
            Err(err) => Err(err.into()),
        };

        match outcome {
            Ok(session) => {
                self.commit(|state| state.set_user(&session));
                self.persist_identity(&session)?;
                info!(
                    "event={event} module=store status=ok duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(session)
            }
            Err(err) => {
                error!(
                    "event={event} module=store status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    /// Persistence follows the pure state write; the mutation itself stays
    /// free of side effects.
    fn persist_identity(&self, session: &AuthSession) -> StoreResult<()> {
        self.session.set(TOKEN_KEY, &session.token)?;
        self.session.set(NAME_KEY, &session.user.name)?;
        self.session.set(EMAIL_KEY, &session.user.email)?;
        Ok(())
    }

    /// Ends the active session.
    ///
    /// On success the user slice is emptied and the persistent store wiped
    /// in full, unrelated keys included; the broad reset is deliberate
    /// policy. A failed POST re-signals without changing state.
    pub async fn logout(&self) -> StoreResult<()> {
        let started_at = Instant::now();
        info!("event=auth_logout module=store status=start");

        match self.api.send(HttpMethod::Post, LOGOUT_PATH, None).await {
            Ok(_) => {
                self.commit(AppState::clear_user);
                self.session.clear()?;
                info!(
                    "event=auth_logout module=store status=ok duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=auth_logout module=store status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err.into())
            }
        }
    }

    /// Raises the notification banner and schedules its dismissal after
    /// [`NOTIFICATION_TTL`].
    ///
    /// A later `notify` supersedes the pending dismissal of an earlier one:
    /// each call advances the banner revision and a timer only hides the
    /// banner while its revision is still current.
    ///
    /// Must be called from within a Tokio runtime; the dismissal timer runs
    /// as a spawned task.
    pub fn notify(&self, message: impl Into<String>, kind: impl Into<String>) {
        let message = message.into();
        let kind = kind.into();
        info!(
            "event=notify module=store kind={kind} message={}",
            sanitize_message(&message, MAX_LOGGED_MESSAGE_CHARS)
        );

        let revision = self.commit(|state| state.begin_notification(message, kind));

        let state = Arc::clone(&self.state);
        tokio::spawn(async move {
            tokio::time::sleep(NOTIFICATION_TTL).await;
            state
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .end_notification(revision);
        });
    }
}

fn decode_survey(outcome: Result<Value, ApiError>) -> StoreResult<Survey> {
    let body = outcome?;
    let envelope: SurveyEnvelope = serde_json::from_value(body).map_err(StoreError::Decode)?;
    Ok(envelope.data)
}

fn survey_path(id: SurveyId) -> String {
    format!("/survey/{id}")
}

fn survey_by_slug_path(slug: &str) -> String {
    format!("/survey-by-slug/{slug}")
}

fn survey_answer_path(id: SurveyId) -> String {
    format!("/survey/{id}/answer")
}
