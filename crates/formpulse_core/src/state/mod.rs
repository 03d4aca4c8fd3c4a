//! In-memory state tree and its mutation surface.
//!
//! # Responsibility
//! - Hold the five state slices the UI renders from.
//! - Provide the synchronous, pure mutations that are the only sanctioned
//!   write path into the tree.
//!
//! # Invariants
//! - Mutations perform no I/O; session persistence is an explicit follow-up
//!   step in the store layer.
//! - A loading flag is true only while its matching fetch is in flight.
//!
//! # See also
//! - docs/architecture/state-model.md

use crate::model::survey::{PageLink, QuestionType, Survey};
use crate::model::user::{AuthSession, UserProfile};
use serde_json::{Map, Value};

/// Authenticated-user slice, mirrored to the session repository.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserSlice {
    pub profile: Option<UserProfile>,
    /// `Some` iff a session is active.
    pub token: Option<String>,
}

/// Dashboard summary slice. `data` is the raw response body.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSlice {
    pub loading: bool,
    pub data: Value,
}

impl Default for DashboardSlice {
    fn default() -> Self {
        Self {
            loading: false,
            data: Value::Object(Map::new()),
        }
    }
}

/// The survey currently open in a detail or editor view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurrentSurveySlice {
    pub loading: bool,
    /// Replaced wholesale on each load/save; never partially updated.
    pub data: Option<Survey>,
}

/// One page of the survey collection plus its pagination links.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurveyListSlice {
    pub loading: bool,
    pub data: Vec<Survey>,
    pub links: Vec<PageLink>,
}

/// Transient banner shown after user-visible operations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationSlice {
    pub show: bool,
    pub message: Option<String>,
    pub kind: Option<String>,
    /// Advances on every `notify`; a scheduled dismissal only applies while
    /// its revision is still current.
    revision: u64,
}

/// The whole state tree. Created once per store and mutated in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub user: UserSlice,
    pub dashboard: DashboardSlice,
    pub current_survey: CurrentSurveySlice,
    pub surveys: SurveyListSlice,
    pub notification: NotificationSlice,
}

impl AppState {
    /// Creates an empty tree with no active session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a tree seeded with a previously persisted identity.
    ///
    /// A profile is only restored when both name and email survived; a lone
    /// fragment is treated as absent.
    pub fn with_identity(
        token: Option<String>,
        name: Option<String>,
        email: Option<String>,
    ) -> Self {
        let mut state = Self::default();
        state.user.token = token;
        state.user.profile = match (name, email) {
            (Some(name), Some(email)) => Some(UserProfile { name, email }),
            _ => None,
        };
        state
    }

    /// The immutable question-type catalog.
    pub fn question_types(&self) -> &'static [QuestionType] {
        &QuestionType::ALL
    }

    pub fn set_dashboard_loading(&mut self, loading: bool) {
        self.dashboard.loading = loading;
    }

    pub fn set_dashboard_data(&mut self, data: Value) {
        self.dashboard.data = data;
    }

    pub fn set_current_survey_loading(&mut self, loading: bool) {
        self.current_survey.loading = loading;
    }

    /// Replaces the current survey wholesale.
    pub fn set_current_survey(&mut self, survey: Survey) {
        self.current_survey.data = Some(survey);
    }

    pub fn set_surveys_loading(&mut self, loading: bool) {
        self.surveys.loading = loading;
    }

    /// Replaces the survey list and its pagination links wholesale.
    pub fn set_surveys(&mut self, surveys: Vec<Survey>, links: Vec<PageLink>) {
        self.surveys.data = surveys;
        self.surveys.links = links;
    }

    /// Commits an authenticated session into the user slice.
    pub fn set_user(&mut self, session: &AuthSession) {
        self.user.token = Some(session.token.clone());
        self.user.profile = Some(session.user.clone());
    }

    /// Empties the user slice. The persistent mirror is wiped separately by
    /// the store.
    pub fn clear_user(&mut self) {
        self.user.profile = None;
        self.user.token = None;
    }

    /// Shows the notification banner and returns the revision a scheduled
    /// dismissal must present.
    pub fn begin_notification(
        &mut self,
        message: impl Into<String>,
        kind: impl Into<String>,
    ) -> u64 {
        self.notification.revision = self.notification.revision.wrapping_add(1);
        self.notification.show = true;
        self.notification.message = Some(message.into());
        self.notification.kind = Some(kind.into());
        self.notification.revision
    }

    /// Hides the banner if `revision` is still the latest one raised.
    ///
    /// A dismissal scheduled for an older notification must not hide a newer
    /// one.
    pub fn end_notification(&mut self, revision: u64) {
        if self.notification.revision == revision {
            self.notification.show = false;
        }
    }
}
