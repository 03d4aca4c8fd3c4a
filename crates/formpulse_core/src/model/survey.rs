//! Survey domain model and API payload shapes.
//!
//! # Responsibility
//! - Define the survey record and the fixed question-type catalog.
//! - Model pagination links and the response envelopes of the survey API.
//!
//! # Invariants
//! - `image_url` is server-derived and never serialized outbound.
//! - Fields this layer does not inspect ride opaquely in `extra`.
//!
//! # See also
//! - docs/architecture/state-model.md

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Stable numeric identifier assigned to a survey by the backend.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type SurveyId = i64;

/// Catalog of question kinds a survey editor may offer.
///
/// The catalog is fixed for the process lifetime; editors enumerate it via
/// [`QuestionType::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    /// Single-line free text.
    Text,
    /// Dropdown with predefined options.
    Select,
    /// Single choice among predefined options.
    Radio,
    /// Multiple choice among predefined options.
    Checkbox,
    /// Multi-line free text.
    Textarea,
}

impl QuestionType {
    /// Every question kind, in editor display order.
    pub const ALL: [QuestionType; 5] = [
        QuestionType::Text,
        QuestionType::Select,
        QuestionType::Radio,
        QuestionType::Checkbox,
        QuestionType::Textarea,
    ];

    /// Wire name of this question kind.
    pub fn as_str(self) -> &'static str {
        match self {
            QuestionType::Text => "text",
            QuestionType::Select => "select",
            QuestionType::Radio => "radio",
            QuestionType::Checkbox => "checkbox",
            QuestionType::Textarea => "textarea",
        }
    }

    /// Parses a wire name back into the catalog.
    pub fn parse(value: &str) -> Option<QuestionType> {
        match value {
            "text" => Some(QuestionType::Text),
            "select" => Some(QuestionType::Select),
            "radio" => Some(QuestionType::Radio),
            "checkbox" => Some(QuestionType::Checkbox),
            "textarea" => Some(QuestionType::Textarea),
            _ => None,
        }
    }
}

/// A survey as exchanged with the API.
///
/// The store inspects only `id` (create vs. update routing) and `image_url`
/// (stripped from outbound payloads); title, questions and every other field
/// are carried opaquely in `extra` so backend schema changes do not ripple
/// through this crate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Survey {
    /// Present once the backend has persisted the survey.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<SurveyId>,
    /// Server-derived image location. Accepted inbound, never sent back.
    #[serde(skip_serializing)]
    pub image_url: Option<String>,
    /// Remaining survey content, opaque to this layer.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Survey {
    /// Returns whether the backend already knows this survey.
    ///
    /// Drives update-vs-create routing when saving.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

/// One pagination link from the list endpoint's `meta.links`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLink {
    /// Absolute URL of the target page; `None` for disabled ends.
    pub url: Option<String>,
    /// Display label, e.g. `1` or `Next &raquo;`.
    pub label: String,
    /// Whether this link points at the current page.
    pub active: bool,
}

/// Envelope wrapping a single survey (`GET /survey/{id}`, save responses).
#[derive(Debug, Clone, Deserialize)]
pub struct SurveyEnvelope {
    pub data: Survey,
}

/// Pagination metadata of a survey list response.
#[derive(Debug, Clone, Deserialize)]
pub struct PageMeta {
    pub links: Vec<PageLink>,
}

/// One page of the survey collection (`GET /survey`).
#[derive(Debug, Clone, Deserialize)]
pub struct SurveyPage {
    pub data: Vec<Survey>,
    pub meta: PageMeta,
}
