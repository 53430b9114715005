//! Entity definitions: one form type and one REST path per content type.
//!
//! The [`Entity`] trait pairs a form schema with its endpoint exactly once,
//! so create and edit flows share the same rules.

use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::listing::Searchable;
use crate::schema::FormSchema;
use crate::types::{DbId, Timestamp};

pub mod analytics;
pub mod inspiring_people;
pub mod monthly_stats;
pub mod online_planner;
pub mod people;
pub mod photo_idea;
pub mod podcast;
pub mod quote;
pub mod upload_link;
pub mod video_idea;

pub use analytics::{AnalyticContent, AnalyticContentForm};
pub use inspiring_people::{InspiringPeople, InspiringPersonForm};
pub use monthly_stats::{MonthlyPlatformStats, MonthlyStatsForm};
pub use online_planner::{OnlinePlanner, OnlinePlannerForm};
pub use people::{Host, HostForm, Speaker, SpeakerForm};
pub use photo_idea::{PhotoIdea, PhotoIdeaForm};
pub use podcast::{Podcast, PodcastForm};
pub use quote::{Quote, QuoteForm};
pub use upload_link::UploadLinkForm;
pub use video_idea::{VideoIdea, VideoIdeaForm};

/// A content type managed through the backend.
pub trait Entity: Send + Sync + 'static {
    /// Human-readable name used in logs and errors.
    const NAME: &'static str;
    /// Collection path relative to the API base, e.g. `/api/podcast`.
    const PATH: &'static str;

    type Form: FormSchema
        + Searchable
        + Serialize
        + DeserializeOwned
        + Clone
        + Debug
        + Send
        + Sync
        + 'static;
}

/// Entities whose items are marked published through `PUT {id}/upload`.
pub trait UploadConfirmable: Entity {}

/// Entities whose create/edit forms carry a document upload.
pub trait HasAttachment: Entity {
    /// Multipart field name for the file part.
    const FILE_FIELD: &'static str;

    /// Whether the form already references a stored file.
    fn has_stored_file(form: &Self::Form) -> bool;
}

/// A record as returned by the backend: its id, the form fields, and
/// server-managed timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record<F> {
    pub id: DbId,
    #[serde(flatten)]
    pub fields: F,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

impl<F: Searchable> Searchable for Record<F> {
    fn haystack(&self) -> Vec<&str> {
        self.fields.haystack()
    }
}
