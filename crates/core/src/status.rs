//! Content status shared by every scheduling entity.
//!
//! New content starts as `scheduled` or `on hold`. `done` is only reached
//! through an edit or an upload confirmation, never on a create form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};

use crate::error::CoreError;

pub const STATUS_SCHEDULED: &str = "scheduled";
pub const STATUS_ON_HOLD: &str = "on hold";
pub const STATUS_DONE: &str = "done";

/// Alternate spelling accepted on input.
const STATUS_ON_HOLD_ALIAS: &str = "on-hold";

/// All valid status values, in display order.
pub const VALID_STATUSES: &[&str] = &[STATUS_SCHEDULED, STATUS_ON_HOLD, STATUS_DONE];

/// Statuses selectable when creating new content.
pub const CREATE_STATUSES: &[&str] = &[STATUS_SCHEDULED, STATUS_ON_HOLD];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ContentStatus {
    Scheduled,
    OnHold,
    Done,
}

impl ContentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentStatus::Scheduled => STATUS_SCHEDULED,
            ContentStatus::OnHold => STATUS_ON_HOLD,
            ContentStatus::Done => STATUS_DONE,
        }
    }

    /// Whether a create form may pick this status.
    pub fn is_selectable_on_create(self) -> bool {
        !matches!(self, ContentStatus::Done)
    }
}

impl FromStr for ContentStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            STATUS_SCHEDULED => Ok(ContentStatus::Scheduled),
            STATUS_ON_HOLD | STATUS_ON_HOLD_ALIAS => Ok(ContentStatus::OnHold),
            STATUS_DONE => Ok(ContentStatus::Done),
            other => Err(CoreError::UnknownStatus(other.to_string())),
        }
    }
}

impl TryFrom<String> for ContentStatus {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ContentStatus> for String {
    fn from(value: ContentStatus) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for ContentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Serialize a form's status field in its canonical wire form, so input
/// aliases such as `on-hold` go out as `on hold`. Values that do not parse
/// are sent unchanged.
pub fn serialize_status<S: Serializer>(value: &str, serializer: S) -> Result<S::Ok, S::Error> {
    match value.parse::<ContentStatus>() {
        Ok(status) => serializer.serialize_str(status.as_str()),
        Err(_) => serializer.serialize_str(value),
    }
}
