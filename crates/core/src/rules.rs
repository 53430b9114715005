//! Field-level predicates shared by the entity schemas.
//!
//! The `validator` derive calls the `fn(&str) -> Result<(), ValidationError>`
//! functions below through `custom(function = ...)`; each schema attaches its
//! own field-specific message. The date rules need more than one field and
//! are called from [`FormSchema::cross_field`](crate::schema::FormSchema).

use std::borrow::Cow;

use validator::ValidationError;

use crate::status::{ContentStatus, VALID_STATUSES};
use crate::types::Date;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Default character limit for short text fields.
pub const MAX_SHORT_TEXT: usize = 150;

/// Limit for a quote body.
pub const MAX_QUOTE_TEXT: usize = 500;

/// Limit for concept / story descriptions.
pub const MAX_LONG_TEXT: usize = 1000;

/// Limit for social-media captions.
pub const MAX_CAPTION_TEXT: usize = 2200;

/// Platforms the team publishes to.
pub const VALID_PLATFORMS: &[&str] = &[
    "instagram",
    "tiktok",
    "youtube",
    "facebook",
    "x",
    "linkedin",
    "spotify",
];

pub const MSG_SHOOT_DATE_PAST: &str = "Shoot date cannot be in the past";
pub const MSG_UPLOAD_BEFORE_SHOOT: &str = "Upload date cannot be earlier than shoot date";
pub const MSG_STATUS_DONE_ON_CREATE: &str =
    "New content can only be scheduled or on hold";

// ---------------------------------------------------------------------------
// Custom field validators
// ---------------------------------------------------------------------------

/// Reject empty and whitespace-only strings.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(error("required", "This field is required"));
    }
    Ok(())
}

/// Require an absolute `http`/`https` URL with a host.
pub fn http_url(value: &str) -> Result<(), ValidationError> {
    if is_http_url(value) {
        Ok(())
    } else {
        Err(error("url", "Must be a valid URL"))
    }
}

/// Like [`http_url`], but an empty value means "not provided".
pub fn optional_http_url(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Ok(());
    }
    http_url(value)
}

/// Require one of the known content statuses.
pub fn known_status(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(error("required", "Status is required"));
    }
    if value.parse::<ContentStatus>().is_ok() {
        Ok(())
    } else {
        let mut err = error(
            "status",
            "Status must be one of: scheduled, on hold, done",
        );
        err.add_param(Cow::from("allowed"), &VALID_STATUSES);
        Err(err)
    }
}

/// Require one of [`VALID_PLATFORMS`], matched case-insensitively.
pub fn known_platform(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(error("required", "Platform is required"));
    }
    let lowered = value.trim().to_ascii_lowercase();
    if VALID_PLATFORMS.contains(&lowered.as_str()) {
        Ok(())
    } else {
        let mut err = error(
            "platform",
            "Platform must be one of: instagram, tiktok, youtube, facebook, x, linkedin, spotify",
        );
        err.add_param(Cow::from("allowed"), &VALID_PLATFORMS);
        Err(err)
    }
}

/// Whether `value` parses as an absolute web URL.
pub fn is_http_url(value: &str) -> bool {
    match url::Url::parse(value.trim()) {
        Ok(parsed) => {
            matches!(parsed.scheme(), "http" | "https") && parsed.host_str().is_some()
        }
        Err(_) => false,
    }
}

fn error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::from(message))
}

// ---------------------------------------------------------------------------
// Cross-field date rules
// ---------------------------------------------------------------------------

/// A shoot date may not lie before `today`.
///
/// On edit, a date equal to `previous` (the stored value) passes even when
/// it is already in the past, so unrelated edits to old content still save.
pub fn validate_shoot_date(
    shoot: Date,
    previous: Option<Date>,
    today: Date,
) -> Result<(), String> {
    if previous == Some(shoot) {
        return Ok(());
    }
    if shoot < today {
        return Err(MSG_SHOOT_DATE_PAST.to_string());
    }
    Ok(())
}

/// Upload may happen on the shoot day or later, never before.
pub fn validate_upload_after_shoot(shoot: Date, upload: Date) -> Result<(), String> {
    if upload < shoot {
        return Err(MSG_UPLOAD_BEFORE_SHOOT.to_string());
    }
    Ok(())
}
