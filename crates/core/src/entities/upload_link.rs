//! Upload confirmation: the published link that marks an item done.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::rules::is_http_url;
use crate::schema::FormSchema;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct UploadLinkForm {
    #[serde(default)]
    #[validate(custom(function = "published_link"))]
    pub link: String,
}

fn published_link(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required")
            .with_message(Cow::from("Upload link is required")));
    }
    if !is_http_url(value) {
        return Err(
            ValidationError::new("url").with_message(Cow::from("Upload link must be a valid URL"))
        );
    }
    Ok(())
}

impl UploadLinkForm {
    pub fn new(link: impl Into<String>) -> Self {
        Self { link: link.into() }
    }
}

impl FormSchema for UploadLinkForm {}
