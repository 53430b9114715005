//! Online content planner items.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entities::{Entity, UploadConfirmable};
use crate::listing::Searchable;
use crate::rules::{known_platform, known_status, not_blank, optional_http_url};
use crate::schema::{check_create_status, FieldErrors, FormContext, FormSchema};
use crate::status::serialize_status;
use crate::types::Date;

pub struct OnlinePlanner;

impl Entity for OnlinePlanner {
    const NAME: &'static str = "online planner item";
    const PATH: &'static str = "/api/onlineplanner";
    type Form = OnlinePlannerForm;
}

impl UploadConfirmable for OnlinePlanner {}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct OnlinePlannerForm {
    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "Title is required"),
        length(max = 150, message = "Title must be at most 150 characters")
    )]
    pub title: String,

    #[serde(default)]
    #[validate(custom(function = "known_platform"))]
    pub platform: String,

    /// Feed, reels, story, short...
    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "Content type is required"),
        length(max = 150, message = "Content type must be at most 150 characters")
    )]
    pub content_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 2200, message = "Caption must be at most 2200 characters"))]
    pub caption: Option<String>,

    #[validate(required(message = "Upload date is required"))]
    pub upload_date: Option<Date>,

    #[serde(default, serialize_with = "serialize_status")]
    #[validate(custom(function = "known_status"))]
    pub status: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "optional_http_url", message = "Link must be a valid URL"))]
    pub link: Option<String>,
}

impl FormSchema for OnlinePlannerForm {
    fn cross_field(&self, ctx: &FormContext<'_, Self>, errors: &mut FieldErrors) {
        check_create_status(errors, &self.status, ctx.is_edit());
    }
}

impl Searchable for OnlinePlannerForm {
    fn haystack(&self) -> Vec<&str> {
        let mut fields = vec![
            self.title.as_str(),
            self.platform.as_str(),
            self.content_type.as_str(),
        ];
        if let Some(caption) = &self.caption {
            fields.push(caption);
        }
        fields
    }
}
