//! Per-post analytics rows.
//!
//! Rows are usually reviewed grouped by date and topic; see
//! [`listing::group_by_date_topic`](crate::listing::group_by_date_topic).

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entities::Entity;
use crate::listing::Searchable;
use crate::rules::{known_platform, not_blank, optional_http_url};
use crate::schema::FormSchema;
use crate::types::Date;

pub struct AnalyticContent;

impl Entity for AnalyticContent {
    const NAME: &'static str = "analytic content";
    const PATH: &'static str = "/api/analyticcontent";
    type Form = AnalyticContentForm;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct AnalyticContentForm {
    #[validate(required(message = "Date is required"))]
    pub date: Option<Date>,

    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "Topic is required"),
        length(max = 150, message = "Topic must be at most 150 characters")
    )]
    pub topic: String,

    #[serde(default)]
    #[validate(custom(function = "known_platform"))]
    pub platform: String,

    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "Title is required"),
        length(max = 150, message = "Title must be at most 150 characters")
    )]
    pub title: String,

    #[validate(
        required(message = "Views is required"),
        range(min = 0, message = "Views cannot be negative")
    )]
    pub views: Option<i64>,

    #[validate(
        required(message = "Likes is required"),
        range(min = 0, message = "Likes cannot be negative")
    )]
    pub likes: Option<i64>,

    #[validate(
        required(message = "Comments is required"),
        range(min = 0, message = "Comments cannot be negative")
    )]
    pub comments: Option<i64>,

    #[validate(
        required(message = "Shares is required"),
        range(min = 0, message = "Shares cannot be negative")
    )]
    pub shares: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "optional_http_url", message = "Link must be a valid URL"))]
    pub link: Option<String>,
}

impl FormSchema for AnalyticContentForm {}

impl Searchable for AnalyticContentForm {
    fn haystack(&self) -> Vec<&str> {
        vec![self.topic.as_str(), self.title.as_str(), self.platform.as_str()]
    }
}
