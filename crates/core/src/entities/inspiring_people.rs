//! "Inspiring people" feature posts.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entities::Entity;
use crate::listing::Searchable;
use crate::rules::{known_status, not_blank, optional_http_url};
use crate::schema::{check_create_status, FieldErrors, FormContext, FormSchema};
use crate::status::serialize_status;
use crate::types::Date;

pub struct InspiringPeople;

impl Entity for InspiringPeople {
    const NAME: &'static str = "inspiring person";
    const PATH: &'static str = "/api/inspiringpeople";
    type Form = InspiringPersonForm;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct InspiringPersonForm {
    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "Name is required"),
        length(max = 150, message = "Name must be at most 150 characters")
    )]
    pub name: String,

    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "Profession is required"),
        length(max = 150, message = "Profession must be at most 150 characters")
    )]
    pub profession: String,

    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "Story is required"),
        length(max = 1000, message = "Story must be at most 1000 characters")
    )]
    pub story: String,

    #[validate(required(message = "Upload date is required"))]
    pub upload_date: Option<Date>,

    #[serde(default, serialize_with = "serialize_status")]
    #[validate(custom(function = "known_status"))]
    pub status: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(
        function = "optional_http_url",
        message = "Profile link must be a valid URL"
    ))]
    pub profile_link: Option<String>,
}

impl FormSchema for InspiringPersonForm {
    fn cross_field(&self, ctx: &FormContext<'_, Self>, errors: &mut FieldErrors) {
        check_create_status(errors, &self.status, ctx.is_edit());
    }
}

impl Searchable for InspiringPersonForm {
    fn haystack(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.profession.as_str()]
    }
}
