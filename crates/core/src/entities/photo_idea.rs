//! Photo content ideas.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entities::Entity;
use crate::listing::Searchable;
use crate::rules::{known_status, not_blank, optional_http_url};
use crate::schema::{check_create_status, check_schedule, FieldErrors, FormContext, FormSchema};
use crate::status::serialize_status;
use crate::types::Date;

pub struct PhotoIdea;

impl Entity for PhotoIdea {
    const NAME: &'static str = "photo idea";
    const PATH: &'static str = "/api/idekontenfoto";
    type Form = PhotoIdeaForm;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct PhotoIdeaForm {
    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "Title is required"),
        length(max = 150, message = "Title must be at most 150 characters")
    )]
    pub title: String,

    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "Concept is required"),
        length(max = 1000, message = "Concept must be at most 1000 characters")
    )]
    pub concept: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(
        function = "optional_http_url",
        message = "Reference link must be a valid URL"
    ))]
    pub reference_link: Option<String>,

    /// Person in charge.
    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "PIC is required"),
        length(max = 150, message = "PIC must be at most 150 characters")
    )]
    pub pic: String,

    #[validate(required(message = "Shoot date is required"))]
    pub shoot_date: Option<Date>,

    #[validate(required(message = "Upload date is required"))]
    pub upload_date: Option<Date>,

    #[serde(default, serialize_with = "serialize_status")]
    #[validate(custom(function = "known_status"))]
    pub status: String,
}

impl FormSchema for PhotoIdeaForm {
    fn cross_field(&self, ctx: &FormContext<'_, Self>, errors: &mut FieldErrors) {
        check_create_status(errors, &self.status, ctx.is_edit());
        check_schedule(
            errors,
            self.shoot_date,
            self.upload_date,
            ctx.previous.and_then(|p| p.shoot_date),
            ctx.today,
        );
    }
}

impl Searchable for PhotoIdeaForm {
    fn haystack(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.concept.as_str(), self.pic.as_str()]
    }
}
