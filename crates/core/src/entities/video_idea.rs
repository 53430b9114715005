//! Video content ideas, with a script document attached.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::attachment::validate_attachment;
use crate::entities::{Entity, HasAttachment};
use crate::listing::Searchable;
use crate::rules::{known_status, not_blank, optional_http_url};
use crate::schema::{check_create_status, check_schedule, FieldErrors, FormContext, FormSchema};
use crate::status::serialize_status;
use crate::types::Date;

pub struct VideoIdea;

impl Entity for VideoIdea {
    const NAME: &'static str = "video idea";
    const PATH: &'static str = "/api/idekontenvideo";
    type Form = VideoIdeaForm;
}

impl HasAttachment for VideoIdea {
    const FILE_FIELD: &'static str = "script";

    fn has_stored_file(form: &VideoIdeaForm) -> bool {
        form.script_file
            .as_deref()
            .is_some_and(|f| !f.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct VideoIdeaForm {
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

    /// Server-side location of the uploaded script, set by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script_file: Option<String>,
}

impl FormSchema for VideoIdeaForm {
    fn cross_field(&self, ctx: &FormContext<'_, Self>, errors: &mut FieldErrors) {
        check_create_status(errors, &self.status, ctx.is_edit());
        check_schedule(
            errors,
            self.shoot_date,
            self.upload_date,
            ctx.previous.and_then(|p| p.shoot_date),
            ctx.today,
        );

        // Only an edit can keep a script already stored on the server.
        let stored = ctx.is_edit()
            && (VideoIdea::has_stored_file(self)
                || ctx.previous.is_some_and(VideoIdea::has_stored_file));
        let required = !stored;
        if let Err(msg) = validate_attachment(ctx.attachment, required) {
            errors.add(VideoIdea::FILE_FIELD, msg);
        }
    }
}

impl Searchable for VideoIdeaForm {
    fn haystack(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.concept.as_str(), self.pic.as_str()]
    }
}
