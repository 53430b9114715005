//! Quote posts.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entities::Entity;
use crate::listing::Searchable;
use crate::rules::{known_status, not_blank, optional_http_url};
use crate::schema::{check_create_status, FieldErrors, FormContext, FormSchema};
use crate::status::serialize_status;
use crate::types::Date;

pub struct Quote;

impl Entity for Quote {
    const NAME: &'static str = "quote";
    const PATH: &'static str = "/api/quote";
    type Form = QuoteForm;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct QuoteForm {
    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "Quote is required"),
        length(max = 500, message = "Quote must be at most 500 characters")
    )]
    pub quote: String,

    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "Author is required"),
        length(max = 150, message = "Author must be at most 150 characters")
    )]
    pub author: String,

    #[validate(required(message = "Upload date is required"))]
    pub upload_date: Option<Date>,

    #[serde(default, serialize_with = "serialize_status")]
    #[validate(custom(function = "known_status"))]
    pub status: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "optional_http_url", message = "Link must be a valid URL"))]
    pub link: Option<String>,
}

impl FormSchema for QuoteForm {
    fn cross_field(&self, ctx: &FormContext<'_, Self>, errors: &mut FieldErrors) {
        check_create_status(errors, &self.status, ctx.is_edit());
    }
}

impl Searchable for QuoteForm {
    fn haystack(&self) -> Vec<&str> {
        vec![self.quote.as_str(), self.author.as_str()]
    }
}
