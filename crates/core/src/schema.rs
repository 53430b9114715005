//! Form schemas: field-level rules from the `validator` derive plus
//! cross-field rules that need the create/edit context.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use validator::{Validate, ValidationErrors};

use crate::attachment::Attachment;
use crate::rules::{validate_shoot_date, validate_upload_after_shoot, MSG_STATUS_DONE_ON_CREATE};
use crate::status::ContentStatus;
use crate::types::Date;

// ---------------------------------------------------------------------------
// FieldErrors
// ---------------------------------------------------------------------------

/// Validation messages keyed by field name, rendered next to each field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Messages for one field, empty if the field passed.
    pub fn messages(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<&ValidationErrors> for FieldErrors {
    fn from(errors: &ValidationErrors) -> Self {
        let mut out = FieldErrors::default();
        for (field, field_errors) in errors.field_errors() {
            for err in field_errors.iter() {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string());
                out.add(field.to_string(), message);
            }
        }
        out
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

// ---------------------------------------------------------------------------
// FormContext
// ---------------------------------------------------------------------------

/// What a form is being validated for.
///
/// `previous` is the stored version of the record on edit, when known. It
/// drives the rules that compare against the stored value.
pub struct FormContext<'a, F> {
    pub today: Date,
    pub editing: bool,
    pub previous: Option<&'a F>,
    pub attachment: Option<&'a Attachment>,
}

impl<'a, F> FormContext<'a, F> {
    pub fn create(today: Date) -> Self {
        Self {
            today,
            editing: false,
            previous: None,
            attachment: None,
        }
    }

    pub fn edit(today: Date, previous: &'a F) -> Self {
        Self {
            today,
            editing: true,
            previous: Some(previous),
            attachment: None,
        }
    }

    /// Edit of a record whose stored version was not loaded.
    pub fn edit_without_previous(today: Date) -> Self {
        Self {
            today,
            editing: true,
            previous: None,
            attachment: None,
        }
    }

    pub fn with_attachment(mut self, attachment: &'a Attachment) -> Self {
        self.attachment = Some(attachment);
        self
    }

    pub fn is_edit(&self) -> bool {
        self.editing
    }
}

// ---------------------------------------------------------------------------
// FormSchema
// ---------------------------------------------------------------------------

/// A form that can be checked before it is submitted.
pub trait FormSchema: Validate + Sized {
    /// Rules spanning several fields or depending on the context.
    fn cross_field(&self, _ctx: &FormContext<'_, Self>, _errors: &mut FieldErrors) {}

    /// Run every rule and collect all failures.
    fn check(&self, ctx: &FormContext<'_, Self>) -> Result<(), FieldErrors> {
        let mut errors = match self.validate() {
            Ok(()) => FieldErrors::default(),
            Err(e) => FieldErrors::from(&e),
        };
        self.cross_field(ctx, &mut errors);
        errors.into_result()
    }
}

// ---------------------------------------------------------------------------
// Shared cross-field helpers
// ---------------------------------------------------------------------------

/// Apply the shoot/upload date rules.
///
/// Missing dates are already reported by the `required` field rule, so only
/// complete pairs are compared.
pub(crate) fn check_schedule(
    errors: &mut FieldErrors,
    shoot: Option<Date>,
    upload: Option<Date>,
    previous_shoot: Option<Date>,
    today: Date,
) {
    if let Some(shoot) = shoot {
        if let Err(msg) = validate_shoot_date(shoot, previous_shoot, today) {
            errors.add("shoot_date", msg);
        }
        if let Some(upload) = upload {
            if let Err(msg) = validate_upload_after_shoot(shoot, upload) {
                errors.add("upload_date", msg);
            }
        }
    }
}

/// Reject `done` on create forms. Unknown values are left to `known_status`.
pub(crate) fn check_create_status(errors: &mut FieldErrors, status: &str, is_edit: bool) {
    if is_edit {
        return;
    }
    if let Ok(parsed) = status.parse::<ContentStatus>() {
        if !parsed.is_selectable_on_create() {
            errors.add("status", MSG_STATUS_DONE_ON_CREATE);
        }
    }
}
