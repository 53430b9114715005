//! One REST client per entity.
//!
//! A [`Resource`] pairs an entity's form schema with its endpoint, so every
//! create and edit path validates the same way before anything is sent.

use std::marker::PhantomData;

use planboard_core::attachment::Attachment;
use planboard_core::entities::{Entity, HasAttachment, Record, UploadConfirmable, UploadLinkForm};
use planboard_core::schema::{FieldErrors, FormContext, FormSchema};
use planboard_core::types::{Date, DbId};
use reqwest::Method;
use serde_json::Value;

use crate::api::{multipart_form, ApiClient};
use crate::error::ClientError;

/// Typed CRUD access to one entity's endpoint.
pub struct Resource<E: Entity> {
    api: ApiClient,
    today: Option<Date>,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> Clone for Resource<E> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            today: self.today,
            _entity: PhantomData,
        }
    }
}

impl<E: Entity> Resource<E> {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            today: None,
            _entity: PhantomData,
        }
    }

    /// Pin the date used by date rules instead of the local clock.
    pub fn with_today(mut self, today: Date) -> Self {
        self.today = Some(today);
        self
    }

    pub fn today(&self) -> Date {
        self.today
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    fn item_path(id: DbId) -> String {
        format!("{}/{}", E::PATH, id)
    }

    // ---- validation ----

    pub fn validate_create(&self, form: &E::Form) -> Result<(), FieldErrors> {
        form.check(&FormContext::create(self.today()))
    }

    pub fn validate_update(
        &self,
        form: &E::Form,
        previous: Option<&E::Form>,
    ) -> Result<(), FieldErrors> {
        form.check(&edit_context(self.today(), previous))
    }

    // ---- requests ----

    /// `GET` the whole collection.
    pub async fn list(&self) -> Result<Vec<Record<E::Form>>, ClientError> {
        let body = self.api.get_json(E::PATH).await?;
        let items = unwrap_envelope(body);
        if items.is_null() {
            return Ok(Vec::new());
        }
        let records: Vec<Record<E::Form>> = serde_json::from_value(items)?;
        tracing::debug!(entity = E::NAME, count = records.len(), "Fetched collection");
        Ok(records)
    }

    /// Validate and `POST` a new item.
    ///
    /// Returns the created record when the backend echoes it back, `None`
    /// when it only acknowledges.
    pub async fn create(&self, form: &E::Form) -> Result<Option<Record<E::Form>>, ClientError> {
        self.validate_create(form)?;
        let body = self.api.post_json(E::PATH, form).await?;
        tracing::info!(entity = E::NAME, "Created item");
        Ok(decode_record(body))
    }

    /// Validate and `PUT` an edited item.
    ///
    /// `previous` is the stored version, used by rules that allow an
    /// unchanged value to pass (for example an already-past shoot date).
    pub async fn update(
        &self,
        id: DbId,
        form: &E::Form,
        previous: Option<&E::Form>,
    ) -> Result<Option<Record<E::Form>>, ClientError> {
        self.validate_update(form, previous)?;
        let body = self.api.put_json(&Self::item_path(id), form).await?;
        tracing::info!(entity = E::NAME, id, "Updated item");
        Ok(decode_record(body))
    }

    /// `DELETE` an item by id.
    pub async fn delete(&self, id: DbId) -> Result<(), ClientError> {
        self.api.delete(&Self::item_path(id)).await?;
        tracing::info!(entity = E::NAME, id, "Deleted item");
        Ok(())
    }
}

impl<E: UploadConfirmable> Resource<E> {
    /// Record the published link for an item (`PUT {id}/upload`), which the
    /// backend uses to mark it done.
    pub async fn confirm_upload(
        &self,
        id: DbId,
        link: &UploadLinkForm,
    ) -> Result<Option<Record<E::Form>>, ClientError> {
        link.check(&FormContext::edit_without_previous(self.today()))?;
        let path = format!("{}/upload", Self::item_path(id));
        let body = self.api.put_json(&path, link).await?;
        tracing::info!(entity = E::NAME, id, "Confirmed upload");
        Ok(decode_record(body))
    }
}

impl<E: HasAttachment> Resource<E> {
    /// Validate and `POST` a new item together with its document.
    pub async fn create_with_attachment(
        &self,
        form: &E::Form,
        attachment: Option<&Attachment>,
    ) -> Result<Option<Record<E::Form>>, ClientError> {
        let mut ctx = FormContext::create(self.today());
        ctx.attachment = attachment;
        form.check(&ctx)?;

        let multipart = multipart_form(form, E::FILE_FIELD, attachment)?;
        let body = self.api.send_multipart(Method::POST, E::PATH, multipart).await?;
        tracing::info!(entity = E::NAME, with_file = attachment.is_some(), "Created item");
        Ok(decode_record(body))
    }

    /// Validate and `PUT` an edit, optionally replacing the document.
    pub async fn update_with_attachment(
        &self,
        id: DbId,
        form: &E::Form,
        previous: Option<&E::Form>,
        attachment: Option<&Attachment>,
    ) -> Result<Option<Record<E::Form>>, ClientError> {
        let mut ctx = edit_context(self.today(), previous);
        ctx.attachment = attachment;
        form.check(&ctx)?;

        let multipart = multipart_form(form, E::FILE_FIELD, attachment)?;
        let body = self
            .api
            .send_multipart(Method::PUT, &Self::item_path(id), multipart)
            .await?;
        tracing::info!(entity = E::NAME, id, with_file = attachment.is_some(), "Updated item");
        Ok(decode_record(body))
    }
}

fn edit_context<F>(today: Date, previous: Option<&F>) -> FormContext<'_, F> {
    match previous {
        Some(previous) => FormContext::edit(today, previous),
        None => FormContext::edit_without_previous(today),
    }
}

/// Accept both bare bodies and `{ "data": ... }` envelopes.
fn unwrap_envelope(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

/// Interpret a mutation response as a record, if it is one.
fn decode_record<F: serde::de::DeserializeOwned>(body: Value) -> Option<Record<F>> {
    let body = unwrap_envelope(body);
    if body.is_null() {
        return None;
    }
    match serde_json::from_value(body) {
        Ok(record) => Some(record),
        Err(err) => {
            tracing::debug!(error = %err, "Mutation response is not a record");
            None
        }
    }
}
