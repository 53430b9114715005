//! HTTP layer for the backend's JSON endpoints.
//!
//! Wraps the verbs the dashboard uses (list, create, update, delete and the
//! multipart upload variant) using [`reqwest`]. Bodies come back as raw
//! [`serde_json::Value`] so callers can accept the backend's slightly
//! different envelope shapes.

use planboard_core::attachment::Attachment;
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::ClientError;

/// HTTP client for one backend instance.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Build a client with the configured timeout and credentials.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;
        Ok(Self::with_client(client, config))
    }

    /// Create an API client reusing an existing [`reqwest::Client`]. The
    /// base URL and token come from `config`; its timeout is not applied.
    pub fn with_client(client: reqwest::Client, config: &ClientConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a path such as `/api/podcast/3`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `GET path`.
    pub async fn get_json(&self, path: &str) -> Result<serde_json::Value, ClientError> {
        tracing::debug!(path, "GET");
        let response = self.request(Method::GET, path).send().await?;
        Self::parse_response(response).await
    }

    /// `POST path` with a JSON body.
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<serde_json::Value, ClientError> {
        tracing::debug!(path, "POST");
        let response = self.request(Method::POST, path).json(body).send().await?;
        Self::parse_response(response).await
    }

    /// `PUT path` with a JSON body.
    pub async fn put_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<serde_json::Value, ClientError> {
        tracing::debug!(path, "PUT");
        let response = self.request(Method::PUT, path).json(body).send().await?;
        Self::parse_response(response).await
    }

    /// `DELETE path`, discarding the body.
    pub async fn delete(&self, path: &str) -> Result<(), ClientError> {
        tracing::debug!(path, "DELETE");
        let response = self.request(Method::DELETE, path).send().await?;
        Self::check_status(response).await
    }

    /// Send a `multipart/form-data` body with `POST` or `PUT`.
    pub async fn send_multipart(
        &self,
        method: Method,
        path: &str,
        form: Form,
    ) -> Result<serde_json::Value, ClientError> {
        tracing::debug!(path, %method, "multipart");
        let response = self.request(method, path).multipart(form).send().await?;
        Self::parse_response(response).await
    }

    // ---- private helpers ----

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let builder = self.client.request(method, self.url(path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`ClientError::Api`]
    /// containing the status and body text on failure.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::warn!(status = status.as_u16(), "Backend returned an error");
            return Err(ClientError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful body as JSON. An empty body becomes `null`.
    async fn parse_response(
        response: reqwest::Response,
    ) -> Result<serde_json::Value, ClientError> {
        let response = Self::ensure_success(response).await?;
        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }

    /// Assert the response has a success status code, discarding the body.
    async fn check_status(response: reqwest::Response) -> Result<(), ClientError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}

/// Build a multipart body: one text part per top-level form field, plus the
/// attachment as a file part named `file_field`.
///
/// `null` fields are omitted; strings are sent as-is and other JSON values
/// in their JSON text form.
pub fn multipart_form<T: Serialize>(
    fields: &T,
    file_field: &'static str,
    attachment: Option<&Attachment>,
) -> Result<Form, ClientError> {
    let mut form = Form::new();

    if let serde_json::Value::Object(map) = serde_json::to_value(fields)? {
        for (name, value) in map {
            match value {
                serde_json::Value::Null => {}
                serde_json::Value::String(s) => form = form.text(name, s),
                other => form = form.text(name, other.to_string()),
            }
        }
    }

    if let Some(attachment) = attachment {
        let mut part = Part::bytes(attachment.bytes.clone()).file_name(attachment.file_name.clone());
        if let Some(mime) = attachment.mime_type() {
            part = part.mime_str(mime)?;
        }
        form = form.part(file_field, part);
    }

    Ok(form)
}
