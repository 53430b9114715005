use planboard_core::schema::FieldErrors;

/// Shown when the backend gives no usable message.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

/// Errors from the REST client layer.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The form failed client-side validation; nothing was sent.
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    /// The HTTP request itself failed (network, DNS, TLS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend returned a non-2xx status code.
    #[error("API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// A 2xx body could not be decoded into the expected shape.
    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Another mutation on the same collection has not finished yet.
    #[error("A submission is already in progress")]
    SubmitInFlight,
}

impl ClientError {
    /// The single line a screen shows inline for this failure.
    ///
    /// API errors use the backend's `message` (or `error`) JSON field when
    /// present; transport and decoding failures fall back to a generic text.
    pub fn inline_message(&self) -> String {
        match self {
            ClientError::Validation(errors) => errors.to_string(),
            ClientError::Api { body, .. } => server_message(body)
                .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string()),
            ClientError::SubmitInFlight => self.to_string(),
            ClientError::Request(_) | ClientError::Decode(_) => {
                GENERIC_FAILURE_MESSAGE.to_string()
            }
        }
    }

    /// HTTP status for API errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Request(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl From<FieldErrors> for ClientError {
    fn from(errors: FieldErrors) -> Self {
        ClientError::Validation(errors)
    }
}

/// Pull a human-readable message out of a JSON error body.
fn server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "error", "msg"]
        .iter()
        .find_map(|key| value.get(*key).and_then(|v| v.as_str()))
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}
