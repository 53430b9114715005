//! Document attachments (video scripts) and their upload rules.

use std::path::Path;

use crate::error::CoreError;

pub const MIME_PDF: &str = "application/pdf";
pub const MIME_DOC: &str = "application/msword";
pub const MIME_DOCX: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Document types accepted for upload.
pub const ALLOWED_DOCUMENT_MIMES: &[&str] = &[MIME_PDF, MIME_DOC, MIME_DOCX];

/// Maximum upload size in bytes (10 MiB).
pub const MAX_ATTACHMENT_BYTES: usize = 10 * 1024 * 1024;

pub const MSG_FILE_REQUIRED: &str = "A script file is required";
pub const MSG_FILE_TYPE: &str = "File must be a PDF, DOC or DOCX document";
pub const MSG_FILE_TOO_LARGE: &str = "File must be at most 10 MB";

/// A file picked for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    /// Declared content type; inferred from the extension when absent.
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            bytes,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Read a file from disk, keeping only its base name.
    pub fn from_path(path: &Path) -> Result<Self, CoreError> {
        let bytes = std::fs::read(path).map_err(|source| CoreError::Attachment {
            path: path.display().to_string(),
            source,
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self::new(file_name, bytes))
    }

    /// Effective MIME type, if it can be determined.
    pub fn mime_type(&self) -> Option<&str> {
        match &self.content_type {
            Some(ct) => Some(ct.split(';').next().unwrap_or(ct).trim()),
            None => mime_from_extension(&self.file_name),
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Map a document extension to its MIME type.
pub fn mime_from_extension(file_name: &str) -> Option<&'static str> {
    let ext = Path::new(file_name).extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "pdf" => Some(MIME_PDF),
        "doc" => Some(MIME_DOC),
        "docx" => Some(MIME_DOCX),
        "txt" => Some("text/plain"),
        _ => None,
    }
}

/// Validate an optional attachment against the document rules.
pub fn validate_attachment(attachment: Option<&Attachment>, required: bool) -> Result<(), String> {
    let Some(attachment) = attachment else {
        if required {
            return Err(MSG_FILE_REQUIRED.to_string());
        }
        return Ok(());
    };

    match attachment.mime_type() {
        Some(mime) if ALLOWED_DOCUMENT_MIMES.contains(&mime) => {}
        _ => return Err(MSG_FILE_TYPE.to_string()),
    }
    if attachment.size() > MAX_ATTACHMENT_BYTES {
        return Err(MSG_FILE_TOO_LARGE.to_string());
    }
    Ok(())
}
