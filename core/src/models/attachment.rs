//! File uploads attached to submissions.

/// A file to upload alongside a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Original filename. The backend stores a sanitized variant.
    pub file_name: String,
    /// MIME type, e.g. `image/png`.
    pub content_type: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl Attachment {
    /// Create an attachment.
    #[must_use]
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Returns `true` if the attachment carries no data.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
