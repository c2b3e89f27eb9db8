//! Error types for domain validation.

use thiserror::Error;

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised while validating or coercing domain values.
///
/// None of these involve I/O. They surface either when a caller hands in
/// a malformed value or when a backend record fails ingress coercion.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Record id is empty or contains characters outside `[A-Za-z0-9_]`.
    #[error("Invalid record id: {0:?}")]
    InvalidRecordId(String),

    /// Date string could not be parsed in any supported format.
    #[error("Invalid date: {0:?}")]
    InvalidDate(String),

    /// A value did not match any variant of a closed enumeration.
    #[error("Unknown {kind}: {value:?}")]
    UnknownVariant {
        /// Name of the enumeration
        kind: &'static str,
        /// Offending value
        value: String,
    },

    /// A required field was missing or failed validation.
    #[error("{field}: {message}")]
    Validation {
        /// Field name as the backend knows it
        field: &'static str,
        /// Human-readable reason
        message: String,
    },
}

impl CoreError {
    /// Shorthand for a [`CoreError::Validation`].
    #[must_use]
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Returns `true` if this error is due to caller input rather than backend data.
    ///
    /// # Examples
    ///
    /// ```
    /// # use conference_alert_core::CoreError;
    /// assert!(CoreError::validation("title", "required").is_user_error());
    /// assert!(!CoreError::InvalidDate("x".into()).is_user_error());
    /// ```
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}
