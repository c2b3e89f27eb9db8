//! Error types for the data access client.

use conference_alert_core::CoreError;
use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Every way a client operation can fail.
///
/// Lookups that find nothing are not errors: they return `Ok(None)`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    // ═══════════════════════════════════════════════════════════
    // Validation Errors (raised before any request)
    // ═══════════════════════════════════════════════════════════

    /// A required field was missing or malformed.
    #[error("{field}: {message}")]
    Validation {
        /// Field name as the backend knows it
        field: String,
        /// Human-readable reason
        message: String,
    },

    // ═══════════════════════════════════════════════════════════
    // Authorization Errors
    // ═══════════════════════════════════════════════════════════

    /// Operation requires a signed-in user and no valid session exists.
    #[error("User not authenticated")]
    NotAuthenticated,

    /// Operation requires an administrator.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Backend rejected the credentials or token.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    // ═══════════════════════════════════════════════════════════
    // Backend / Network Errors
    // ═══════════════════════════════════════════════════════════

    /// Client could not be constructed.
    #[error("Client configuration error: {0}")]
    Configuration(String),

    /// HTTP request failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Response parsing failed
    #[error("Response parsing failed: {0}")]
    ResponseParseFailed(String),

    /// Backend returned an error
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message from the backend
        message: String,
    },

    /// Session could not be persisted or restored.
    #[error("Session storage error: {0}")]
    SessionStorage(String),
}

impl ClientError {
    /// Returns `true` if the caller's input was rejected before any request.
    ///
    /// # Examples
    ///
    /// ```
    /// # use conference_alert_client::ClientError;
    /// let err = ClientError::Validation { field: "title".into(), message: "required".into() };
    /// assert!(err.is_validation_error());
    /// assert!(!ClientError::NotAuthenticated.is_validation_error());
    /// ```
    #[must_use]
    pub const fn is_validation_error(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Returns `true` if a session or role was missing or rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// # use conference_alert_client::ClientError;
    /// assert!(ClientError::NotAuthenticated.is_authorization_error());
    /// assert!(ClientError::Forbidden("admins only".into()).is_authorization_error());
    /// assert!(!ClientError::RequestFailed("timeout".into()).is_authorization_error());
    /// ```
    #[must_use]
    pub const fn is_authorization_error(&self) -> bool {
        matches!(
            self,
            Self::NotAuthenticated | Self::Forbidden(_) | Self::Unauthorized(_)
        )
    }

    /// Message suitable for showing to the user.
    ///
    /// Backend and network details are collapsed into a generic message.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation { message, .. } => message.clone(),
            Self::NotAuthenticated => "You must be logged in to do that.".to_string(),
            Self::Forbidden(_) => "You do not have permission to do that.".to_string(),
            Self::Unauthorized(message) => message.clone(),
            Self::Api { status: 400, message } => message.clone(),
            Self::Configuration(_)
            | Self::RequestFailed(_)
            | Self::ResponseParseFailed(_)
            | Self::Api { .. }
            | Self::SessionStorage(_) => "Something went wrong. Please try again.".to_string(),
        }
    }
}

impl From<CoreError> for ClientError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Validation { field, message } => Self::Validation {
                field: field.to_string(),
                message,
            },
            other => Self::ResponseParseFailed(other.to_string()),
        }
    }
}
