//! Request and response bodies of the backend's REST API.

use conference_alert_core::User;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Newest first.
pub const SORT_NEWEST: &str = "-created";

/// Latest start date first, then newest.
pub const SORT_BY_START_DATE: &str = "-event_start_date,-created";

/// Earliest start date first, then oldest.
pub const SORT_SOONEST: &str = "event_start_date,created";

/// Relation expanded on event listings.
pub const EXPAND_SUBMITTER: &str = "submitted_by";

/// Body of `auth-with-password`.
#[derive(Debug, Serialize)]
pub(crate) struct PasswordAuthRequest<'a> {
    pub identity: &'a str,
    pub password: &'a str,
}

/// Body of `request-verification`.
#[derive(Debug, Serialize)]
pub(crate) struct VerificationRequest<'a> {
    pub email: &'a str,
}

/// Body used to create a regular account.
#[derive(Debug, Serialize)]
pub(crate) struct NewAccount<'a> {
    pub email: &'a str,
    pub password: &'a str,
    #[serde(rename = "passwordConfirm")]
    pub password_confirm: &'a str,
    pub name: &'a str,
}

/// Response of `auth-with-password` and `auth-refresh`.
#[derive(Debug, Deserialize)]
pub(crate) struct AuthResponse {
    pub token: String,
    pub record: User,
}

/// Query string of a list request.
#[derive(Debug, Serialize)]
pub(crate) struct ListQuery<'a> {
    pub page: u32,
    #[serde(rename = "perPage")]
    pub per_page: u32,
    #[serde(skip_serializing_if = "is_blank")]
    pub filter: &'a str,
    #[serde(skip_serializing_if = "is_blank")]
    pub sort: &'a str,
    #[serde(skip_serializing_if = "is_blank")]
    pub expand: &'a str,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_blank(value: &&str) -> bool {
    value.is_empty()
}

/// Error body returned with any non-2xx status.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: BTreeMap<String, FieldError>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct FieldError {
    #[serde(default)]
    pub message: String,
}

impl ApiErrorBody {
    /// Parse an error body, falling back to the raw text.
    pub fn from_text(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_else(|_| Self {
            message: body.trim().to_string(),
            data: BTreeMap::new(),
        })
    }

    /// Top-level message followed by any per-field messages.
    pub fn describe(&self, fallback: &str) -> String {
        let headline = if self.message.is_empty() {
            fallback
        } else {
            &self.message
        };

        if self.data.is_empty() {
            return headline.to_string();
        }

        let fields = self
            .data
            .iter()
            .map(|(field, error)| format!("{field}: {}", error.message))
            .collect::<Vec<_>>()
            .join("; ");
        format!("{headline} ({fields})")
    }
}
