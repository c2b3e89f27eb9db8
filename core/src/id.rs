//! Backend record identifiers.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque identifier assigned by the backend to every record.
///
/// The backend generates ids from `[a-z0-9]` and accepts custom ids drawn
/// from `[A-Za-z0-9_]`. Parsing rejects everything else, hyphens included,
/// which is what lets a slug carry the id as its last `-` segment.
///
/// # Examples
///
/// ```
/// # use conference_alert_core::RecordId;
/// let id = RecordId::parse("k3m9x2q7w1p8z4r").unwrap();
/// assert_eq!(id.as_str(), "k3m9x2q7w1p8z4r");
/// assert!(RecordId::parse("abc-def").is_err());
/// assert!(RecordId::parse("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecordId(String);

impl RecordId {
    /// Parse and validate a record id.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidRecordId`] if `raw` is empty or contains
    /// a character outside `[A-Za-z0-9_]`.
    pub fn parse(raw: &str) -> Result<Self> {
        if Self::is_valid(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(CoreError::InvalidRecordId(raw.to_string()))
        }
    }

    /// Returns `true` if `raw` would parse as a record id.
    #[must_use]
    pub fn is_valid(raw: &str) -> bool {
        !raw.is_empty() && raw.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
    }

    /// Borrow the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RecordId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for RecordId {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self> {
        if Self::is_valid(&value) {
            Ok(Self(value))
        } else {
            Err(CoreError::InvalidRecordId(value))
        }
    }
}

impl From<RecordId> for String {
    fn from(id: RecordId) -> Self {
        id.0
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
