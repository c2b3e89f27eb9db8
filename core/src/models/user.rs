//! Authenticated actors.

use super::coerce::string_or_null;
use crate::id::RecordId;
use serde::{Deserialize, Serialize};

/// Collection that holds administrator accounts.
pub const SUPERUSERS_COLLECTION: &str = "_superusers";

/// Collection that holds regular accounts.
pub const USERS_COLLECTION: &str = "users";

/// A user or administrator record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Backend id.
    pub id: RecordId,

    /// Email; empty when the account hides it.
    #[serde(default, deserialize_with = "string_or_null")]
    pub email: String,

    /// Display name.
    #[serde(default, deserialize_with = "string_or_null")]
    pub name: String,

    /// Whether the email address has been verified.
    #[serde(default)]
    pub verified: bool,

    /// Collection the account was authenticated against.
    #[serde(rename = "collectionName", default, deserialize_with = "string_or_null")]
    pub collection_name: String,

    /// Explicit administrator flag on regular accounts.
    #[serde(default, alias = "is_superuser", alias = "isSuperuser")]
    pub superuser: bool,
}

impl User {
    /// Returns `true` if the account may perform administrator-only operations.
    #[must_use]
    pub fn is_superuser(&self) -> bool {
        self.superuser || self.collection_name == SUPERUSERS_COLLECTION
    }

    /// Name to show in the UI, falling back to the email.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.email
        } else {
            &self.name
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_regular_user() {
        let user: User = serde_json::from_value(json!({
            "id": "usr123",
            "collectionName": "users",
            "email": "ada@example.com",
            "name": "",
            "verified": true
        }))
        .unwrap();

        assert!(!user.is_superuser());
        assert_eq!(user.display_name(), "ada@example.com");
    }

    #[test]
    fn test_superuser_by_collection_or_flag() {
        let admin: User = serde_json::from_value(json!({
            "id": "adm1",
            "collectionName": "_superusers",
            "email": "root@example.com"
        }))
        .unwrap();
        assert!(admin.is_superuser());

        let flagged: User = serde_json::from_value(json!({
            "id": "usr9",
            "collectionName": "users",
            "is_superuser": true
        }))
        .unwrap();
        assert!(flagged.is_superuser());
    }

    #[test]
    fn test_persisted_form_round_trips() {
        let user: User = serde_json::from_value(json!({
            "id": "usr123",
            "collectionName": "users",
            "email": "ada@example.com",
            "name": "Ada"
        }))
        .unwrap();

        let stored = serde_json::to_string(&user).unwrap();
        let restored: User = serde_json::from_str(&stored).unwrap();
        assert_eq!(restored, user);
    }
}
