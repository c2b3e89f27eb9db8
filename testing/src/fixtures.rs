//! Records and envelopes shaped like backend responses.

use crate::mocks::TEST_EPOCH;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde_json::{Value, json};

/// A token whose payload carries `exp` when given.
///
/// The signature is not real; the client only decodes the payload.
#[must_use]
pub fn fake_jwt(exp: Option<i64>) -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = match exp {
        Some(exp) => json!({"id": "usr123", "type": "auth", "exp": exp}),
        None => json!({"id": "usr123", "type": "auth"}),
    };
    let payload = URL_SAFE_NO_PAD.encode(payload.to_string());
    format!("{header}.{payload}.c2lnbmF0dXJl")
}

/// A token valid for an hour after [`TEST_EPOCH`].
#[must_use]
pub fn valid_token() -> String {
    fake_jwt(Some(TEST_EPOCH + 3600))
}

/// A token that expired an hour before [`TEST_EPOCH`].
#[must_use]
pub fn expired_token() -> String {
    fake_jwt(Some(TEST_EPOCH - 3600))
}

/// A regular account.
#[must_use]
pub fn user_json(id: &str, email: &str) -> Value {
    json!({
        "id": id,
        "collectionId": "_pb_users_auth_",
        "collectionName": "users",
        "email": email,
        "emailVisibility": false,
        "name": "Ada Lovelace",
        "verified": true,
        "created": "2024-11-02 09:15:00.000Z",
        "updated": "2024-11-02 09:15:00.000Z"
    })
}

/// An administrator account.
#[must_use]
pub fn admin_json(id: &str, email: &str) -> Value {
    json!({
        "id": id,
        "collectionId": "pbc_3142635823",
        "collectionName": "_superusers",
        "email": email,
        "created": "2024-01-01 00:00:00.000Z",
        "updated": "2024-01-01 00:00:00.000Z"
    })
}

/// Body of a successful `auth-with-password`.
#[must_use]
pub fn auth_json(token: &str, record: &Value) -> Value {
    json!({"token": token, "record": record})
}

/// A complete event record.
#[must_use]
pub fn event_json(id: &str, name: &str, status: &str) -> Value {
    json!({
        "id": id,
        "collectionId": "pbc_events",
        "collectionName": "events",
        "event_name": name,
        "event_type": "Conference",
        "event_category": "Engineering and Technology",
        "event_topic": "Robotics",
        "short_description": "<p>Three days of talks.</p>",
        "event_keywords": ["robotics", "automation"],
        "country": "India",
        "state_or_province": "Maharashtra",
        "city": "Mumbai",
        "event_start_date": "2025-03-10 00:00:00.000Z",
        "event_end_date": "2025-03-12 00:00:00.000Z",
        "abstract_deadline": "2025-02-01 00:00:00.000Z",
        "organizing_society": "Institute of Robotics",
        "contact_person": "R. Sharma",
        "enquiries_email": "info@robotics.example.org",
        "website_address": "https://robotics.example.org",
        "thumbnail": "robots_x1y2z3.png",
        "status": status,
        "submitted_by": "usr123",
        "created": "2024-12-01 10:00:00.000Z",
        "updated": "2024-12-01 10:00:00.000Z"
    })
}

/// A complete blog record.
#[must_use]
pub fn blog_json(id: &str, title: &str, category: &str, status: &str) -> Value {
    json!({
        "id": id,
        "collectionId": "pbc_blogs",
        "collectionName": "blogs",
        "title": title,
        "slug": "",
        "content": "<p>Plan your submissions early.</p>",
        "category": category,
        "tags": "conferences, tips",
        "author": "Editorial Team",
        "featured_image": "",
        "status": status,
        "created": "2024-12-05 08:00:00.000Z",
        "updated": "2024-12-05 08:00:00.000Z"
    })
}

/// A list envelope.
#[must_use]
pub fn list_json(items: Vec<Value>, page: u32, per_page: u32, total_items: u64) -> Value {
    let total_pages = total_items.div_ceil(u64::from(per_page.max(1)));
    json!({
        "page": page,
        "perPage": per_page,
        "totalItems": total_items,
        "totalPages": total_pages,
        "items": items
    })
}

/// An error body with optional per-field details.
#[must_use]
pub fn error_json(status: u16, message: &str, fields: &[(&str, &str)]) -> Value {
    let data: serde_json::Map<String, Value> = fields
        .iter()
        .map(|(field, message)| {
            (
                (*field).to_string(),
                json!({"code": "validation_invalid", "message": message}),
            )
        })
        .collect();
    json!({"code": status, "message": message, "data": data})
}
