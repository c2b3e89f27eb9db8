//! Serde helpers that coerce loosely-typed backend values into typed fields.
//!
//! The backend stores unset text, date and relation fields as `""`, and
//! list-like fields arrive either as JSON arrays or as strings depending on
//! how the record was written. These helpers absorb that variance at the
//! boundary so the rest of the crate only sees typed values.

use crate::error::{CoreError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::{self, Deserializer};
use serde::Deserialize;
use std::fmt::Display;
use std::str::FromStr;

/// Parse a backend date string.
///
/// Accepts the backend's `YYYY-MM-DD HH:MM:SS.sssZ` layout, RFC 3339, and
/// bare `YYYY-MM-DD` dates (taken as midnight UTC). Empty input is `None`.
///
/// # Errors
///
/// Returns [`CoreError::InvalidDate`] when the string matches none of the formats.
pub fn parse_datetime(raw: &str) -> Result<Option<DateTime<Utc>>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(parsed.with_timezone(&Utc)));
    }

    let without_zone = raw.trim_end_matches('Z');
    for layout in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(without_zone, layout) {
            return Ok(Some(naive.and_utc()));
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc()));
    }

    Err(CoreError::InvalidDate(raw.to_string()))
}

/// Deserialize an optional backend date, treating `null` and `""` as unset.
///
/// # Errors
///
/// Fails when the string is present but unparseable.
pub fn optional_datetime<'de, D>(deserializer: D) -> std::result::Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw {
        Some(raw) => parse_datetime(&raw).map_err(de::Error::custom),
        None => Ok(None),
    }
}

/// Deserialize a string-backed value, treating `null` and `""` as unset.
///
/// # Errors
///
/// Fails when a non-empty string does not parse as `T`.
pub fn optional_parsed<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(de::Error::custom),
    }
}

/// Like [`optional_parsed`], but a value that does not parse is logged and
/// treated as unset, so one stray record cannot fail a whole listing.
///
/// # Errors
///
/// Fails only when the value is neither a string nor `null`.
pub fn lenient_parsed<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => match value.parse() {
            Ok(parsed) => Ok(Some(parsed)),
            Err(error) => {
                tracing::warn!(value, %error, "Ignoring unrecognized value");
                Ok(None)
            }
        },
    }
}

/// Deserialize `null` as an empty string.
///
/// # Errors
///
/// Fails when the value is neither a string nor `null`.
pub fn string_or_null<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringList {
    List(Vec<String>),
    Text(String),
}

/// Split a free-text list on commas, trimming and dropping empty entries.
#[must_use]
pub fn split_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Deserialize a list that may arrive as an array, a JSON-encoded array
/// string, a comma-separated string, or `null`.
///
/// # Errors
///
/// Fails when the value is some other JSON type.
pub fn string_list<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<StringList>::deserialize(deserializer)?;
    let items = match raw {
        None => Vec::new(),
        Some(StringList::List(items)) => items,
        Some(StringList::Text(text)) => {
            let text = text.trim();
            if text.starts_with('[') {
                serde_json::from_str::<Vec<String>>(text).unwrap_or_else(|_| split_list(text))
            } else {
                split_list(text)
            }
        }
    };

    Ok(items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_backend_layout() {
        let parsed = parse_datetime("2025-03-14 09:30:00.123Z").unwrap().unwrap();
        assert_eq!(parsed.timestamp_millis(), Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0).unwrap().timestamp_millis() + 123);
    }

    #[test]
    fn test_parse_rfc3339_and_bare_date() {
        let rfc = parse_datetime("2025-03-14T09:30:00Z").unwrap().unwrap();
        assert_eq!(rfc, Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0).unwrap());

        let bare = parse_datetime("2025-03-14").unwrap().unwrap();
        assert_eq!(bare, Utc.with_ymd_and_hms(2025, 3, 14, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_empty_and_garbage() {
        assert_eq!(parse_datetime("").unwrap(), None);
        assert_eq!(parse_datetime("   ").unwrap(), None);
        assert!(matches!(parse_datetime("soon"), Err(CoreError::InvalidDate(_))));
    }

    #[derive(Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "string_list")]
        items: Vec<String>,
    }

    #[derive(Deserialize)]
    struct Tagged {
        #[serde(default, deserialize_with = "lenient_parsed")]
        category: Option<crate::models::EventCategory>,
    }

    #[test]
    fn test_lenient_parsed_drops_unknown_values() {
        let unknown: Tagged = serde_json::from_str(r#"{"category": "Alchemy"}"#).unwrap();
        assert_eq!(unknown.category, None);

        let blank: Tagged = serde_json::from_str(r#"{"category": " "}"#).unwrap();
        assert_eq!(blank.category, None);

        let known: Tagged = serde_json::from_str(r#"{"category": "Law"}"#).unwrap();
        assert_eq!(known.category, Some(crate::models::EventCategory::Law));

        assert!(serde_json::from_str::<Tagged>(r#"{"category": 7}"#).is_err());
    }

    #[test]
    fn test_string_list_shapes() {
        let from_array: Holder = serde_json::from_str(r#"{"items": ["ai", " ml "]}"#).unwrap();
        assert_eq!(from_array.items, vec!["ai", "ml"]);

        let from_json_text: Holder = serde_json::from_str(r#"{"items": "[\"ai\",\"ml\"]"}"#).unwrap();
        assert_eq!(from_json_text.items, vec!["ai", "ml"]);

        let from_commas: Holder = serde_json::from_str(r#"{"items": "ai, ml,,"}"#).unwrap();
        assert_eq!(from_commas.items, vec!["ai", "ml"]);

        let from_null: Holder = serde_json::from_str(r#"{"items": null}"#).unwrap();
        assert!(from_null.items.is_empty());

        let missing: Holder = serde_json::from_str("{}").unwrap();
        assert!(missing.items.is_empty());
    }
}
