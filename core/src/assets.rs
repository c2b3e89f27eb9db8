//! File URL derivation.

use crate::models::StoredRecord;

/// URL of a file stored on a record, or `None` if the field is unset.
///
/// The shape is `{files_base}/{collection}/{record_id}/{filename}` where
/// `files_base` is the backend's `/api/files` endpoint.
///
/// # Examples
///
/// ```
/// # use conference_alert_core::assets::resolve_asset_url;
/// # use conference_alert_core::models::{Event, StoredRecord};
/// # fn demo(event: &Event) {
/// let url = resolve_asset_url("https://host/api/files", event, Event::THUMBNAIL_FIELD);
/// # }
/// ```
#[must_use]
pub fn resolve_asset_url<R: StoredRecord>(files_base: &str, record: &R, field: &str) -> Option<String> {
    let file_name = record.file_name(field).filter(|name| !name.is_empty())?;
    Some(format!(
        "{}/{}/{}/{}",
        files_base.trim_end_matches('/'),
        R::COLLECTION,
        record.record_id(),
        file_name
    ))
}
