//! Slug codec.
//!
//! A slug is `slugify(title) + "-" + id`. Record ids never contain `-`
//! (see [`RecordId`]), so the id is always the last hyphen-delimited
//! segment and decoding is a single `rsplit`.

use crate::id::RecordId;
use crate::models::EventCategory;

/// Lowercase `text`, keep `[a-z0-9]`, and join the remaining words with single hyphens.
///
/// Whitespace and hyphen runs both collapse to one `-`; leading and trailing
/// hyphens are dropped. Characters outside `[a-z0-9]` after lowercasing are
/// removed without acting as separators.
///
/// # Examples
///
/// ```
/// # use conference_alert_core::slug::slugify;
/// assert_eq!(slugify("  Rust & Systems -- 2025!  "), "rust-systems-2025");
/// assert_eq!(slugify("Café Society"), "caf-society");
/// assert_eq!(slugify(""), "");
/// ```
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_separator = false;

    for c in text.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c);
        } else if c.is_whitespace() || c == '-' {
            pending_separator = true;
        }
    }

    slug
}

/// Build the navigable slug for a record.
///
/// A title that slugifies to nothing yields the bare id.
///
/// # Examples
///
/// ```
/// # use conference_alert_core::{slug, RecordId};
/// let id = RecordId::parse("a1b2c3").unwrap();
/// assert_eq!(slug::encode("World Congress on AI", &id), "world-congress-on-ai-a1b2c3");
/// assert_eq!(slug::encode("", &id), "a1b2c3");
/// ```
#[must_use]
pub fn encode(title: &str, id: &RecordId) -> String {
    let base = slugify(title);
    if base.is_empty() {
        id.to_string()
    } else {
        format!("{base}-{id}")
    }
}

/// Recover the record id from a slug.
///
/// Returns `None` for an empty slug or when the trailing segment is not a
/// valid id. Whether the record exists is left to the lookup.
///
/// # Examples
///
/// ```
/// # use conference_alert_core::slug::decode;
/// assert_eq!(decode("world-congress-on-ai-a1b2c3").unwrap().as_str(), "a1b2c3");
/// assert!(decode("").is_none());
/// assert!(decode("trailing-").is_none());
/// ```
#[must_use]
pub fn decode(slug: &str) -> Option<RecordId> {
    slug.rsplit('-')
        .next()
        .and_then(|segment| RecordId::parse(segment).ok())
}

/// Turn a route segment back into a display name.
///
/// Known category slugs map to their canonical names; anything else is
/// de-hyphenated and title-cased word by word.
///
/// # Examples
///
/// ```
/// # use conference_alert_core::slug::parse_category_slug;
/// assert_eq!(parse_category_slug("Engineering-And-Technology"), "Engineering and Technology");
/// assert_eq!(parse_category_slug("new-york"), "New York");
/// assert_eq!(parse_category_slug(""), "");
/// ```
#[must_use]
pub fn parse_category_slug(slug: &str) -> String {
    if slug.is_empty() {
        return String::new();
    }

    let lowered = slug.to_lowercase();
    if let Some(category) = EventCategory::ALL
        .iter()
        .find(|category| category.slug() == lowered)
    {
        return category.as_str().to_string();
    }

    title_case(&slug.replace('-', " "))
}

/// Uppercase the first character of every word, leaving the rest untouched.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;

    for c in text.chars() {
        let is_word_char = c.is_alphanumeric() || c == '_';
        if is_word_char && at_word_start {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = !is_word_char;
    }

    out
}
