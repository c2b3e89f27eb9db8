//! Conference and seminar submissions.

use super::coerce::{lenient_parsed, optional_datetime, optional_parsed, string_list, string_or_null};
use super::{Attachment, StoredRecord};
use crate::error::{CoreError, Result};
use crate::id::RecordId;
use crate::slug::slugify;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

string_enum! {
    /// Kind of gathering an event describes.
    EventType ("event type") {
        /// Conference
        Conference => "Conference",
        /// Seminar
        Seminar => "Seminar",
        /// Workshop
        Workshop => "Workshop",
        /// Webinar
        Webinar => "Webinar",
        /// Continuing professional development (CPD) event
        CpdEvent => "Continuing professional development event",
        /// Online conference
        OnlineConference => "Online conference",
    }
}

string_enum! {
    /// Academic domain an event belongs to.
    EventCategory ("event category") {
        /// Engineering and Technology
        EngineeringAndTechnology => "Engineering and Technology",
        /// Medical and Health Science
        MedicalAndHealthScience => "Medical And Health Science",
        /// Business and Economics
        BusinessAndEconomics => "Business and Economics",
        /// Education
        Education => "Education",
        /// Social Sciences and Humanities
        SocialSciencesAndHumanities => "Social Sciences and Humanities",
        /// Sports Science
        SportsScience => "Sports Science",
        /// Physical and life sciences
        PhysicalAndLifeSciences => "Physical and life sciences",
        /// Agriculture
        Agriculture => "Agriculture",
        /// Mathematics and statistics
        MathematicsAndStatistics => "Mathematics and statistics",
        /// Law
        Law => "Law",
        /// Interdisciplinary
        Interdisciplinary => "Interdisciplinary",
    }
}

impl EventCategory {
    /// Route segment for this category, e.g. `engineering-and-technology`.
    #[must_use]
    pub fn slug(&self) -> String {
        slugify(self.as_str())
    }

    /// Look a category up by its route segment, ignoring case.
    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        let lowered = slug.to_lowercase();
        Self::ALL.iter().copied().find(|category| category.slug() == lowered)
    }
}

string_enum! {
    /// Moderation state of a submission.
    EventStatus ("event status") {
        /// Awaiting moderation. Every submission starts here.
        Pending => "pending",
        /// Approved and publicly listed.
        Accepted => "accepted",
        /// Declined by a moderator.
        Rejected => "rejected",
    }
}

/// A conference, seminar, workshop or similar submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Backend id.
    pub id: RecordId,

    /// Display name.
    #[serde(rename = "event_name", default, deserialize_with = "string_or_null")]
    pub name: String,

    /// Kind of event. Older records may leave it unset.
    #[serde(default, deserialize_with = "lenient_parsed")]
    pub event_type: Option<EventType>,

    /// Academic domain.
    #[serde(rename = "event_category", default, deserialize_with = "lenient_parsed")]
    pub category: Option<EventCategory>,

    /// Free-text topic, usually one of the category's topics.
    #[serde(rename = "event_topic", default, deserialize_with = "string_or_null")]
    pub topic: String,

    /// HTML-bearing summary.
    #[serde(default, deserialize_with = "string_or_null")]
    pub short_description: String,

    /// Search keywords.
    #[serde(rename = "event_keywords", default, deserialize_with = "string_list")]
    pub keywords: Vec<String>,

    /// Country, free text.
    #[serde(default, deserialize_with = "string_or_null")]
    pub country: String,

    /// State or province, may be empty.
    #[serde(rename = "state_or_province", default, deserialize_with = "string_or_null")]
    pub state: String,

    /// City, may be empty.
    #[serde(default, deserialize_with = "string_or_null")]
    pub city: String,

    /// First day.
    #[serde(rename = "event_start_date", default, deserialize_with = "optional_datetime")]
    pub start_date: Option<DateTime<Utc>>,

    /// Last day.
    #[serde(rename = "event_end_date", default, deserialize_with = "optional_datetime")]
    pub end_date: Option<DateTime<Utc>>,

    /// Abstract submission deadline.
    #[serde(default, deserialize_with = "optional_datetime")]
    pub abstract_deadline: Option<DateTime<Utc>>,

    /// Organizing society.
    #[serde(default, deserialize_with = "string_or_null")]
    pub organizing_society: String,

    /// Contact person.
    #[serde(default, deserialize_with = "string_or_null")]
    pub contact_person: String,

    /// Enquiries email.
    #[serde(default, deserialize_with = "string_or_null")]
    pub enquiries_email: String,

    /// Event website.
    #[serde(default, deserialize_with = "string_or_null")]
    pub website_address: String,

    /// Stored thumbnail filename, empty when none was uploaded.
    #[serde(default, deserialize_with = "string_or_null")]
    pub thumbnail: String,

    /// Moderation state.
    pub status: EventStatus,

    /// Submitting user. Set once at creation.
    #[serde(default, deserialize_with = "optional_parsed")]
    pub submitted_by: Option<RecordId>,

    /// Creation timestamp, backend managed.
    #[serde(default, deserialize_with = "optional_datetime")]
    pub created: Option<DateTime<Utc>>,

    /// Last update timestamp, backend managed.
    #[serde(default, deserialize_with = "optional_datetime")]
    pub updated: Option<DateTime<Utc>>,
}

impl Event {
    /// Thumbnail file field name.
    pub const THUMBNAIL_FIELD: &'static str = "thumbnail";

    /// Returns `true` if the event is visible in public listings.
    #[must_use]
    pub fn is_public(&self) -> bool {
        self.status == EventStatus::Accepted
    }

    /// Returns `true` if `user_id` submitted this event.
    #[must_use]
    pub fn is_owned_by(&self, user_id: &RecordId) -> bool {
        self.submitted_by.as_ref() == Some(user_id)
    }
}

impl StoredRecord for Event {
    const COLLECTION: &'static str = "events";

    fn record_id(&self) -> &RecordId {
        &self.id
    }

    fn file_name(&self, field: &str) -> Option<&str> {
        match field {
            Self::THUMBNAIL_FIELD if !self.thumbnail.is_empty() => Some(&self.thumbnail),
            _ => None,
        }
    }
}

/// Submission form for a new event.
///
/// Has no status or owner; the client stamps both from the active session
/// when submitting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewEvent {
    /// Display name (required).
    pub name: String,
    /// Kind of event (required).
    pub event_type: Option<EventType>,
    /// Academic domain (required).
    pub category: Option<EventCategory>,
    /// Topic.
    pub topic: String,
    /// HTML summary.
    pub short_description: String,
    /// Keywords.
    pub keywords: Vec<String>,
    /// Country.
    pub country: String,
    /// State or province.
    pub state: String,
    /// City.
    pub city: String,
    /// Organizing society.
    pub organizing_society: String,
    /// Contact person.
    pub contact_person: String,
    /// Enquiries email.
    pub enquiries_email: String,
    /// Website.
    pub website_address: String,
    /// First day.
    pub start_date: Option<DateTime<Utc>>,
    /// Last day.
    pub end_date: Option<DateTime<Utc>>,
    /// Abstract deadline.
    pub abstract_deadline: Option<DateTime<Utc>>,
    /// Optional thumbnail upload.
    pub thumbnail: Option<Attachment>,
}

impl NewEvent {
    /// Start a submission with the three required fields.
    #[must_use]
    pub fn new(name: impl Into<String>, event_type: EventType, category: EventCategory) -> Self {
        Self {
            name: name.into(),
            event_type: Some(event_type),
            category: Some(category),
            ..Self::default()
        }
    }

    /// Check required fields.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] naming the first missing field.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(CoreError::validation("event_name", "Event name is required"));
        }
        if self.event_type.is_none() {
            return Err(CoreError::validation("event_type", "Event type is required"));
        }
        if self.category.is_none() {
            return Err(CoreError::validation("event_category", "Event category is required"));
        }
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if end < start {
                return Err(CoreError::validation(
                    "event_end_date",
                    "End date must not be before the start date",
                ));
            }
        }
        Ok(())
    }

    /// Non-empty text fields in backend naming, ready for a multipart body.
    ///
    /// Keywords are encoded as a JSON array and dates as RFC 3339 with
    /// millisecond precision. The thumbnail is not included.
    #[must_use]
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();

        let mut push = |key: &'static str, value: &str| {
            if !value.trim().is_empty() {
                fields.push((key, value.to_string()));
            }
        };

        push("event_name", &self.name);
        push("event_type", self.event_type.map_or("", |t| t.as_str()));
        push("event_category", self.category.map_or("", |c| c.as_str()));
        push("event_topic", &self.topic);
        push("short_description", &self.short_description);
        push("country", &self.country);
        push("state_or_province", &self.state);
        push("city", &self.city);
        push("organizing_society", &self.organizing_society);
        push("contact_person", &self.contact_person);
        push("enquiries_email", &self.enquiries_email);
        push("website_address", &self.website_address);

        for (key, date) in [
            ("event_start_date", self.start_date),
            ("event_end_date", self.end_date),
            ("abstract_deadline", self.abstract_deadline),
        ] {
            if let Some(date) = date {
                push(key, &date.to_rfc3339_opts(SecondsFormat::Millis, true));
            }
        }

        if !self.keywords.is_empty() {
            if let Ok(encoded) = serde_json::to_string(&self.keywords) {
                push("event_keywords", &encoded);
            }
        }

        fields
    }
}

/// Per-status counts for a user's submissions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EventStats {
    /// All submissions.
    pub total: usize,
    /// Awaiting moderation.
    pub pending: usize,
    /// Approved.
    pub accepted: usize,
    /// Declined.
    pub rejected: usize,
}

impl EventStats {
    /// Count events by status.
    #[must_use]
    pub fn tally<'a>(events: impl IntoIterator<Item = &'a Event>) -> Self {
        events.into_iter().fold(Self::default(), |mut stats, event| {
            stats.total += 1;
            match event.status {
                EventStatus::Pending => stats.pending += 1,
                EventStatus::Accepted => stats.accepted += 1,
                EventStatus::Rejected => stats.rejected += 1,
            }
            stats
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn record(status: &str) -> serde_json::Value {
        json!({
            "id": "ev1abc",
            "collectionId": "pbc_events",
            "collectionName": "events",
            "event_name": "International Conference on Robotics",
            "event_type": "Conference",
            "event_category": "Engineering and Technology",
            "event_topic": "Robotics",
            "short_description": "<p>Robots</p>",
            "event_keywords": ["robots", "automation"],
            "country": "India",
            "state_or_province": "Maharashtra",
            "city": "Mumbai",
            "event_start_date": "2025-06-01 00:00:00.000Z",
            "event_end_date": "",
            "abstract_deadline": null,
            "organizing_society": "IEEE",
            "contact_person": "",
            "enquiries_email": "info@example.org",
            "website_address": "https://example.org",
            "thumbnail": "",
            "status": status,
            "submitted_by": "usr123",
            "created": "2025-01-10 08:00:00.000Z",
            "updated": "2025-01-10 08:00:00.000Z"
        })
    }

    #[test]
    fn test_deserialize_backend_record() {
        let event: Event = serde_json::from_value(record("accepted")).unwrap();

        assert_eq!(event.name, "International Conference on Robotics");
        assert_eq!(event.event_type, Some(EventType::Conference));
        assert_eq!(event.category, Some(EventCategory::EngineeringAndTechnology));
        assert_eq!(event.keywords, vec!["robots", "automation"]);
        assert_eq!(event.state, "Maharashtra");
        assert_eq!(event.start_date, Some(Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap()));
        assert_eq!(event.end_date, None);
        assert_eq!(event.abstract_deadline, None);
        assert_eq!(event.submitted_by, Some(RecordId::parse("usr123").unwrap()));
        assert!(event.is_public());
        assert_eq!(event.file_name(Event::THUMBNAIL_FIELD), None);
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let result: std::result::Result<Event, _> = serde_json::from_value(record("approved"));
        assert!(result.is_err());
    }

    #[test]
    fn test_unrecognized_type_and_category_do_not_fail_a_listing() {
        let mut stray = record("accepted");
        stray["event_type"] = json!("Hackathon");
        stray["event_category"] = json!("Alchemy");

        let page: crate::Page<Event> = serde_json::from_value(json!({
            "page": 1,
            "perPage": 12,
            "totalItems": 2,
            "totalPages": 1,
            "items": [record("accepted"), stray],
        }))
        .unwrap();

        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].category, Some(EventCategory::EngineeringAndTechnology));
        assert_eq!(page.items[1].event_type, None);
        assert_eq!(page.items[1].category, None);
        assert_eq!(page.items[1].topic, "Robotics");
    }

    #[test]
    fn test_category_slugs_round_trip() {
        for category in EventCategory::ALL {
            assert_eq!(EventCategory::from_slug(&category.slug()), Some(*category));
        }
        assert_eq!(
            EventCategory::from_slug("Sports-Science"),
            Some(EventCategory::SportsScience)
        );
    }

    #[test]
    fn test_validate_requires_name_type_category() {
        let mut form = NewEvent::new("Summit", EventType::Seminar, EventCategory::Law);
        assert!(form.validate().is_ok());

        form.category = None;
        assert_eq!(
            form.validate(),
            Err(CoreError::validation("event_category", "Event category is required"))
        );

        form.name = "  ".to_string();
        assert!(matches!(
            form.validate(),
            Err(CoreError::Validation { field: "event_name", .. })
        ));
    }

    #[test]
    fn test_form_fields_skip_empty_and_encode() {
        let mut form = NewEvent::new("Summit", EventType::Workshop, EventCategory::Education);
        form.keywords = vec!["teaching".to_string(), "pedagogy".to_string()];
        form.start_date = Some(Utc.with_ymd_and_hms(2025, 9, 1, 0, 0, 0).unwrap());

        let fields = form.form_fields();

        assert!(fields.contains(&("event_name", "Summit".to_string())));
        assert!(fields.contains(&("event_type", "Workshop".to_string())));
        assert!(fields.contains(&("event_keywords", r#"["teaching","pedagogy"]"#.to_string())));
        assert!(fields.contains(&("event_start_date", "2025-09-01T00:00:00.000Z".to_string())));
        assert!(!fields.iter().any(|(key, _)| *key == "city"));
        assert!(!fields.iter().any(|(key, _)| *key == "status" || *key == "submitted_by"));
    }

    #[test]
    fn test_stats_tally() {
        let events: Vec<Event> = ["pending", "accepted", "accepted", "rejected"]
            .into_iter()
            .map(|status| serde_json::from_value(record(status)).unwrap())
            .collect();

        let stats = EventStats::tally(&events);
        assert_eq!(
            stats,
            EventStats { total: 4, pending: 1, accepted: 2, rejected: 1 }
        );
    }
}
