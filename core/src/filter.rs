//! Search filter builder.
//!
//! Produces expressions in the backend's filter dialect: `=` for exact
//! match, `~` for substring match, `>=`/`<` for ordering, `&&`/`||` for
//! boolean composition, and double-quoted string literals.
//!
//! Closed enumerations (category, type, status) are matched with `=`.
//! Open text (country, topic, city, state, free-text queries) is matched
//! with `~`. Mixing the two up either under-matches free text or lets one
//! category bleed into another that shares a substring.

use crate::id::RecordId;
use crate::models::{BlogCategory, EventCategory, EventType};
use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::str::FromStr;

/// Value that disables a filter dimension, compared case-insensitively.
pub const ALL_SENTINEL: &str = "all";

/// Fields searched by the free-text event query.
pub const EVENT_TEXT_FIELDS: [&str; 3] = ["event_name", "event_topic", "organizing_society"];

/// Fields searched by the free-text blog query.
pub const BLOG_TEXT_FIELDS: [&str; 4] = ["title", "content", "tags", "category"];

/// Comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    /// Exact match.
    Eq,
    /// Substring match.
    Contains,
    /// Greater than or equal.
    Gte,
    /// Strictly less than.
    Lt,
}

impl Op {
    /// Operator token in the filter dialect.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Contains => "~",
            Self::Gte => ">=",
            Self::Lt => "<",
        }
    }
}

/// Quote `value` as a filter string literal, escaping `\` and `"`.
///
/// # Examples
///
/// ```
/// # use conference_alert_core::filter::quote;
/// assert_eq!(quote("Mumbai"), r#""Mumbai""#);
/// assert_eq!(quote(r#"say "hi""#), r#""say \"hi\"""#);
/// ```
#[must_use]
pub fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        if c == '"' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

/// A conjunction of predicates.
///
/// Predicates with a blank value are skipped rather than emitted as a
/// match against the empty string.
///
/// # Examples
///
/// ```
/// # use conference_alert_core::filter::Filter;
/// let filter = Filter::new()
///     .eq("status", "accepted")
///     .contains("city", "")
///     .contains("country", "India");
/// assert_eq!(filter.to_string(), r#"status = "accepted" && country ~ "India""#);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    clauses: Vec<String>,
}

impl Filter {
    /// An empty filter, matching everything.
    #[must_use]
    pub const fn new() -> Self {
        Self { clauses: Vec::new() }
    }

    /// Append `field <op> "value"` unless `value` is blank.
    #[must_use]
    pub fn predicate(mut self, field: &str, op: Op, value: &str) -> Self {
        if !value.trim().is_empty() {
            self.clauses.push(format!("{field} {} {}", op.as_str(), quote(value)));
        }
        self
    }

    /// Exact match.
    #[must_use]
    pub fn eq(self, field: &str, value: &str) -> Self {
        self.predicate(field, Op::Eq, value)
    }

    /// Substring match.
    #[must_use]
    pub fn contains(self, field: &str, value: &str) -> Self {
        self.predicate(field, Op::Contains, value)
    }

    /// Lower bound, inclusive.
    #[must_use]
    pub fn gte(self, field: &str, value: &str) -> Self {
        self.predicate(field, Op::Gte, value)
    }

    /// Upper bound, exclusive.
    #[must_use]
    pub fn lt(self, field: &str, value: &str) -> Self {
        self.predicate(field, Op::Lt, value)
    }

    /// Append `(a ~ "term" || b ~ "term" || ...)` unless `term` is blank.
    #[must_use]
    pub fn any_contains(mut self, fields: &[&str], term: &str) -> Self {
        if !term.trim().is_empty() && !fields.is_empty() {
            let literal = quote(term);
            let alternatives: Vec<String> = fields
                .iter()
                .map(|field| format!("{field} ~ {literal}"))
                .collect();
            self.clauses.push(format!("({})", alternatives.join(" || ")));
        }
        self
    }

    /// Conjoin another filter's predicates after this one's.
    #[must_use]
    pub fn and(mut self, other: Self) -> Self {
        self.clauses.extend(other.clauses);
        self
    }

    /// Returns `true` if no predicate has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Render the expression.
    #[must_use]
    pub fn build(&self) -> String {
        self.clauses.join(" && ")
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.build())
    }
}

/// Which event field a search term is matched against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SearchType {
    /// Exact match on `event_category`.
    #[default]
    Category,
    /// Substring match on `event_topic`.
    Topic,
    /// Substring match on `city`.
    City,
    /// Substring match on `state_or_province`.
    State,
}

impl SearchType {
    /// Route segment for this search type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Topic => "topic",
            Self::City => "city",
            Self::State => "state",
        }
    }

    /// Parse a route segment, defaulting to [`SearchType::Category`].
    #[must_use]
    pub fn parse_lenient(raw: &str) -> Self {
        raw.parse().unwrap_or_default()
    }

    fn predicate(self, filter: Filter, term: &str) -> Filter {
        match self {
            Self::Category => filter.eq("event_category", term),
            Self::Topic => filter.contains("event_topic", term),
            Self::City => filter.contains("city", term),
            Self::State => filter.contains("state_or_province", term),
        }
    }
}

impl fmt::Display for SearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchType {
    type Err = crate::error::CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "category" => Ok(Self::Category),
            "topic" => Ok(Self::Topic),
            "city" => Ok(Self::City),
            "state" => Ok(Self::State),
            _ => Err(crate::error::CoreError::UnknownVariant {
                kind: "search type",
                value: s.to_string(),
            }),
        }
    }
}

/// Trim `value` and drop it if blank or the `all` sentinel.
#[must_use]
pub fn meaningful(value: &str) -> Option<&str> {
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case(ALL_SENTINEL) {
        None
    } else {
        Some(value)
    }
}

/// Predicate restricting events to publicly listed ones.
#[must_use]
pub fn accepted_events() -> Filter {
    Filter::new().eq("status", "accepted")
}

/// Predicate restricting blog posts to published ones.
#[must_use]
pub fn published_blogs() -> Filter {
    Filter::new().eq("status", "published")
}

/// Build the event search filter for a country and a typed search term.
///
/// Always starts with `status = "accepted"`, then the country predicate,
/// then the term predicate. Blank or `all` inputs are omitted.
///
/// # Examples
///
/// ```
/// # use conference_alert_core::filter::{build_search_filter, SearchType};
/// assert_eq!(build_search_filter("all", "all", SearchType::Category), r#"status = "accepted""#);
/// assert_eq!(
///     build_search_filter("all", "Mumbai", SearchType::City),
///     r#"status = "accepted" && city ~ "Mumbai""#,
/// );
/// ```
#[must_use]
pub fn build_search_filter(country: &str, term: &str, search_type: SearchType) -> String {
    SearchCriteria::new()
        .country(country)
        .term(term, search_type)
        .to_filter()
        .build()
}

/// Full set of event search selections.
///
/// Predicates are emitted in a fixed order: status, country, term,
/// start-date window, event type, category, free-text query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCriteria {
    /// Country, substring matched.
    pub country: Option<String>,
    /// Search term, matched according to `search_type`.
    pub term: Option<String>,
    /// How `term` is matched.
    pub search_type: SearchType,
    /// Exact event type.
    pub event_type: Option<EventType>,
    /// Exact category, independent of `term`.
    pub category: Option<EventCategory>,
    /// Free text over name, topic and organizer.
    pub query: Option<String>,
    /// Earliest start date, inclusive.
    pub starts_from: Option<NaiveDate>,
    /// Latest start date, exclusive.
    pub starts_before: Option<NaiveDate>,
}

impl SearchCriteria {
    /// No selections: every accepted event.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict by country. Blank or `all` clears the restriction.
    #[must_use]
    pub fn country(mut self, country: &str) -> Self {
        self.country = meaningful(country).map(ToString::to_string);
        self
    }

    /// Restrict by a typed term. Blank or `all` clears the restriction.
    #[must_use]
    pub fn term(mut self, term: &str, search_type: SearchType) -> Self {
        self.term = meaningful(term).map(ToString::to_string);
        self.search_type = search_type;
        self
    }

    /// Restrict by event type.
    #[must_use]
    pub const fn event_type(mut self, event_type: Option<EventType>) -> Self {
        self.event_type = event_type;
        self
    }

    /// Restrict by category.
    #[must_use]
    pub const fn category(mut self, category: Option<EventCategory>) -> Self {
        self.category = category;
        self
    }

    /// Free-text query. Blank clears it.
    #[must_use]
    pub fn query(mut self, query: &str) -> Self {
        let query = query.trim();
        self.query = (!query.is_empty()).then(|| query.to_string());
        self
    }

    /// Events starting in `[from, before)`.
    #[must_use]
    pub const fn starting_between(mut self, from: Option<NaiveDate>, before: Option<NaiveDate>) -> Self {
        self.starts_from = from;
        self.starts_before = before;
        self
    }

    /// Render as a filter.
    #[must_use]
    pub fn to_filter(&self) -> Filter {
        let mut filter = accepted_events();

        if let Some(country) = &self.country {
            filter = filter.contains("country", country);
        }
        if let Some(term) = &self.term {
            filter = self.search_type.predicate(filter, term);
        }
        if let Some(from) = self.starts_from {
            filter = filter.gte("event_start_date", &date_literal(from));
        }
        if let Some(before) = self.starts_before {
            filter = filter.lt("event_start_date", &date_literal(before));
        }
        if let Some(event_type) = self.event_type {
            filter = filter.eq("event_type", event_type.as_str());
        }
        if let Some(category) = self.category {
            filter = filter.eq("event_category", category.as_str());
        }
        if let Some(query) = &self.query {
            filter = filter.any_contains(&EVENT_TEXT_FIELDS, query);
        }

        filter
    }
}

/// Midnight UTC of `date` in the backend's datetime layout.
#[must_use]
pub fn date_literal(date: NaiveDate) -> String {
    format!("{:04}-{:02}-{:02} 00:00:00.000Z", date.year(), date.month(), date.day())
}

/// Accepted events starting on or after `today`.
#[must_use]
pub fn upcoming_filter(today: NaiveDate) -> Filter {
    SearchCriteria::new()
        .starting_between(Some(today), None)
        .to_filter()
}

/// Events submitted by `user_id`, whatever their status.
#[must_use]
pub fn user_events_filter(user_id: &RecordId) -> Filter {
    Filter::new().eq("submitted_by", user_id.as_str())
}

/// Blog listing selection.
///
/// When several selections are active the most specific wins:
/// free-text search, then category, then tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BlogQuery {
    /// Every published post.
    #[default]
    All,
    /// Substring search over title, content, tags and category.
    Search(String),
    /// Exact category.
    Category(BlogCategory),
    /// Substring match on tags.
    Tag(String),
}

impl BlogQuery {
    /// Resolve UI selections into a single query.
    #[must_use]
    pub fn from_selection(search: &str, category: Option<BlogCategory>, tag: &str) -> Self {
        if let Some(search) = (!search.trim().is_empty()).then(|| search.trim()) {
            Self::Search(search.to_string())
        } else if let Some(category) = category {
            Self::Category(category)
        } else if let Some(tag) = meaningful(tag) {
            Self::Tag(tag.to_string())
        } else {
            Self::All
        }
    }

    /// Render as a filter scoped to published posts.
    #[must_use]
    pub fn to_filter(&self) -> Filter {
        let filter = published_blogs();
        match self {
            Self::All => filter,
            Self::Search(term) => filter.any_contains(&BLOG_TEXT_FIELDS, term),
            Self::Category(category) => filter.eq("category", category.as_str()),
            Self::Tag(tag) => filter.contains("tags", tag),
        }
    }
}
