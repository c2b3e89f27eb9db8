//! Search and detail URL shapes.
//!
//! Event search lives under `/search/{country}/{type}/{term}` with each
//! part slugified, or `/search/city/{city}` for the city directories.
//! Detail pages live under `/event/{slug}` and `/blog/{slug}`.

use crate::filter::{meaningful, SearchCriteria, SearchType};
use crate::id::RecordId;
use crate::slug::{encode, parse_category_slug, slugify};

/// Path prefix of the search views.
pub const SEARCH_PREFIX: &str = "/search";

fn slug_or_all(value: &str) -> String {
    meaningful(value)
        .map(slugify)
        .filter(|slug| !slug.is_empty())
        .unwrap_or_else(|| crate::filter::ALL_SENTINEL.to_string())
}

/// Build a search path.
///
/// # Examples
///
/// ```
/// # use conference_alert_core::route::search_path;
/// # use conference_alert_core::filter::SearchType;
/// assert_eq!(
///     search_path("India", "Engineering and Technology", SearchType::Category),
///     "/search/india/category/engineering-and-technology",
/// );
/// assert_eq!(search_path("", "AI", SearchType::Topic), "/search/all/topic/ai");
/// ```
#[must_use]
pub fn search_path(country: &str, term: &str, search_type: SearchType) -> String {
    format!(
        "{SEARCH_PREFIX}/{}/{}/{}",
        slug_or_all(country),
        search_type,
        slug_or_all(term)
    )
}

/// Build a city directory path.
#[must_use]
pub fn city_path(city: &str) -> String {
    format!("{SEARCH_PREFIX}/city/{}", slugify(city))
}

/// Path of an event detail page.
#[must_use]
pub fn event_path(name: &str, id: &RecordId) -> String {
    format!("/event/{}", encode(name, id))
}

/// Path of a blog post page.
#[must_use]
pub fn blog_path(title: &str, id: &RecordId) -> String {
    format!("/blog/{}", encode(title, id))
}

/// Path of a monthly calendar page.
#[must_use]
pub fn calendar_path(year: i32, month: u32) -> String {
    format!("/calendar/{year}/{month}")
}

/// Selections recovered from a search path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchRoute {
    /// Country display name, `None` for all countries.
    pub country: Option<String>,
    /// Term display name, `None` when no term was given.
    pub term: Option<String>,
    /// How the term is matched.
    pub search_type: SearchType,
}

impl SearchRoute {
    /// Interpret the segments after `/search`.
    ///
    /// `[country]` and `[country, x]` select a country only;
    /// `[country, type, term, ..]` add a typed term; `["city", city]`
    /// selects a city anywhere.
    #[must_use]
    pub fn from_segments(segments: &[&str]) -> Self {
        match segments {
            ["city", city] => Self {
                country: None,
                term: display(city),
                search_type: SearchType::City,
            },
            [country, search_type, term, ..] => Self {
                country: display(country),
                term: display(term),
                search_type: SearchType::parse_lenient(search_type),
            },
            [country, ..] => Self {
                country: display(country),
                ..Self::default()
            },
            [] => Self::default(),
        }
    }

    /// Interpret a full path such as `/search/india/topic/robotics`.
    ///
    /// Returns `None` if the path is not a search path.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let rest = path.strip_prefix(SEARCH_PREFIX)?;
        if !(rest.is_empty() || rest.starts_with('/')) {
            return None;
        }
        let segments: Vec<&str> = rest.split('/').filter(|segment| !segment.is_empty()).collect();
        Some(Self::from_segments(&segments))
    }

    /// Search criteria for this route.
    #[must_use]
    pub fn criteria(&self) -> SearchCriteria {
        SearchCriteria::new()
            .country(self.country.as_deref().unwrap_or_default())
            .term(self.term.as_deref().unwrap_or_default(), self.search_type)
    }

    /// Heading for the results page.
    #[must_use]
    pub fn title(&self) -> String {
        let country = self.country.as_deref().unwrap_or("All");
        match (&self.term, self.search_type) {
            (Some(term), SearchType::Topic) => format!("{term} Events in {country}"),
            (Some(term), SearchType::Category) => format!("{term} Conferences in {country}"),
            (Some(term), SearchType::City | SearchType::State) => format!("Events in {term}"),
            (None, _) if self.country.is_some() => format!("Events in {country}"),
            (None, _) => "All Events".to_string(),
        }
    }
}

fn display(segment: &str) -> Option<String> {
    meaningful(segment).map(parse_category_slug)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_category_route_round_trip() {
        let path = search_path("India", "Engineering and Technology", SearchType::Category);
        let route = SearchRoute::from_path(&path).unwrap();

        assert_eq!(route.country.as_deref(), Some("India"));
        assert_eq!(route.term.as_deref(), Some("Engineering and Technology"));
        assert_eq!(route.search_type, SearchType::Category);
        assert_eq!(
            route.criteria().to_filter().build(),
            r#"status = "accepted" && country ~ "India" && event_category = "Engineering and Technology""#
        );
        assert_eq!(route.title(), "Engineering and Technology Conferences in India");
    }

    #[test]
    fn test_city_route() {
        let route = SearchRoute::from_path(&city_path("New York")).unwrap();
        assert_eq!(route.term.as_deref(), Some("New York"));
        assert_eq!(route.search_type, SearchType::City);
        assert_eq!(
            route.criteria().to_filter().build(),
            r#"status = "accepted" && city ~ "New York""#
        );
        assert_eq!(route.title(), "Events in New York");
    }

    #[test]
    fn test_country_only_and_all() {
        let country = SearchRoute::from_path("/search/united-kingdom").unwrap();
        assert_eq!(country.country.as_deref(), Some("United Kingdom"));
        assert_eq!(country.term, None);
        assert_eq!(country.title(), "Events in United Kingdom");

        let two_segments = SearchRoute::from_path("/search/japan/robotics").unwrap();
        assert_eq!(two_segments.term, None);

        let all = SearchRoute::from_path("/search/all/topic/all").unwrap();
        assert_eq!(all, SearchRoute { search_type: SearchType::Topic, ..SearchRoute::default() });
        assert_eq!(all.title(), "All Events");
        assert_eq!(all.criteria().to_filter().build(), r#"status = "accepted""#);
    }

    #[test]
    fn test_non_search_paths() {
        assert!(SearchRoute::from_path("/searching").is_none());
        assert!(SearchRoute::from_path("/blog/x").is_none());
        assert_eq!(SearchRoute::from_path("/search"), Some(SearchRoute::default()));
    }

    #[test]
    fn test_detail_paths() {
        let id = RecordId::parse("abc123").unwrap();
        assert_eq!(event_path("AI Summit 2025", &id), "/event/ai-summit-2025-abc123");
        assert_eq!(blog_path("Hello!", &id), "/blog/hello-abc123");
        assert_eq!(calendar_path(2025, 3), "/calendar/2025/3");
    }
}
