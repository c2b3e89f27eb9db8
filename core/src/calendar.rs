//! Monthly calendar ranges.

use crate::filter::{Filter, SearchCriteria};
use chrono::NaiveDate;

/// First day of the month and first day of the following month.
///
/// Returns `None` for an invalid month or a year outside chrono's range.
///
/// # Examples
///
/// ```
/// # use conference_alert_core::calendar::month_bounds;
/// # use chrono::NaiveDate;
/// let (first, next) = month_bounds(2024, 12).unwrap();
/// assert_eq!(first, NaiveDate::from_ymd_opt(2024, 12, 1).unwrap());
/// assert_eq!(next, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
/// assert!(month_bounds(2024, 13).is_none());
/// ```
#[must_use]
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((first, next))
}

/// Last day of the month.
#[must_use]
pub fn last_day(year: i32, month: u32) -> Option<NaiveDate> {
    month_bounds(year, month).and_then(|(_, next)| next.pred_opt())
}

/// Criteria for accepted events starting within a month.
///
/// Callers layer event type, category and free-text selections on top.
#[must_use]
pub fn monthly_criteria(year: i32, month: u32) -> Option<SearchCriteria> {
    let (first, next) = month_bounds(year, month)?;
    Some(SearchCriteria::new().starting_between(Some(first), Some(next)))
}

/// Filter for accepted events starting within a month.
#[must_use]
pub fn monthly_filter(year: i32, month: u32) -> Option<Filter> {
    monthly_criteria(year, month).map(|criteria| criteria.to_filter())
}

/// The month before and after `(year, month)`, for calendar navigation.
#[must_use]
pub fn adjacent_months(year: i32, month: u32) -> Option<((i32, u32), (i32, u32))> {
    month_bounds(year, month)?;
    let previous = if month == 1 { (year - 1, 12) } else { (year, month - 1) };
    let next = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    Some((previous, next))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_leap_february() {
        assert_eq!(last_day(2024, 2), NaiveDate::from_ymd_opt(2024, 2, 29));
        assert_eq!(last_day(2025, 2), NaiveDate::from_ymd_opt(2025, 2, 28));
    }

    #[test]
    fn test_monthly_filter_covers_whole_last_day() {
        let filter = monthly_filter(2025, 3).unwrap();
        assert_eq!(
            filter.build(),
            r#"status = "accepted" && event_start_date >= "2025-03-01 00:00:00.000Z" && event_start_date < "2025-04-01 00:00:00.000Z""#
        );
        assert!(monthly_filter(2025, 0).is_none());
    }

    #[test]
    fn test_adjacent_months_wrap_years() {
        assert_eq!(adjacent_months(2025, 1), Some(((2024, 12), (2025, 2))));
        assert_eq!(adjacent_months(2025, 12), Some(((2025, 11), (2026, 1))));
    }
}
