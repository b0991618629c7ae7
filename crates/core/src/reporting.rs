//! Report types and date-range handling.

use serde::Serialize;

use crate::error::CoreError;
use crate::types::{Day, Money};

/// Default look-back window of the admin report, in days.
pub const DEFAULT_REPORT_DAYS: i64 = 30;

/// Window of the "payments this week" dashboard figure, in days.
pub const DASHBOARD_PAYMENT_DAYS: i64 = 7;

/// Window of the statistics page, in days.
pub const STATISTICS_DAYS: i64 = 30;

/// Products below this stock count are flagged on the cook dashboard.
pub const LOW_STOCK_THRESHOLD: i32 = 10;

/// Number of applications listed on the cook and admin dashboards.
pub const DASHBOARD_APPLICATIONS: i64 = 5;

/// Number of dishes listed in the top-rated statistics.
pub const TOP_DISHES_LIMIT: i64 = 5;

/// Inclusive date range of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: Day,
    pub end: Day,
}

impl DateRange {
    /// Fill in missing bounds (end defaults to `today`, start to
    /// [`DEFAULT_REPORT_DAYS`] before `today`) and reject inverted ranges.
    pub fn resolve(start: Option<Day>, end: Option<Day>, today: Day) -> Result<Self, CoreError> {
        let end = end.unwrap_or(today);
        let start = start.unwrap_or(today - chrono::Duration::days(DEFAULT_REPORT_DAYS));
        if start > end {
            return Err(CoreError::Validation(format!(
                "start_date {start} is after end_date {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// The `days`-long window ending today.
    pub fn trailing(days: i64, today: Day) -> Self {
        Self {
            start: today - chrono::Duration::days(days),
            end: today,
        }
    }
}

/// Aggregates over a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub range: DateRange,
    pub payments_total: Money,
    pub payments_count: i64,
    pub attendance_total: i64,
    pub breakfasts: i64,
    pub lunches: i64,
    /// Sum of approved procurement applications.
    pub expenses: Money,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> Day {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_defaults_to_last_thirty_days() {
        let range = DateRange::resolve(None, None, d(2024, 3, 31)).unwrap();
        assert_eq!(range.start, d(2024, 3, 1));
        assert_eq!(range.end, d(2024, 3, 31));
    }

    #[test]
    fn test_explicit_bounds_kept() {
        let range =
            DateRange::resolve(Some(d(2024, 1, 1)), Some(d(2024, 1, 1)), d(2024, 3, 31)).unwrap();
        assert_eq!(range.start, range.end);
    }

    #[test]
    fn test_inverted_range_rejected() {
        let result = DateRange::resolve(Some(d(2024, 2, 1)), Some(d(2024, 1, 1)), d(2024, 3, 31));
        assert!(matches!(result, Err(CoreError::Validation(_))));
    }

    #[test]
    fn test_trailing_window() {
        let range = DateRange::trailing(DASHBOARD_PAYMENT_DAYS, d(2024, 1, 10));
        assert_eq!(range.start, d(2024, 1, 3));
    }
}
