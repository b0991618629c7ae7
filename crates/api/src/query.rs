//! Shared query parameter types for API handlers.

use canteen_core::types::Day;
use serde::Deserialize;

/// Optional inclusive date bounds of the admin report
/// (`?start_date=YYYY-MM-DD&end_date=YYYY-MM-DD`).
#[derive(Debug, Default, Deserialize)]
pub struct ReportParams {
    pub start_date: Option<Day>,
    pub end_date: Option<Day>,
}

/// Optional target day for date-scoped reads (`?date=YYYY-MM-DD`).
///
/// Defaults to today when omitted.
#[derive(Debug, Default, Deserialize)]
pub struct DateParams {
    pub date: Option<Day>,
}

/// Optional status filter for application listings (`?status=pending`).
#[derive(Debug, Default, Deserialize)]
pub struct ApplicationFilter {
    pub status: Option<String>,
}
