//! Read-only aggregate rows for dashboards and statistics.

use canteen_core::reporting::DateRange;
use canteen_core::types::{DbId, Money};
use serde::Serialize;
use sqlx::FromRow;

use super::application::ApplicationResponse;
use super::attendance::MealCount;

/// Figures shown on the admin dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub total_students: i64,
    pub payments_week: Money,
    pub attendance_today: i64,
    pub pending_applications: i64,
    /// The newest pending applications, awaiting a decision.
    pub pending: Vec<ApplicationResponse>,
}

/// Average review rating of a dish.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DishRating {
    pub dish_id: DbId,
    pub name: String,
    pub avg_rating: f64,
    pub review_count: i64,
}

/// Trailing-window statistics for the admin.
#[derive(Debug, Clone, Serialize)]
pub struct Statistics {
    pub range: DateRange,
    pub payments_total: Money,
    pub payments_count: i64,
    pub attendance_by_type: Vec<MealCount>,
    pub popular_dishes: Vec<DishRating>,
}
