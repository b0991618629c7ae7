//! Attendance (meal claim) entity model.

use canteen_core::entitlement::ClaimDecision;
use canteen_core::types::{Day, DbId, Money, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `attendances` table: one claimed meal.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Attendance {
    pub id: DbId,
    pub user_id: DbId,
    pub date: Day,
    pub meal_type: String,
    pub created_at: Timestamp,
}

/// Result of a successful meal claim.
#[derive(Debug, Clone, Serialize)]
pub struct MealClaim {
    pub attendance: Attendance,
    #[serde(flatten)]
    pub decision: ClaimDecision,
    /// Balance after the debit.
    pub balance: Money,
}

/// Attendance count for one meal type.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MealCount {
    pub meal_type: String,
    pub count: i64,
}
