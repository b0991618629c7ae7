//! Dish review entity model and DTOs.

use canteen_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `reviews` table. One per (user, dish).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Review {
    pub id: DbId,
    pub user_id: DbId,
    pub dish_id: DbId,
    pub rating: i16,
    pub comment: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating or replacing the caller's review of a dish.
#[derive(Debug, Deserialize, Validate)]
pub struct UpsertReview {
    /// Checked against `MIN_RATING..=MAX_RATING` by the repository.
    pub rating: i16,
    #[validate(length(max = 2000, message = "must be at most 2000 characters"))]
    #[serde(default)]
    pub comment: String,
}
