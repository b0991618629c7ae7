//! Allergen entity model and DTOs.

use canteen_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `allergens` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Allergen {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
}

/// DTO for creating a new allergen.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateAllergen {
    #[validate(length(min = 1, max = 100, message = "must be 1-100 characters"))]
    pub name: String,
}
