//! Dish entity model and DTOs.

use std::collections::BTreeSet;

use canteen_core::catalog::resolve_ids;
use canteen_core::types::{DbId, Money, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `dishes` table.
#[derive(Debug, Clone, FromRow)]
pub struct Dish {
    pub id: DbId,
    pub name: String,
    /// Comma-joined product ids; decode with [`Dish::product_ids`].
    pub products: String,
    pub amount: i32,
    pub price: Money,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Dish {
    pub fn product_ids(&self) -> Vec<DbId> {
        resolve_ids(&self.products)
    }
}

/// A dish together with the allergens of its resolvable products.
#[derive(Debug, Clone, Serialize)]
pub struct DishResponse {
    pub id: DbId,
    pub name: String,
    pub product_ids: Vec<DbId>,
    pub allergen_ids: BTreeSet<DbId>,
    pub amount: i32,
    pub price: Money,
    pub updated_at: Timestamp,
}

impl DishResponse {
    pub fn new(dish: Dish, allergen_ids: BTreeSet<DbId>) -> Self {
        Self {
            product_ids: dish.product_ids(),
            allergen_ids,
            id: dish.id,
            name: dish.name,
            amount: dish.amount,
            price: dish.price,
            updated_at: dish.updated_at,
        }
    }
}

/// DTO for creating a new dish.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateDish {
    #[validate(length(min = 1, max = 200, message = "must be 1-200 characters"))]
    pub name: String,
    #[serde(default)]
    pub product_ids: Vec<DbId>,
    #[validate(range(min = 0, message = "must not be negative"))]
    #[serde(default)]
    pub amount: i32,
    #[validate(range(min = 0, message = "must not be negative"))]
    pub price: Money,
}

/// DTO for updating an existing dish. All fields are optional.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateDish {
    #[validate(length(min = 1, max = 200, message = "must be 1-200 characters"))]
    pub name: Option<String>,
    pub product_ids: Option<Vec<DbId>>,
    #[validate(range(min = 0, message = "must not be negative"))]
    pub amount: Option<i32>,
    #[validate(range(min = 0, message = "must not be negative"))]
    pub price: Option<Money>,
}
