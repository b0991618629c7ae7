//! Product (stock item) entity model and DTOs.

use canteen_core::catalog::resolve_ids;
use canteen_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `products` table.
#[derive(Debug, Clone, FromRow)]
pub struct Product {
    pub id: DbId,
    pub name: String,
    /// Comma-joined allergen ids; decode with [`Product::allergen_ids`].
    pub allergens: String,
    pub amount: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Product {
    pub fn allergen_ids(&self) -> Vec<DbId> {
        resolve_ids(&self.allergens)
    }
}

/// API representation with the allergen list decoded.
#[derive(Debug, Clone, Serialize)]
pub struct ProductResponse {
    pub id: DbId,
    pub name: String,
    pub allergen_ids: Vec<DbId>,
    pub amount: i32,
    pub updated_at: Timestamp,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            allergen_ids: product.allergen_ids(),
            id: product.id,
            name: product.name,
            amount: product.amount,
            updated_at: product.updated_at,
        }
    }
}

/// DTO for creating a new product.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 200, message = "must be 1-200 characters"))]
    pub name: String,
    #[serde(default)]
    pub allergen_ids: Vec<DbId>,
    #[validate(range(min = 0, message = "must not be negative"))]
    #[serde(default)]
    pub amount: i32,
}

/// DTO for updating an existing product. All fields are optional.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProduct {
    #[validate(length(min = 1, max = 200, message = "must be 1-200 characters"))]
    pub name: Option<String>,
    pub allergen_ids: Option<Vec<DbId>>,
    #[validate(range(min = 0, message = "must not be negative"))]
    pub amount: Option<i32>,
}
