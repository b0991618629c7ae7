//! Procurement application entity model and DTOs.

use canteen_core::catalog::{pair_products_with_amounts, resolve_ids};
use canteen_core::types::{Day, DbId, Money, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::status::{ApplicationStatus, StatusId};

/// A row from the `applications` table.
#[derive(Debug, Clone, FromRow)]
pub struct Application {
    pub id: DbId,
    pub user_id: DbId,
    /// Comma-joined product ids.
    pub products: String,
    /// Comma-joined amounts, parallel to `products`.
    pub amounts: String,
    pub price: Money,
    pub status_id: StatusId,
    pub date: Day,
    pub decided_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Application {
    pub fn status(&self) -> Option<ApplicationStatus> {
        ApplicationStatus::from_id(self.status_id)
    }

    /// `(product_id, amount)` pairs requested by this application.
    pub fn requested_items(&self) -> Vec<(DbId, i32)> {
        pair_products_with_amounts(&self.products, &self.amounts)
    }
}

/// One requested line of an application.
#[derive(Debug, Clone, Serialize)]
pub struct RequestedItem {
    pub product_id: DbId,
    pub amount: i32,
}

/// API representation with lists decoded and the status named.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationResponse {
    pub id: DbId,
    pub user_id: DbId,
    pub product_ids: Vec<DbId>,
    pub items: Vec<RequestedItem>,
    pub price: Money,
    pub status: &'static str,
    pub date: Day,
    pub decided_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl From<Application> for ApplicationResponse {
    fn from(app: Application) -> Self {
        let items = app
            .requested_items()
            .into_iter()
            .map(|(product_id, amount)| RequestedItem { product_id, amount })
            .collect();
        Self {
            product_ids: resolve_ids(&app.products),
            items,
            status: app.status().map_or("unknown", ApplicationStatus::name),
            id: app.id,
            user_id: app.user_id,
            price: app.price,
            date: app.date,
            decided_at: app.decided_at,
            created_at: app.created_at,
        }
    }
}

/// DTO for submitting a procurement application.
///
/// `amounts` is kept as free text parallel to `product_ids`; lengths are not
/// required to match.
#[derive(Debug, Deserialize)]
pub struct CreateApplication {
    pub product_ids: Vec<DbId>,
    #[serde(default)]
    pub amounts: String,
    #[serde(default)]
    pub price: Money,
}
