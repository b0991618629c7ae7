//! Meal subscription entity model and DTOs.

use canteen_core::error::CoreError;
use canteen_core::meals::SubscriptionPlan;
use canteen_core::types::{Day, DbId, Money, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `subscriptions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Subscription {
    pub id: DbId,
    pub user_id: DbId,
    pub meal_type: String,
    pub register_date: Day,
    pub end_date: Day,
    pub duration: i32,
    pub created_at: Timestamp,
}

impl Subscription {
    /// Decode the stored plan. The column is `CHECK`-constrained, so a
    /// failure here means the schema and code disagree.
    pub fn plan(&self) -> Result<SubscriptionPlan, CoreError> {
        self.meal_type
            .parse()
            .map_err(|e: String| CoreError::Internal(format!("subscription {}: {e}", self.id)))
    }
}

/// DTO for buying a subscription.
#[derive(Debug, Deserialize)]
pub struct Subscribe {
    pub duration: i32,
    pub meal_type: SubscriptionPlan,
}

/// Result of a successful purchase.
#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionReceipt {
    pub subscription: Subscription,
    pub price: Money,
    pub balance: Money,
}
