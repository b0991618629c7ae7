//! Payment ledger entity model and DTOs.

use canteen_core::types::{Day, DbId, Money, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `payments` table. Rows are never updated.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Payment {
    pub id: DbId,
    pub user_id: DbId,
    pub amount: Money,
    pub date: Day,
    pub successful: bool,
    pub created_at: Timestamp,
}

/// DTO for topping up a balance.
#[derive(Debug, Deserialize, Validate)]
pub struct TopUp {
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub amount: Money,
}

/// Result of a successful top-up.
#[derive(Debug, Clone, Serialize)]
pub struct TopUpReceipt {
    pub payment: Payment,
    pub balance: Money,
}
