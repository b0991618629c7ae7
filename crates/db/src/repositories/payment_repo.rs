//! Repository for the `payments` ledger and the balance top-up workflow.

use canteen_core::error::CoreError;
use canteen_core::types::{Day, DbId, Money};
use canteen_core::validation::validate_top_up;
use sqlx::PgPool;

use crate::error::DbError;
use crate::models::payment::{Payment, TopUpReceipt};
use crate::repositories::UserRepo;

const COLUMNS: &str = "id, user_id, amount, date, successful, created_at";

pub struct PaymentRepo;

impl PaymentRepo {
    /// The user's most recent payments, newest first.
    pub async fn list_recent_for_user(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
    ) -> Result<Vec<Payment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM payments WHERE user_id = $1
             ORDER BY date DESC, id DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, Payment>(&query)
            .bind(user_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Credit `amount` to the user's balance and record a successful payment.
    ///
    /// Both writes happen in one transaction with the user row locked.
    pub async fn top_up(
        pool: &PgPool,
        user_id: DbId,
        amount: Money,
        date: Day,
    ) -> Result<TopUpReceipt, DbError> {
        validate_top_up(amount).map_err(CoreError::Validation)?;

        let mut tx = pool.begin().await?;

        UserRepo::lock_for_update(&mut *tx, user_id).await?;

        let query = format!(
            "INSERT INTO payments (user_id, amount, date, successful)
             VALUES ($1, $2, $3, true)
             RETURNING {COLUMNS}"
        );
        let payment = sqlx::query_as::<_, Payment>(&query)
            .bind(user_id)
            .bind(amount)
            .bind(date)
            .fetch_one(&mut *tx)
            .await?;

        let balance = UserRepo::adjust_balance(&mut *tx, user_id, amount).await?;

        tx.commit().await?;

        tracing::info!(user_id, payment_id = payment.id, amount, "Balance topped up");

        Ok(TopUpReceipt { payment, balance })
    }
}
