//! Repository for the `subscriptions` table and the subscription purchase
//! workflow.

use canteen_core::error::CoreError;
use canteen_core::meals::SubscriptionPlan;
use canteen_core::pricing::{subscription_end_date, subscription_price, validate_duration};
use canteen_core::types::{Day, DbId};
use sqlx::{PgExecutor, PgPool};

use crate::error::DbError;
use crate::models::subscription::{Subscription, SubscriptionReceipt};
use crate::repositories::UserRepo;

const COLUMNS: &str = "id, user_id, meal_type, register_date, end_date, duration, created_at";

pub struct SubscriptionRepo;

impl SubscriptionRepo {
    /// The subscription that governs `user_id` on `on`.
    ///
    /// Several subscriptions may be active at once; the most recently
    /// registered one wins (ties broken by highest id).
    pub async fn find_active<'e, E>(
        executor: E,
        user_id: DbId,
        on: Day,
    ) -> Result<Option<Subscription>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "SELECT {COLUMNS} FROM subscriptions
             WHERE user_id = $1 AND end_date >= $2
             ORDER BY register_date DESC, id DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, Subscription>(&query)
            .bind(user_id)
            .bind(on)
            .fetch_optional(executor)
            .await
    }

    /// All subscriptions of a user, newest first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Subscription>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM subscriptions WHERE user_id = $1
             ORDER BY register_date DESC, id DESC"
        );
        sqlx::query_as::<_, Subscription>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Buy a subscription starting `today`, paid from the balance.
    ///
    /// Runs in one transaction with the user row locked. Fails with
    /// `Validation` for an unsold duration and `InsufficientBalance` when
    /// the balance does not cover the price; nothing is written on failure.
    pub async fn subscribe(
        pool: &PgPool,
        user_id: DbId,
        duration: i32,
        plan: SubscriptionPlan,
        today: Day,
    ) -> Result<SubscriptionReceipt, DbError> {
        validate_duration(duration).map_err(CoreError::Validation)?;
        let price = subscription_price(duration, plan).ok_or_else(|| {
            CoreError::Validation(format!("No price for {duration} days of {plan}"))
        })?;

        let mut tx = pool.begin().await?;

        let user = UserRepo::lock_for_update(&mut *tx, user_id).await?;
        if user.balance < price {
            return Err(CoreError::InsufficientBalance {
                required: price,
                available: user.balance,
            }
            .into());
        }

        let balance = UserRepo::adjust_balance(&mut *tx, user_id, -price).await?;

        let query = format!(
            "INSERT INTO subscriptions (user_id, meal_type, register_date, end_date, duration)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let subscription = sqlx::query_as::<_, Subscription>(&query)
            .bind(user_id)
            .bind(plan.as_str())
            .bind(today)
            .bind(subscription_end_date(today, duration))
            .bind(duration)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(
            user_id,
            subscription_id = subscription.id,
            %plan,
            duration,
            price,
            "Subscription purchased",
        );

        Ok(SubscriptionReceipt {
            subscription,
            price,
            balance,
        })
    }
}
