//! Repository for the `attendances` table and the meal claim workflow.

use canteen_core::entitlement::{assess_claim, ClaimInput};
use canteen_core::error::CoreError;
use canteen_core::meals::MealType;
use canteen_core::types::{Day, DbId};
use sqlx::{PgExecutor, PgPool};

use crate::error::{is_unique_violation, DbError};
use crate::models::attendance::{Attendance, MealClaim};
use crate::repositories::{DishRepo, MenuRepo, SubscriptionRepo, UserRepo};

const COLUMNS: &str = "id, user_id, date, meal_type, created_at";

/// Name of the one-claim-per-meal-per-day constraint.
const UQ_USER_DATE_MEAL: &str = "uq_attendances_user_date_meal";

pub struct AttendanceRepo;

impl AttendanceRepo {
    /// `true` if the user already took `meal` on `date`.
    pub async fn exists<'e, E: PgExecutor<'e>>(
        executor: E,
        user_id: DbId,
        date: Day,
        meal: MealType,
    ) -> Result<bool, sqlx::Error> {
        let row: (bool,) = sqlx::query_as(
            "SELECT EXISTS(
                SELECT 1 FROM attendances WHERE user_id = $1 AND date = $2 AND meal_type = $3
             )",
        )
        .bind(user_id)
        .bind(date)
        .bind(meal.as_str())
        .fetch_one(executor)
        .await?;
        Ok(row.0)
    }

    /// Attendance rows of a user, newest first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Attendance>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM attendances WHERE user_id = $1 ORDER BY date DESC, id DESC"
        );
        sqlx::query_as::<_, Attendance>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Claim a meal for `user_id` on `date`.
    ///
    /// Steps, all inside one transaction with the user row locked:
    /// duplicate check, menu lookup, dish price total, subscription
    /// coverage, balance debit, attendance insert, menu counter bump.
    /// Any failure rolls back every write.
    pub async fn claim_meal(
        pool: &PgPool,
        user_id: DbId,
        date: Day,
        meal: MealType,
    ) -> Result<MealClaim, DbError> {
        let mut tx = pool.begin().await?;

        let user = UserRepo::lock_for_update(&mut *tx, user_id).await?;

        let already_claimed = Self::exists(&mut *tx, user_id, date, meal).await?;

        let menu = MenuRepo::find_by_date(&mut *tx, date).await?;
        let prices = match &menu {
            Some(menu) => {
                let dishes = DishRepo::resolve(&mut *tx, &menu.dish_ids(meal)).await?;
                Some(dishes.iter().map(|d| d.price).collect::<Vec<_>>())
            }
            None => None,
        };

        let subscription = SubscriptionRepo::find_active(&mut *tx, user_id, date).await?;
        let plan = subscription.as_ref().map(|s| s.plan()).transpose()?;

        let decision = assess_claim(&ClaimInput {
            meal,
            date,
            already_claimed,
            dish_prices: prices.as_deref(),
            subscription: plan,
            balance: user.balance,
        })?;

        let balance = if decision.charge > 0 {
            UserRepo::adjust_balance(&mut *tx, user_id, -decision.charge).await?
        } else {
            user.balance
        };

        let query = format!(
            "INSERT INTO attendances (user_id, date, meal_type)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let attendance = sqlx::query_as::<_, Attendance>(&query)
            .bind(user_id)
            .bind(date)
            .bind(meal.as_str())
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                if is_unique_violation(&e, UQ_USER_DATE_MEAL) {
                    DbError::Core(CoreError::AlreadyClaimed { meal, date })
                } else {
                    DbError::Sqlx(e)
                }
            })?;

        // `assess_claim` only succeeds when a menu exists.
        if let Some(menu) = &menu {
            MenuRepo::increment_given(&mut *tx, menu.id, meal).await?;
        }

        tx.commit().await?;

        tracing::info!(
            user_id,
            %date,
            %meal,
            charge = decision.charge,
            covered = decision.covered_by_subscription,
            "Meal claimed",
        );

        Ok(MealClaim {
            attendance,
            decision,
            balance,
        })
    }
}
