//! Repository for the `applications` table and the procurement decision
//! workflow.

use canteen_core::catalog::join_ids;
use canteen_core::error::CoreError;
use canteen_core::procurement::{validate_submission, validate_transition, ApplicationAction};
use canteen_core::types::{Day, DbId};
use sqlx::PgPool;

use crate::error::DbError;
use crate::models::application::{Application, CreateApplication};
use crate::models::status::ApplicationStatus;
use crate::repositories::ProductRepo;

const COLUMNS: &str = "id, user_id, products, amounts, price, status_id, date, decided_at, \
                       created_at, updated_at";

pub struct ApplicationRepo;

impl ApplicationRepo {
    /// Store a new `pending` application dated `today`.
    pub async fn submit(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateApplication,
        today: Day,
    ) -> Result<Application, DbError> {
        validate_submission(&input.product_ids, &input.amounts, input.price)
            .map_err(CoreError::Validation)?;

        let query = format!(
            "INSERT INTO applications (user_id, products, amounts, price, status_id, date)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        let application = sqlx::query_as::<_, Application>(&query)
            .bind(user_id)
            .bind(join_ids(&input.product_ids))
            .bind(input.amounts.trim())
            .bind(input.price)
            .bind(ApplicationStatus::Pending.id())
            .bind(today)
            .fetch_one(pool)
            .await?;

        tracing::info!(user_id, application_id = application.id, "Application submitted");
        Ok(application)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Application>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM applications WHERE id = $1");
        sqlx::query_as::<_, Application>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All applications, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Application>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM applications ORDER BY date DESC, id DESC");
        sqlx::query_as::<_, Application>(&query).fetch_all(pool).await
    }

    /// Applications submitted by one user, newest first, optionally capped.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        limit: Option<i64>,
    ) -> Result<Vec<Application>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM applications WHERE user_id = $1
             ORDER BY date DESC, id DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, Application>(&query)
            .bind(user_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Applications in a given status, newest first, optionally capped.
    pub async fn list_by_status(
        pool: &PgPool,
        status: ApplicationStatus,
        limit: Option<i64>,
    ) -> Result<Vec<Application>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM applications WHERE status_id = $1
             ORDER BY date DESC, id DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, Application>(&query)
            .bind(status.id())
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Count applications in a given status.
    pub async fn count_by_status(
        pool: &PgPool,
        status: ApplicationStatus,
    ) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM applications WHERE status_id = $1")
            .bind(status.id())
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    /// Approve or reject a pending application.
    ///
    /// The application row is locked for the whole transaction. Approval
    /// credits each requested `(product, amount)` pair to stock, skipping
    /// products that no longer exist. A decided application yields
    /// `Conflict` and nothing changes. `action = None` (an unrecognised
    /// route action) returns the row untouched.
    pub async fn decide(
        pool: &PgPool,
        id: DbId,
        action: Option<ApplicationAction>,
    ) -> Result<Application, DbError> {
        let mut tx = pool.begin().await?;

        let query = format!("SELECT {COLUMNS} FROM applications WHERE id = $1 FOR UPDATE");
        let application = sqlx::query_as::<_, Application>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Application",
                id,
            })?;

        let Some(action) = action else {
            return Ok(application);
        };

        let current = application.status().map_or("unknown", ApplicationStatus::name);
        let target = validate_transition(id, current, action)?;
        let target_status = ApplicationStatus::from_name(target).ok_or_else(|| {
            CoreError::Internal(format!("status '{target}' has no lookup row"))
        })?;

        if action == ApplicationAction::Approve {
            for (product_id, amount) in application.requested_items() {
                let credited = ProductRepo::credit_stock(&mut *tx, product_id, amount).await?;
                if !credited {
                    tracing::debug!(application_id = id, product_id, "Skipping missing product");
                }
            }
        }

        let query = format!(
            "UPDATE applications SET status_id = $2, decided_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let decided = sqlx::query_as::<_, Application>(&query)
            .bind(id)
            .bind(target_status.id())
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(application_id = id, status = target, "Application decided");
        Ok(decided)
    }
}
