//! Repository for the `users` table.

use canteen_core::catalog::join_ids;
use canteen_core::error::CoreError;
use canteen_core::roles::validate_role;
use canteen_core::types::{DbId, Money};
use sqlx::{PgConnection, PgPool};

use crate::error::DbError;
use crate::models::user::{CreateUser, UpdateProfile, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, login, name, email, birth_date, password_hash, role, balance, \
                       allergens, is_active, created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, DbError> {
        validate_role(&input.role).map_err(CoreError::Validation)?;

        let query = format!(
            "INSERT INTO users (login, name, email, birth_date, password_hash, role, balance, allergens)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&query)
            .bind(&input.login)
            .bind(&input.name)
            .bind(&input.email)
            .bind(input.birth_date)
            .bind(&input.password_hash)
            .bind(&input.role)
            .bind(input.balance)
            .bind(join_ids(&input.allergen_ids))
            .fetch_one(pool)
            .await?;
        Ok(user)
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by login (case-sensitive).
    pub async fn find_by_login(pool: &PgPool, login: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE login = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(login)
            .fetch_optional(pool)
            .await
    }

    /// List all users ordered by role, then name.
    pub async fn list(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY role, name");
        sqlx::query_as::<_, User>(&query).fetch_all(pool).await
    }

    /// Count users holding a role.
    pub async fn count_by_role(pool: &PgPool, role: &str) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE role = $1")
            .bind(role)
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    /// Update the caller's own profile. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_profile(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProfile,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                birth_date = COALESCE($4, birth_date),
                allergens = COALESCE($5, allergens)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(input.birth_date)
            .bind(input.allergen_ids.as_deref().map(join_ids))
            .fetch_optional(pool)
            .await
    }

    /// Lock a user row for the rest of the surrounding transaction.
    ///
    /// Every balance mutation goes through this first so concurrent
    /// workflows for the same user run one after another.
    pub(crate) async fn lock_for_update(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<User, DbError> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await?
            .ok_or(DbError::Core(CoreError::NotFound { entity: "User", id }))
    }

    /// Add `delta` (negative to debit) to a locked user's balance, returning
    /// the new balance.
    pub(crate) async fn adjust_balance(
        conn: &mut PgConnection,
        id: DbId,
        delta: Money,
    ) -> Result<Money, sqlx::Error> {
        let row: (Money,) =
            sqlx::query_as("UPDATE users SET balance = balance + $2 WHERE id = $1 RETURNING balance")
                .bind(id)
                .bind(delta)
                .fetch_one(conn)
                .await?;
        Ok(row.0)
    }
}
