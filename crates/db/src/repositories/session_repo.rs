//! Refresh-token sessions in `user_sessions`.

use canteen_core::types::DbId;
use sqlx::PgPool;

use crate::models::session::{NewSession, UserSession};

const COLUMNS: &str = "id, user_id, expires_at, is_revoked, created_at";

pub struct SessionRepo;

impl SessionRepo {
    pub async fn open(pool: &PgPool, input: &NewSession) -> Result<UserSession, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_sessions (user_id, refresh_token_hash, expires_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserSession>(&query)
            .bind(input.user_id)
            .bind(&input.refresh_token_hash)
            .bind(input.expires_at)
            .fetch_one(pool)
            .await
    }

    /// Revoke the live session holding `hash` and return it.
    ///
    /// A single conditional UPDATE, so two concurrent refreshes with the same
    /// token cannot both succeed. Returns `None` for unknown, revoked or
    /// expired tokens.
    pub async fn consume(pool: &PgPool, hash: &str) -> Result<Option<UserSession>, sqlx::Error> {
        let query = format!(
            "UPDATE user_sessions SET is_revoked = true
             WHERE refresh_token_hash = $1
               AND is_revoked = false
               AND expires_at > NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserSession>(&query)
            .bind(hash)
            .fetch_optional(pool)
            .await
    }

    /// Revoke every live session of a user (logout). Returns how many.
    pub async fn revoke_all_for_user(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE user_sessions SET is_revoked = true
             WHERE user_id = $1 AND is_revoked = false",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
