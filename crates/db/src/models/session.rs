//! Refresh-token sessions.

use canteen_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from `user_sessions`. The token hash is write-only and never read
/// back.
#[derive(Debug, Clone, FromRow)]
pub struct UserSession {
    pub id: DbId,
    pub user_id: DbId,
    pub expires_at: Timestamp,
    pub is_revoked: bool,
    pub created_at: Timestamp,
}

/// A session issued at login or refresh.
pub struct NewSession {
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
}
