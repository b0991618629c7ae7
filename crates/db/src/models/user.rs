//! User entity model and DTOs.

use std::collections::BTreeSet;

use canteen_core::catalog::resolve_ids;
use canteen_core::types::{Day, DbId, Money, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub login: String,
    pub name: String,
    pub email: String,
    pub birth_date: Option<Day>,
    pub password_hash: String,
    pub role: String,
    pub balance: Money,
    pub allergens: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    /// Allergen ids the user declared, dangling ids included.
    pub fn allergen_ids(&self) -> BTreeSet<DbId> {
        resolve_ids(&self.allergens).into_iter().collect()
    }
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub login: String,
    pub name: String,
    pub email: String,
    pub birth_date: Option<Day>,
    pub role: String,
    pub balance: Money,
    pub allergen_ids: Vec<DbId>,
    pub is_active: bool,
    pub created_at: Timestamp,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            login: user.login.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            birth_date: user.birth_date,
            role: user.role.clone(),
            balance: user.balance,
            allergen_ids: resolve_ids(&user.allergens),
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

/// DTO for creating a new user.
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub login: String,
    pub name: String,
    pub email: String,
    pub birth_date: Option<Day>,
    pub password_hash: String,
    pub role: String,
    pub balance: Money,
    pub allergen_ids: Vec<DbId>,
}

/// DTO for a user editing their own profile. All fields are optional.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfile {
    #[validate(length(min = 1, max = 200, message = "must be 1-200 characters"))]
    pub name: Option<String>,
    #[validate(email(message = "must be a valid email address"))]
    pub email: Option<String>,
    pub birth_date: Option<Day>,
    pub allergen_ids: Option<Vec<DbId>>,
}
