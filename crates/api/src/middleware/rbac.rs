//! Role gates.
//!
//! Each extractor wraps [`AuthUser`] and rejects with 403 when the caller's
//! role differs. Roles are disjoint: an admin is not a cook.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use canteen_core::error::CoreError;
use canteen_core::roles::{ROLE_ADMIN, ROLE_COOK, ROLE_STUDENT};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

async fn require_role(
    parts: &mut Parts,
    state: &AppState,
    role: &str,
) -> Result<AuthUser, AppError> {
    let user = AuthUser::from_request_parts(parts, state).await?;
    if user.role != role {
        return Err(AppError::Core(CoreError::Forbidden(format!(
            "{role} role required"
        ))));
    }
    Ok(user)
}

/// Only students may claim meals, pay and subscribe.
///
/// ```ignore
/// async fn menu(RequireStudent(user): RequireStudent) -> AppResult<Json<()>> { .. }
/// ```
pub struct RequireStudent(pub AuthUser);

impl FromRequestParts<AppState> for RequireStudent {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require_role(parts, state, ROLE_STUDENT)
            .await
            .map(RequireStudent)
    }
}

/// Catalog, menus and procurement requests.
pub struct RequireCook(pub AuthUser);

impl FromRequestParts<AppState> for RequireCook {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require_role(parts, state, ROLE_COOK).await.map(RequireCook)
    }
}

/// Reports, user listing and application decisions.
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require_role(parts, state, ROLE_ADMIN).await.map(RequireAdmin)
    }
}
