//! Handlers for the caller's own profile (any role).

use axum::extract::State;
use axum::Json;
use canteen_core::error::CoreError;
use canteen_db::models::user::{UpdateProfile, UserResponse};
use canteen_db::repositories::UserRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/profile
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;
    Ok(Json(DataResponse {
        data: UserResponse::from(&user),
    }))
}

/// PUT /api/v1/profile
///
/// Allergen ids are stored as given; unknown ids are tolerated.
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<UpdateProfile>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    input.validate()?;
    let user = UserRepo::update_profile(&state.pool, auth.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;
    tracing::info!(user_id = user.id, "Profile updated");
    Ok(Json(DataResponse {
        data: UserResponse::from(&user),
    }))
}
