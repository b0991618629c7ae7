//! Handlers for the `/admin` resource: reports, users, allergens and
//! procurement decisions.
//!
//! All handlers require the `admin` role via [`RequireAdmin`].

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use canteen_core::error::CoreError;
use canteen_core::procurement::ApplicationAction;
use canteen_core::reporting::{DateRange, Report};
use canteen_core::types::{today, DbId};
use canteen_db::models::allergen::{Allergen, CreateAllergen};
use canteen_db::models::application::ApplicationResponse;
use canteen_db::models::report::{DashboardStats, Statistics};
use canteen_db::models::status::ApplicationStatus;
use canteen_db::models::user::UserResponse;
use canteen_db::repositories::{AllergenRepo, ApplicationRepo, ReportRepo, UserRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::{ApplicationFilter, ReportParams};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Reporting
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/dashboard
pub async fn dashboard(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<DashboardStats>>> {
    let stats = ReportRepo::dashboard(&state.pool, today()).await?;
    Ok(Json(DataResponse { data: stats }))
}

/// GET /api/v1/admin/statistics
///
/// Trailing 30-day payments and attendance plus the best-rated dishes.
pub async fn statistics(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<Statistics>>> {
    let stats = ReportRepo::statistics(&state.pool, today()).await?;
    Ok(Json(DataResponse { data: stats }))
}

/// GET /api/v1/admin/reports?start_date=&end_date=
///
/// Missing bounds default to the last 30 days; an inverted range is a 400.
pub async fn report(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<ReportParams>,
) -> AppResult<Json<DataResponse<Report>>> {
    let range = DateRange::resolve(params.start_date, params.end_date, today())?;
    let report = ReportRepo::summary(&state.pool, range).await?;
    Ok(Json(DataResponse { data: report }))
}

// ---------------------------------------------------------------------------
// Procurement decisions
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/applications?status=
///
/// All applications, or only those in `status` (`pending`, `approved`,
/// `rejected`).
pub async fn list_applications(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(filter): Query<ApplicationFilter>,
) -> AppResult<Json<DataResponse<Vec<ApplicationResponse>>>> {
    let applications = match filter.status.as_deref() {
        None => ApplicationRepo::list(&state.pool).await?,
        Some(name) => {
            let status = ApplicationStatus::from_name(name).ok_or_else(|| {
                AppError::Core(CoreError::Validation(format!(
                    "Unknown application status '{name}'"
                )))
            })?;
            ApplicationRepo::list_by_status(&state.pool, status, None).await?
        }
    };
    Ok(Json(DataResponse {
        data: applications
            .into_iter()
            .map(ApplicationResponse::from)
            .collect(),
    }))
}

/// POST /api/v1/admin/applications/{id}/{action}
///
/// `action` is `approve` or `reject`. Any other action leaves the
/// application untouched and returns it as is.
pub async fn decide_application(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path((id, action)): Path<(DbId, String)>,
) -> AppResult<Json<DataResponse<ApplicationResponse>>> {
    let action = ApplicationAction::from_route(&action);
    if action.is_none() {
        tracing::warn!(application_id = id, "Ignoring unknown application action");
    }

    let application = ApplicationRepo::decide(&state.pool, id, action).await?;
    if let Some(action) = action {
        tracing::info!(
            user_id = admin.user_id,
            application_id = id,
            status = action.target_status(),
            "Application decided",
        );
    }

    Ok(Json(DataResponse {
        data: ApplicationResponse::from(application),
    }))
}

// ---------------------------------------------------------------------------
// Users and allergens
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/users
///
/// Ordered by role, then name.
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(DataResponse {
        data: users.iter().map(UserResponse::from).collect(),
    }))
}

/// GET /api/v1/admin/allergens
pub async fn list_allergens(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<Vec<Allergen>>>> {
    let allergens = AllergenRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: allergens }))
}

/// POST /api/v1/admin/allergens
pub async fn create_allergen(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateAllergen>,
) -> AppResult<(StatusCode, Json<DataResponse<Allergen>>)> {
    input.validate()?;
    let allergen = AllergenRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: allergen })))
}
