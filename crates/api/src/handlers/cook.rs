//! Handlers for the `/cook` resource: catalog, menus and procurement
//! requests.
//!
//! All handlers require the `cook` role via [`RequireCook`].

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use canteen_core::error::CoreError;
use canteen_core::reporting::{DASHBOARD_APPLICATIONS, LOW_STOCK_THRESHOLD};
use canteen_core::types::{today, DbId};
use canteen_core::validation::MENU_LIST_LIMIT;
use canteen_db::models::application::{ApplicationResponse, CreateApplication};
use canteen_db::models::dish::{CreateDish, DishResponse, UpdateDish};
use canteen_db::models::menu::{CreateMenu, MenuResponse, UpdateMenu};
use canteen_db::models::product::{CreateProduct, ProductResponse, UpdateProduct};
use canteen_db::repositories::{ApplicationRepo, DishRepo, MenuRepo, ProductRepo};
use serde::Serialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireCook;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CookDashboard {
    pub today_menu: Option<MenuResponse>,
    pub low_stock: Vec<ProductResponse>,
    pub recent_applications: Vec<ApplicationResponse>,
}

/// GET /api/v1/cook/dashboard
///
/// Today's menu with served counts, products below the low-stock threshold
/// and the caller's latest applications.
pub async fn dashboard(
    State(state): State<AppState>,
    RequireCook(cook): RequireCook,
) -> AppResult<Json<DataResponse<CookDashboard>>> {
    let today_menu = MenuRepo::find_by_date(&state.pool, today())
        .await?
        .map(MenuResponse::from);
    let low_stock = ProductRepo::list_low_stock(&state.pool, LOW_STOCK_THRESHOLD)
        .await?
        .into_iter()
        .map(ProductResponse::from)
        .collect();
    let recent_applications =
        ApplicationRepo::list_for_user(&state.pool, cook.user_id, Some(DASHBOARD_APPLICATIONS))
            .await?
            .into_iter()
            .map(ApplicationResponse::from)
            .collect();

    Ok(Json(DataResponse {
        data: CookDashboard {
            today_menu,
            low_stock,
            recent_applications,
        },
    }))
}

// ---------------------------------------------------------------------------
// Menus
// ---------------------------------------------------------------------------

/// GET /api/v1/cook/menus
///
/// The most recent menus, newest date first.
pub async fn list_menus(
    State(state): State<AppState>,
    RequireCook(_cook): RequireCook,
) -> AppResult<Json<DataResponse<Vec<MenuResponse>>>> {
    let menus = MenuRepo::list_recent(&state.pool, MENU_LIST_LIMIT).await?;
    Ok(Json(DataResponse {
        data: menus.into_iter().map(MenuResponse::from).collect(),
    }))
}

/// GET /api/v1/cook/menus/{id}
pub async fn get_menu(
    State(state): State<AppState>,
    RequireCook(_cook): RequireCook,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<MenuResponse>>> {
    let menu = MenuRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(not_found("Menu", id))?;
    Ok(Json(DataResponse {
        data: MenuResponse::from(menu),
    }))
}

/// POST /api/v1/cook/menus
///
/// A second menu for the same date is a 409 via `uq_menus_date`.
pub async fn create_menu(
    State(state): State<AppState>,
    RequireCook(cook): RequireCook,
    Json(input): Json<CreateMenu>,
) -> AppResult<(StatusCode, Json<DataResponse<MenuResponse>>)> {
    let menu = MenuRepo::create(&state.pool, &input).await?;
    tracing::info!(user_id = cook.user_id, menu_id = menu.id, date = %menu.date, "Menu published");
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: MenuResponse::from(menu),
        }),
    ))
}

/// PUT /api/v1/cook/menus/{id}
pub async fn update_menu(
    State(state): State<AppState>,
    RequireCook(_cook): RequireCook,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMenu>,
) -> AppResult<Json<DataResponse<MenuResponse>>> {
    let menu = MenuRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(not_found("Menu", id))?;
    Ok(Json(DataResponse {
        data: MenuResponse::from(menu),
    }))
}

// ---------------------------------------------------------------------------
// Dishes
// ---------------------------------------------------------------------------

/// GET /api/v1/cook/dishes
pub async fn list_dishes(
    State(state): State<AppState>,
    RequireCook(_cook): RequireCook,
) -> AppResult<Json<DataResponse<Vec<DishResponse>>>> {
    let dishes = DishRepo::list(&state.pool).await?;
    let data = DishRepo::with_allergens(&state.pool, dishes).await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/cook/dishes/{id}
pub async fn get_dish(
    State(state): State<AppState>,
    RequireCook(_cook): RequireCook,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<DishResponse>>> {
    let dish = DishRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(not_found("Dish", id))?;
    let allergens = DishRepo::allergens_of(&state.pool, &dish).await?;
    Ok(Json(DataResponse {
        data: DishResponse::new(dish, allergens),
    }))
}

/// POST /api/v1/cook/dishes
pub async fn create_dish(
    State(state): State<AppState>,
    RequireCook(_cook): RequireCook,
    Json(input): Json<CreateDish>,
) -> AppResult<(StatusCode, Json<DataResponse<DishResponse>>)> {
    input.validate()?;
    let dish = DishRepo::create(&state.pool, &input).await?;
    let allergens = DishRepo::allergens_of(&state.pool, &dish).await?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: DishResponse::new(dish, allergens),
        }),
    ))
}

/// PUT /api/v1/cook/dishes/{id}
pub async fn update_dish(
    State(state): State<AppState>,
    RequireCook(_cook): RequireCook,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateDish>,
) -> AppResult<Json<DataResponse<DishResponse>>> {
    input.validate()?;
    let dish = DishRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(not_found("Dish", id))?;
    let allergens = DishRepo::allergens_of(&state.pool, &dish).await?;
    Ok(Json(DataResponse {
        data: DishResponse::new(dish, allergens),
    }))
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

/// GET /api/v1/cook/products
pub async fn list_products(
    State(state): State<AppState>,
    RequireCook(_cook): RequireCook,
) -> AppResult<Json<DataResponse<Vec<ProductResponse>>>> {
    let products = ProductRepo::list(&state.pool).await?;
    Ok(Json(DataResponse {
        data: products.into_iter().map(ProductResponse::from).collect(),
    }))
}

/// GET /api/v1/cook/products/{id}
pub async fn get_product(
    State(state): State<AppState>,
    RequireCook(_cook): RequireCook,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ProductResponse>>> {
    let product = ProductRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(not_found("Product", id))?;
    Ok(Json(DataResponse {
        data: ProductResponse::from(product),
    }))
}

/// POST /api/v1/cook/products
pub async fn create_product(
    State(state): State<AppState>,
    RequireCook(_cook): RequireCook,
    Json(input): Json<CreateProduct>,
) -> AppResult<(StatusCode, Json<DataResponse<ProductResponse>>)> {
    input.validate()?;
    let product = ProductRepo::create(&state.pool, &input).await?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: ProductResponse::from(product),
        }),
    ))
}

/// PUT /api/v1/cook/products/{id}
pub async fn update_product(
    State(state): State<AppState>,
    RequireCook(_cook): RequireCook,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProduct>,
) -> AppResult<Json<DataResponse<ProductResponse>>> {
    input.validate()?;
    let product = ProductRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(not_found("Product", id))?;
    Ok(Json(DataResponse {
        data: ProductResponse::from(product),
    }))
}

// ---------------------------------------------------------------------------
// Procurement applications
// ---------------------------------------------------------------------------

/// GET /api/v1/cook/applications
///
/// The caller's own applications, newest first.
pub async fn list_applications(
    State(state): State<AppState>,
    RequireCook(cook): RequireCook,
) -> AppResult<Json<DataResponse<Vec<ApplicationResponse>>>> {
    let applications = ApplicationRepo::list_for_user(&state.pool, cook.user_id, None).await?;
    Ok(Json(DataResponse {
        data: applications
            .into_iter()
            .map(ApplicationResponse::from)
            .collect(),
    }))
}

/// POST /api/v1/cook/applications
///
/// `amounts` pairs positionally with `product_ids` when the application is
/// approved.
pub async fn submit_application(
    State(state): State<AppState>,
    RequireCook(cook): RequireCook,
    Json(input): Json<CreateApplication>,
) -> AppResult<(StatusCode, Json<DataResponse<ApplicationResponse>>)> {
    let application = ApplicationRepo::submit(&state.pool, cook.user_id, &input, today()).await?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: ApplicationResponse::from(application),
        }),
    ))
}

fn not_found(entity: &'static str, id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity, id })
}
