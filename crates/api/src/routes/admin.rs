//! Route definitions for the `/admin` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(admin::dashboard))
        .route("/statistics", get(admin::statistics))
        .route("/reports", get(admin::report))
        .route("/applications", get(admin::list_applications))
        .route(
            "/applications/{id}/{action}",
            post(admin::decide_application),
        )
        .route("/users", get(admin::list_users))
        .route(
            "/allergens",
            get(admin::list_allergens).post(admin::create_allergen),
        )
}
