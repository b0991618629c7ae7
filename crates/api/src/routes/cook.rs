//! Route definitions for the `/cook` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::cook;
use crate::state::AppState;

/// ```text
/// GET       /dashboard
/// GET, POST /menus         GET, PUT /menus/{id}
/// GET, POST /dishes        GET, PUT /dishes/{id}
/// GET, POST /products      GET, PUT /products/{id}
/// GET, POST /applications
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(cook::dashboard))
        .route("/menus", get(cook::list_menus).post(cook::create_menu))
        .route("/menus/{id}", get(cook::get_menu).put(cook::update_menu))
        .route("/dishes", get(cook::list_dishes).post(cook::create_dish))
        .route("/dishes/{id}", get(cook::get_dish).put(cook::update_dish))
        .route(
            "/products",
            get(cook::list_products).post(cook::create_product),
        )
        .route(
            "/products/{id}",
            get(cook::get_product).put(cook::update_product),
        )
        .route(
            "/applications",
            get(cook::list_applications).post(cook::submit_application),
        )
}
