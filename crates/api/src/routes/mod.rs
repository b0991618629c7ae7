pub mod admin;
pub mod auth;
pub mod cook;
pub mod health;
pub mod profile;
pub mod student;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/register | /auth/login | /auth/refresh     public
/// /auth/logout                                     any role
/// /profile                                         get, update (any role)
///
/// /student/menu                                    today's menu view
/// /student/meals/{meal_type}                       claim (POST)
/// /student/payments                                history, top up
/// /student/subscription                            active + prices, subscribe
/// /student/reviews                                 dishes with own reviews
/// /student/reviews/{dish_id}                       upsert (PUT)
///
/// /cook/dashboard                                  today, low stock, requests
/// /cook/menus, /cook/menus/{id}                    list, create, get, update
/// /cook/dishes, /cook/dishes/{id}                  list, create, get, update
/// /cook/products, /cook/products/{id}              list, create, get, update
/// /cook/applications                               own list, submit
///
/// /admin/dashboard | /admin/statistics | /admin/reports
/// /admin/applications                              list
/// /admin/applications/{id}/{action}                approve / reject (POST)
/// /admin/users                                     list
/// /admin/allergens                                 list, create
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .merge(profile::router())
        .nest("/student", student::router())
        .nest("/cook", cook::router())
        .nest("/admin", admin::router())
}
