//! Route definitions for the `/student` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::student;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/menu", get(student::menu))
        .route("/meals/{meal_type}", post(student::claim_meal))
        .route(
            "/payments",
            get(student::list_payments).post(student::top_up),
        )
        .route(
            "/subscription",
            get(student::subscription).post(student::subscribe),
        )
        .route("/reviews", get(student::list_reviews))
        .route("/reviews/{dish_id}", put(student::upsert_review))
}
