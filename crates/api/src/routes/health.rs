//! `/health`: liveness plus whether today's menu is up.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use canteen_core::types::{today, Day};
use canteen_db::repositories::MenuRepo;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the database is unreachable.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    pub date: Day,
    pub menu_published: bool,
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let date = today();
    let db_healthy = canteen_db::health_check(&state.pool).await.is_ok();
    let menu_published = db_healthy
        && matches!(MenuRepo::find_by_date(&state.pool, date).await, Ok(Some(_)));

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        date,
        menu_published,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
