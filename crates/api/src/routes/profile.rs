use axum::routing::get;
use axum::Router;

use crate::handlers::profile;
use crate::state::AppState;

/// `GET, PUT /profile` for the caller's own account.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/profile",
        get(profile::get_profile).put(profile::update_profile),
    )
}
