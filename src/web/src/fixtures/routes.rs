use crate::AppData;
use axum::Router;
use axum::routing::{get, post};

pub fn fixture_routes() -> Router<AppData> {
    Router::new()
        .route(
            "/fixtures",
            get(super::fixture_list_action).post(super::fixture_create_action),
        )
        .route("/fixtures/{fixture_slug}", get(super::fixture_get_action))
        .route(
            "/fixtures/{fixture_slug}/edit",
            post(super::fixture_edit_action),
        )
        .route(
            "/fixtures/{fixture_slug}/referee",
            post(super::fixture_referee_action),
        )
        .route(
            "/fixtures/{fixture_slug}/preferences",
            post(super::fixture_preference_action),
        )
}
