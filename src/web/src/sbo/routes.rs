use crate::AppData;
use axum::Router;
use axum::routing::{get, post};

pub fn sbo_routes() -> Router<AppData> {
    Router::new()
        .route(
            "/fixtures/{fixture_slug}/game",
            get(super::game_get_action).post(super::game_open_action),
        )
        .route("/games/{game_id}/start", post(super::game_start_action))
        .route("/games/{game_id}/pause", post(super::game_pause_action))
        .route("/games/{game_id}/score", post(super::game_score_action))
        .route(
            "/games/{game_id}/events",
            get(super::event_list_action).post(super::event_append_action),
        )
}
