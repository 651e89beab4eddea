use crate::AppData;
use axum::Router;
use axum::routing::get;

pub fn venue_routes() -> Router<AppData> {
    Router::new()
        .route(
            "/venues",
            get(super::venue_list_action).post(super::venue_create_action),
        )
        .route("/venues/{venue_slug}", get(super::venue_get_action))
}
