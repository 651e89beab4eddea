use crate::AppData;
use axum::Router;
use axum::routing::get;

pub fn news_routes() -> Router<AppData> {
    Router::new()
        .route(
            "/news",
            get(super::news_list_action).post(super::news_create_action),
        )
        .route("/news/{news_slug}", get(super::news_get_action))
}
