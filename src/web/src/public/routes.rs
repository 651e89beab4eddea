use crate::AppData;
use axum::Router;
use axum::routing::get;

pub fn public_routes() -> Router<AppData> {
    Router::new()
        .route("/", get(super::home_action))
        .route("/sports/{sport_name}/teams", get(super::sport_overview_action))
        .route("/search", get(super::search_action))
}
