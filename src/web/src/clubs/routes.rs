use crate::AppData;
use axum::Router;
use axum::routing::{get, post};

pub fn club_routes() -> Router<AppData> {
    Router::new()
        .route(
            "/clubs",
            get(super::club_list_action).post(super::club_create_action),
        )
        .route("/clubs/{club_slug}", get(super::club_get_action))
        .route("/clubs/{club_slug}/edit", post(super::club_edit_action))
}
