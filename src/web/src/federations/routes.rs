use crate::AppData;
use axum::Router;
use axum::routing::{get, post};

pub fn federation_routes() -> Router<AppData> {
    Router::new()
        .route(
            "/federations",
            get(super::federation_list_action).post(super::federation_create_action),
        )
        .route(
            "/federations/{federation_slug}",
            get(super::federation_get_action),
        )
        .route(
            "/federations/{federation_slug}/edit",
            post(super::federation_edit_action),
        )
        .route(
            "/head-federations",
            get(super::head_list_action).post(super::head_create_action),
        )
        .route("/head-federations/{head_slug}", get(super::head_get_action))
        .route(
            "/head-federations/{head_slug}/edit",
            post(super::head_edit_action),
        )
}
