use crate::AppData;
use axum::Router;
use axum::routing::{get, post};

pub fn account_routes() -> Router<AppData> {
    Router::new()
        .route(
            "/profiles/player",
            post(super::player_profile_create_action),
        )
        .route(
            "/profiles/referee",
            post(super::referee_profile_create_action),
        )
        .route(
            "/profiles/timekeeper",
            post(super::timekeeper_profile_create_action),
        )
        .route(
            "/sports",
            get(super::sport_list_action).post(super::sport_create_action),
        )
        .route("/age-groups", get(super::age_group_list_action))
}
