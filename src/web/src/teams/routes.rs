use crate::AppData;
use axum::Router;
use axum::routing::{get, post};

use super::{chat, lineups, penalties, trainings};

pub fn team_routes() -> Router<AppData> {
    Router::new()
        .route(
            "/teams",
            get(super::team_list_action).post(super::team_create_action),
        )
        .route("/teams/{team_slug}", get(super::team_get_action))
        .route("/teams/{team_slug}/edit", post(super::team_edit_action))
        .route("/teams/{team_slug}/members", get(super::team_members_action))
        .route("/teams/{team_slug}/public", get(super::team_public_action))
        // lineups
        .route(
            "/teams/{team_slug}/lineups",
            get(lineups::lineup_list_action).post(lineups::lineup_create_action),
        )
        .route(
            "/teams/{team_slug}/lineups/{lineup_id}/edit",
            post(lineups::lineup_edit_action),
        )
        .route(
            "/teams/{team_slug}/lineups/{lineup_id}/delete",
            post(lineups::lineup_delete_action),
        )
        // chat
        .route(
            "/teams/{team_slug}/chat",
            get(chat::chat_list_action).post(chat::chat_post_action),
        )
        // trainings
        .route(
            "/teams/{team_slug}/training-series",
            post(trainings::series_create_action),
        )
        .route(
            "/teams/{team_slug}/training-series/{series_id}/generate",
            post(trainings::series_generate_action),
        )
        .route(
            "/teams/{team_slug}/trainings",
            get(trainings::event_list_action).post(trainings::event_create_action),
        )
        .route(
            "/teams/{team_slug}/trainings/{event_id}/delete",
            post(trainings::event_delete_action),
        )
        .route(
            "/teams/{team_slug}/trainings/{event_id}/rsvp",
            post(trainings::rsvp_action),
        )
        // penalty ledger
        .route(
            "/teams/{team_slug}/penalties",
            get(penalties::ledger_action).post(penalties::penalty_create_action),
        )
        .route(
            "/teams/{team_slug}/penalties/assign",
            post(penalties::penalty_assign_action),
        )
        .route(
            "/teams/{team_slug}/penalties/assigned/{assigned_id}/paid",
            post(penalties::penalty_mark_paid_action),
        )
}
