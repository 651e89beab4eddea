use super::load_team;
use crate::auth::AuthUser;
use crate::{ApiError, ApiResult, AppData};
use axum::Json;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use chrono::{DateTime, Utc};
use sportdesk_core::team::players_outside_roster;
use sportdesk_core::{Lineup, is_trainer};
use database::LineupFields;
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct LineupRequest {
    #[serde(default)]
    pub name: String,
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub player_ids: Vec<u32>,
    #[serde(default)]
    pub is_public: bool,
}

#[derive(Serialize)]
pub struct LineupResponse {
    pub id: u32,
    pub name: String,
    pub date: Option<DateTime<Utc>>,
    pub player_ids: Vec<u32>,
    pub is_public: bool,
}

pub fn lineup_response(lineup: &Lineup) -> LineupResponse {
    LineupResponse {
        id: lineup.id,
        name: lineup.name.clone(),
        date: lineup.date,
        player_ids: lineup.player_ids.clone(),
        is_public: lineup.is_public,
    }
}

fn check_players(lineup_players: &[u32], roster: &[u32]) -> Result<(), ApiError> {
    let outside = players_outside_roster(lineup_players, roster);
    if outside.is_empty() {
        Ok(())
    } else {
        Err(ApiError::BadRequest(format!(
            "Users {:?} are not on the team roster",
            outside
        )))
    }
}

pub async fn lineup_list_action(
    State(state): State<AppData>,
    AuthUser(user): AuthUser,
    Path(team_slug): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let team = load_team(&state, &team_slug).await?;
    if !sportdesk_core::is_member(&user, &team) {
        return Err(ApiError::Forbidden("Not a member of this team".to_string()));
    }

    let lineups = state.storage.lineups_for_team(team.id).await?;
    Ok(Json(lineups.iter().map(lineup_response).collect::<Vec<_>>()))
}

pub async fn lineup_create_action(
    State(state): State<AppData>,
    AuthUser(user): AuthUser,
    Path(team_slug): Path<String>,
    Json(payload): Json<LineupRequest>,
) -> ApiResult<impl IntoResponse> {
    let team = load_team(&state, &team_slug).await?;
    if !is_trainer(&user, &team) {
        return Err(ApiError::Forbidden(
            "Only trainers may create lineups".to_string(),
        ));
    }
    check_players(&payload.player_ids, &team.player_ids)?;

    let lineup = state
        .storage
        .create_lineup(
            team.id,
            user.id,
            LineupFields {
                name: payload.name,
                date: payload.date,
                player_ids: payload.player_ids,
                is_public: payload.is_public,
            },
        )
        .await?;

    Ok(Json(lineup_response(&lineup)))
}

pub async fn lineup_edit_action(
    State(state): State<AppData>,
    AuthUser(user): AuthUser,
    Path((team_slug, lineup_id)): Path<(String, u32)>,
    Json(payload): Json<LineupRequest>,
) -> ApiResult<impl IntoResponse> {
    let team = load_team(&state, &team_slug).await?;
    if !is_trainer(&user, &team) {
        return Err(ApiError::Forbidden(
            "Only trainers may edit lineups".to_string(),
        ));
    }
    check_players(&payload.player_ids, &team.player_ids)?;

    let lineup = state
        .storage
        .update_lineup(
            team.id,
            lineup_id,
            LineupFields {
                name: payload.name,
                date: payload.date,
                player_ids: payload.player_ids,
                is_public: payload.is_public,
            },
        )
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Lineup {} not found", lineup_id)))?;

    Ok(Json(lineup_response(&lineup)))
}

pub async fn lineup_delete_action(
    State(state): State<AppData>,
    AuthUser(user): AuthUser,
    Path((team_slug, lineup_id)): Path<(String, u32)>,
) -> ApiResult<impl IntoResponse> {
    let team = load_team(&state, &team_slug).await?;
    if !is_trainer(&user, &team) {
        return Err(ApiError::Forbidden(
            "Only trainers may delete lineups".to_string(),
        ));
    }

    if !state.storage.delete_lineup(team.id, lineup_id).await? {
        return Err(ApiError::NotFound(format!("Lineup {} not found", lineup_id)));
    }

    Ok(Json(serde_json::json!({ "deleted": true })))
}
