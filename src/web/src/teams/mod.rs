pub mod chat;
pub mod lineups;
pub mod penalties;
pub mod routes;
pub mod trainings;

use crate::auth::AuthUser;
use crate::{ApiError, ApiResult, AppData};
use axum::Json;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use chrono::Utc;
use sportdesk_core::{Team, validate_roster};
use database::TeamFields;
use serde::{Deserialize, Serialize};

/// Loads a team or turns the slug into a 404.
pub async fn load_team(state: &AppData, slug: &str) -> Result<Team, ApiError> {
    state
        .storage
        .team_by_slug(slug)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Team '{}' not found", slug)))
}

#[derive(Deserialize)]
pub struct TeamRequest {
    pub name: String,
    pub club_id: u32,
    pub age_group_id: Option<u32>,
    pub sport_id: Option<u32>,
    #[serde(default)]
    pub player_ids: Vec<u32>,
    #[serde(default)]
    pub trainer_ids: Vec<u32>,
    pub cashier_id: Option<u32>,
    pub short_code: Option<String>,
    pub additional_info: Option<String>,
}

#[derive(Serialize)]
pub struct TeamResponse {
    pub id: u32,
    pub name: String,
    pub slug: String,
    pub club_id: u32,
    pub age_group_id: Option<u32>,
    pub sport_id: Option<u32>,
    pub player_ids: Vec<u32>,
    pub trainer_ids: Vec<u32>,
    pub cashier_id: Option<u32>,
    pub short_code: String,
    pub additional_info: Option<String>,
}

pub fn team_response(team: &Team) -> TeamResponse {
    TeamResponse {
        id: team.id,
        name: team.name.clone(),
        slug: team.slug.clone(),
        club_id: team.club_id,
        age_group_id: team.age_group_id,
        sport_id: team.sport_id,
        player_ids: team.player_ids.clone(),
        trainer_ids: team.trainer_ids.clone(),
        cashier_id: team.cashier_id,
        short_code: team.short_code.clone(),
        additional_info: team.additional_info.clone(),
    }
}

/// Shared create/edit validation: club must exist, every roster player
/// must hold the player role and a player pass.
async fn team_fields(state: &AppData, payload: TeamRequest) -> Result<TeamFields, ApiError> {
    if payload.name.trim().is_empty() {
        return Err(ApiError::BadRequest("Team name must not be empty".to_string()));
    }

    state
        .storage
        .club_by_id(payload.club_id)
        .await?
        .ok_or_else(|| ApiError::BadRequest(format!("Club {} does not exist", payload.club_id)))?;

    let members = state.storage.roster_members(&payload.player_ids).await?;
    if members.len() != payload.player_ids.len() {
        return Err(ApiError::BadRequest("Unknown user in roster".to_string()));
    }
    validate_roster(&members)?;

    Ok(TeamFields {
        name: payload.name.trim().to_string(),
        club_id: payload.club_id,
        age_group_id: payload.age_group_id,
        sport_id: payload.sport_id,
        player_ids: payload.player_ids,
        trainer_ids: payload.trainer_ids,
        cashier_id: payload.cashier_id,
        short_code: payload.short_code,
        additional_info: payload.additional_info,
    })
}

pub async fn team_list_action(
    State(state): State<AppData>,
    AuthUser(_user): AuthUser,
) -> ApiResult<impl IntoResponse> {
    let teams = state.storage.teams().await?;
    Ok(Json(teams.iter().map(team_response).collect::<Vec<_>>()))
}

pub async fn team_get_action(
    State(state): State<AppData>,
    AuthUser(_user): AuthUser,
    Path(team_slug): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let team = load_team(&state, &team_slug).await?;
    Ok(Json(team_response(&team)))
}

pub async fn team_create_action(
    State(state): State<AppData>,
    AuthUser(_user): AuthUser,
    Json(payload): Json<TeamRequest>,
) -> ApiResult<impl IntoResponse> {
    let fields = team_fields(&state, payload).await?;
    let team = state.storage.create_team(fields).await?;
    Ok(Json(team_response(&team)))
}

pub async fn team_edit_action(
    State(state): State<AppData>,
    AuthUser(_user): AuthUser,
    Path(team_slug): Path<String>,
    Json(payload): Json<TeamRequest>,
) -> ApiResult<impl IntoResponse> {
    let team = load_team(&state, &team_slug).await?;
    let fields = team_fields(&state, payload).await?;

    let updated = state
        .storage
        .update_team(team.id, fields)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Team '{}' not found", team_slug)))?;

    Ok(Json(team_response(&updated)))
}

#[derive(Serialize)]
pub struct MemberResponse {
    pub id: u32,
    pub username: String,
    pub short_id: String,
    pub role: &'static str,
}

pub async fn team_members_action(
    State(state): State<AppData>,
    AuthUser(_user): AuthUser,
    Path(team_slug): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let team = load_team(&state, &team_slug).await?;
    let members = state.storage.team_member_users(team.id).await?;

    Ok(Json(
        members
            .iter()
            .map(|user| MemberResponse {
                id: user.id,
                username: user.username.clone(),
                short_id: user.short_id.clone(),
                role: user.role.as_str(),
            })
            .collect::<Vec<_>>(),
    ))
}

/// Public team page: no login required. Upcoming public lineups and the
/// fine catalog, next to the team itself.
#[derive(Serialize)]
pub struct PublicTeamResponse {
    pub team: TeamResponse,
    pub upcoming_fixtures: Vec<PublicFixture>,
    pub public_lineups: Vec<lineups::LineupResponse>,
    pub penalties: Vec<penalties::PenaltyResponse>,
}

#[derive(Serialize)]
pub struct PublicFixture {
    pub slug: String,
    pub kickoff: chrono::DateTime<Utc>,
    pub competition: String,
}

pub async fn team_public_action(
    State(state): State<AppData>,
    Path(team_slug): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let team = load_team(&state, &team_slug).await?;
    let now = Utc::now();

    let fixtures = state
        .storage
        .upcoming_fixtures_for_team(team.id, now, 6)
        .await?;
    let public_lineups = state.storage.public_upcoming_lineups(team.id, now, 6).await?;
    let catalog = state.storage.penalties_for_team(team.id).await?;

    Ok(Json(PublicTeamResponse {
        team: team_response(&team),
        upcoming_fixtures: fixtures
            .iter()
            .map(|f| PublicFixture {
                slug: f.slug.clone(),
                kickoff: f.kickoff,
                competition: f.competition.clone(),
            })
            .collect(),
        public_lineups: public_lineups.iter().map(lineups::lineup_response).collect(),
        penalties: catalog.iter().map(penalties::penalty_response).collect(),
    }))
}
