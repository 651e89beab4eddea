pub mod routes;

use crate::auth::AuthUser;
use crate::{ApiError, ApiResult, AppData};
use axum::Json;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use chrono::{DateTime, Utc};
use sportdesk_core::{Fixture, FixtureStatus, UserRole};
use database::FixtureFields;
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct FixtureRequest {
    pub home_team_id: u32,
    pub away_team_id: u32,
    pub venue_id: Option<u32>,
    pub kickoff: DateTime<Utc>,
    #[serde(default)]
    pub competition: String,
    #[serde(default)]
    pub round: String,
    pub referee_id: Option<u32>,
    pub status: Option<String>,
    pub result_home: Option<i32>,
    pub result_away: Option<i32>,
    pub additional_info: Option<String>,
}

#[derive(Serialize)]
pub struct FixtureResponse {
    pub id: u32,
    pub slug: String,
    pub short_code: String,
    pub home_team_id: u32,
    pub away_team_id: u32,
    pub venue_id: Option<u32>,
    pub kickoff: DateTime<Utc>,
    pub competition: String,
    pub round: String,
    pub referee_id: Option<u32>,
    pub status: &'static str,
    pub result_home: Option<i32>,
    pub result_away: Option<i32>,
    pub referee_preference_ids: Vec<u32>,
    pub is_past: bool,
}

pub fn fixture_response(fixture: &Fixture, now: DateTime<Utc>) -> FixtureResponse {
    FixtureResponse {
        id: fixture.id,
        slug: fixture.slug.clone(),
        short_code: fixture.short_code.clone(),
        home_team_id: fixture.home_team_id,
        away_team_id: fixture.away_team_id,
        venue_id: fixture.venue_id,
        kickoff: fixture.kickoff,
        competition: fixture.competition.clone(),
        round: fixture.round.clone(),
        referee_id: fixture.referee_id,
        status: fixture.status.as_str(),
        result_home: fixture.result_home,
        result_away: fixture.result_away,
        referee_preference_ids: fixture.referee_preference_ids.clone(),
        is_past: fixture.is_past(now),
    }
}

pub async fn load_fixture(state: &AppData, slug: &str) -> Result<Fixture, ApiError> {
    state
        .storage
        .fixture_by_slug(slug)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Fixture '{}' not found", slug)))
}

async fn fixture_fields(
    state: &AppData,
    payload: FixtureRequest,
) -> Result<(FixtureFields, String, String), ApiError> {
    if payload.home_team_id == payload.away_team_id {
        return Err(ApiError::BadRequest(
            "A team cannot play against itself".to_string(),
        ));
    }

    let home = state
        .storage
        .team_by_id(payload.home_team_id)
        .await?
        .ok_or_else(|| {
            ApiError::BadRequest(format!("Team {} does not exist", payload.home_team_id))
        })?;
    let away = state
        .storage
        .team_by_id(payload.away_team_id)
        .await?
        .ok_or_else(|| {
            ApiError::BadRequest(format!("Team {} does not exist", payload.away_team_id))
        })?;

    let status = match payload.status.as_deref() {
        Some(value) => FixtureStatus::from_str_name(value)
            .ok_or_else(|| ApiError::BadRequest(format!("Unknown status '{}'", value)))?,
        None => FixtureStatus::default(),
    };

    Ok((
        FixtureFields {
            home_team_id: payload.home_team_id,
            away_team_id: payload.away_team_id,
            venue_id: payload.venue_id,
            kickoff: payload.kickoff,
            competition: payload.competition,
            round: payload.round,
            referee_id: payload.referee_id,
            status,
            result_home: payload.result_home,
            result_away: payload.result_away,
            additional_info: payload.additional_info,
        },
        home.name,
        away.name,
    ))
}

pub async fn fixture_list_action(
    State(state): State<AppData>,
    AuthUser(_user): AuthUser,
) -> ApiResult<impl IntoResponse> {
    let now = Utc::now();
    let fixtures = state.storage.fixtures().await?;
    Ok(Json(
        fixtures
            .iter()
            .map(|f| fixture_response(f, now))
            .collect::<Vec<_>>(),
    ))
}

pub async fn fixture_get_action(
    State(state): State<AppData>,
    AuthUser(_user): AuthUser,
    Path(fixture_slug): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let fixture = load_fixture(&state, &fixture_slug).await?;
    Ok(Json(fixture_response(&fixture, Utc::now())))
}

pub async fn fixture_create_action(
    State(state): State<AppData>,
    AuthUser(_user): AuthUser,
    Json(payload): Json<FixtureRequest>,
) -> ApiResult<impl IntoResponse> {
    let (fields, home_name, away_name) = fixture_fields(&state, payload).await?;
    let fixture = state
        .storage
        .create_fixture(&home_name, &away_name, fields)
        .await?;
    Ok(Json(fixture_response(&fixture, Utc::now())))
}

pub async fn fixture_edit_action(
    State(state): State<AppData>,
    AuthUser(_user): AuthUser,
    Path(fixture_slug): Path<String>,
    Json(payload): Json<FixtureRequest>,
) -> ApiResult<impl IntoResponse> {
    let fixture = load_fixture(&state, &fixture_slug).await?;
    let (fields, _, _) = fixture_fields(&state, payload).await?;

    let updated = state
        .storage
        .update_fixture(fixture.id, fields)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Fixture '{}' not found", fixture_slug)))?;

    Ok(Json(fixture_response(&updated, Utc::now())))
}

#[derive(Deserialize)]
pub struct RefereeAssignRequest {
    pub referee_id: Option<u32>,
}

/// Assigns (or clears) the fixture referee. The user must hold the
/// referee role.
pub async fn fixture_referee_action(
    State(state): State<AppData>,
    AuthUser(_user): AuthUser,
    Path(fixture_slug): Path<String>,
    Json(payload): Json<RefereeAssignRequest>,
) -> ApiResult<impl IntoResponse> {
    let fixture = load_fixture(&state, &fixture_slug).await?;

    if let Some(referee_id) = payload.referee_id {
        let referee = state
            .storage
            .user_by_id(referee_id)
            .await?
            .ok_or_else(|| ApiError::BadRequest(format!("User {} does not exist", referee_id)))?;
        if referee.role != UserRole::Referee {
            return Err(ApiError::BadRequest(format!(
                "{} is not a referee",
                referee.username
            )));
        }
    }

    let updated = state
        .storage
        .set_fixture_referee(fixture.id, payload.referee_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Fixture '{}' not found", fixture_slug)))?;

    Ok(Json(fixture_response(&updated, Utc::now())))
}

/// A referee adds themselves to the fixture's wish list.
pub async fn fixture_preference_action(
    State(state): State<AppData>,
    AuthUser(user): AuthUser,
    Path(fixture_slug): Path<String>,
) -> ApiResult<impl IntoResponse> {
    if user.role != UserRole::Referee {
        return Err(ApiError::Forbidden(
            "Only referees may register a preference".to_string(),
        ));
    }

    let fixture = load_fixture(&state, &fixture_slug).await?;
    state
        .storage
        .add_referee_preference(fixture.id, user.id)
        .await?;

    let reloaded = load_fixture(&state, &fixture_slug).await?;
    Ok(Json(fixture_response(&reloaded, Utc::now())))
}
