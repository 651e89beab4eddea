pub mod routes;

use crate::auth::AuthUser;
use crate::fixtures::load_fixture;
use crate::{ApiError, ApiResult, AppData};
use axum::Json;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use chrono::{DateTime, Utc};
use sportdesk_core::{Fixture, SboEvent, SboEventType, SboGame, User, can_operate_game, short_code, slugify};
use database::NewSboEvent;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Serialize)]
pub struct GameResponse {
    pub id: u32,
    pub fixture_id: u32,
    pub slug: String,
    pub short_code: String,
    pub start_time: Option<DateTime<Utc>>,
    pub score_home: i32,
    pub score_away: i32,
    pub is_running: bool,
    /// Seconds on the clock, including the running stretch.
    pub time_elapsed: i64,
}

fn game_response(game: &SboGame, now: DateTime<Utc>) -> GameResponse {
    GameResponse {
        id: game.id,
        fixture_id: game.fixture_id,
        slug: game.slug.clone(),
        short_code: game.short_code.clone(),
        start_time: game.start_time,
        score_home: game.score_home,
        score_away: game.score_away,
        is_running: game.is_running,
        time_elapsed: game.elapsed(now),
    }
}

#[derive(Serialize)]
pub struct EventResponse {
    pub id: u32,
    pub timestamp: DateTime<Utc>,
    pub event_type: &'static str,
    pub team_id: Option<u32>,
    pub player_id: Option<u32>,
    pub meta: Value,
    pub description: String,
}

fn event_response(event: &SboEvent) -> EventResponse {
    EventResponse {
        id: event.id,
        timestamp: event.timestamp,
        event_type: event.event_type.as_str(),
        team_id: event.team_id,
        player_id: event.player_id,
        meta: event.meta.clone(),
        description: event.description.clone(),
    }
}

/// Loads a game together with its fixture and enforces scoreboard
/// rights for mutations.
async fn load_game_for_operator(
    state: &AppData,
    game_id: u32,
    user: &User,
) -> Result<(SboGame, Fixture), ApiError> {
    let game = state
        .storage
        .sbo_game_by_id(game_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Game {} not found", game_id)))?;
    let fixture = state
        .storage
        .fixture_by_id(game.fixture_id)
        .await?
        .ok_or_else(|| ApiError::InternalError("Fixture for game is missing".to_string()))?;

    if !can_operate_game(user, &fixture) {
        return Err(ApiError::Forbidden(
            "Only the assigned referee, a timekeeper or an admin may operate the scoreboard"
                .to_string(),
        ));
    }

    Ok((game, fixture))
}

/// Opens the scoreboard for a fixture; one game per fixture.
pub async fn game_open_action(
    State(state): State<AppData>,
    AuthUser(user): AuthUser,
    Path(fixture_slug): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let fixture = load_fixture(&state, &fixture_slug).await?;
    if !can_operate_game(&user, &fixture) {
        return Err(ApiError::Forbidden(
            "Only the assigned referee, a timekeeper or an admin may open a game".to_string(),
        ));
    }

    let slug = slugify(&format!("{} live", fixture.slug));
    let game = state
        .storage
        .create_sbo_game(fixture.id, &slug, &short_code())
        .await?;

    Ok(Json(game_response(&game, Utc::now())))
}

pub async fn game_get_action(
    State(state): State<AppData>,
    Path(fixture_slug): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let fixture = load_fixture(&state, &fixture_slug).await?;
    let game = state
        .storage
        .sbo_game_by_fixture(fixture.id)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound(format!("No game open for fixture '{}'", fixture_slug))
        })?;

    Ok(Json(game_response(&game, Utc::now())))
}

pub async fn game_start_action(
    State(state): State<AppData>,
    AuthUser(user): AuthUser,
    Path(game_id): Path<u32>,
) -> ApiResult<impl IntoResponse> {
    let (mut game, _) = load_game_for_operator(&state, game_id, &user).await?;

    game.start(Utc::now());
    state.storage.save_sbo_game(&game).await?;

    Ok(Json(game_response(&game, Utc::now())))
}

pub async fn game_pause_action(
    State(state): State<AppData>,
    AuthUser(user): AuthUser,
    Path(game_id): Path<u32>,
) -> ApiResult<impl IntoResponse> {
    let (mut game, _) = load_game_for_operator(&state, game_id, &user).await?;

    game.pause(Utc::now());
    state.storage.save_sbo_game(&game).await?;

    Ok(Json(game_response(&game, Utc::now())))
}

#[derive(Deserialize)]
pub struct ScoreRequest {
    pub score_home: i32,
    pub score_away: i32,
}

/// Direct score correction, for when the event log and reality drift.
pub async fn game_score_action(
    State(state): State<AppData>,
    AuthUser(user): AuthUser,
    Path(game_id): Path<u32>,
    Json(payload): Json<ScoreRequest>,
) -> ApiResult<impl IntoResponse> {
    if payload.score_home < 0 || payload.score_away < 0 {
        return Err(ApiError::BadRequest("Scores cannot be negative".to_string()));
    }

    let (mut game, _) = load_game_for_operator(&state, game_id, &user).await?;
    game.score_home = payload.score_home;
    game.score_away = payload.score_away;
    state.storage.save_sbo_game(&game).await?;

    Ok(Json(game_response(&game, Utc::now())))
}

#[derive(Deserialize)]
pub struct EventRequest {
    pub event_type: String,
    pub team_id: Option<u32>,
    pub player_id: Option<u32>,
    #[serde(default = "empty_meta")]
    pub meta: Value,
    #[serde(default)]
    pub description: String,
}

fn empty_meta() -> Value {
    Value::Object(serde_json::Map::new())
}

/// Appends an event to the game log. A goal for one of the fixture's
/// teams also moves the score.
pub async fn event_append_action(
    State(state): State<AppData>,
    AuthUser(user): AuthUser,
    Path(game_id): Path<u32>,
    Json(payload): Json<EventRequest>,
) -> ApiResult<impl IntoResponse> {
    let (mut game, fixture) = load_game_for_operator(&state, game_id, &user).await?;

    let event_type = SboEventType::from_str_name(&payload.event_type)
        .ok_or_else(|| ApiError::BadRequest(format!("Unknown event type '{}'", payload.event_type)))?;

    if let Some(team_id) = payload.team_id {
        if team_id != fixture.home_team_id && team_id != fixture.away_team_id {
            return Err(ApiError::BadRequest(
                "Team is not part of this fixture".to_string(),
            ));
        }
    }

    let event = state
        .storage
        .add_sbo_event(
            game.id,
            NewSboEvent {
                event_type,
                team_id: payload.team_id,
                player_id: payload.player_id,
                meta: payload.meta,
                description: payload.description,
            },
        )
        .await?;

    if event_type == SboEventType::Goal {
        if let Some(team_id) = payload.team_id {
            game.apply_goal(&fixture, team_id);
            state.storage.save_sbo_game(&game).await?;
        }
    }

    Ok(Json(serde_json::json!({
        "event": event_response(&event),
        "score_home": game.score_home,
        "score_away": game.score_away,
    })))
}

pub async fn event_list_action(
    State(state): State<AppData>,
    Path(game_id): Path<u32>,
) -> ApiResult<impl IntoResponse> {
    let game = state
        .storage
        .sbo_game_by_id(game_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Game {} not found", game_id)))?;

    let events = state.storage.sbo_events_for_game(game.id).await?;
    Ok(Json(events.iter().map(event_response).collect::<Vec<_>>()))
}
