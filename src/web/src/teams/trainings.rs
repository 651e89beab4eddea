use super::load_team;
use crate::auth::AuthUser;
use crate::{ApiError, ApiResult, AppData};
use axum::Json;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc, Weekday};
use sportdesk_core::{RsvpStatus, TrainingEvent, is_member, is_trainer, rsvp_comment};
use database::{EventFields, SeriesFields};
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct SeriesRequest {
    /// 0 = Monday ... 6 = Sunday.
    pub weekday: u8,
    pub time: NaiveTime,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Serialize)]
pub struct SeriesResponse {
    pub id: u32,
    pub weekday: u8,
    pub time: NaiveTime,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub events_created: u32,
}

pub async fn series_create_action(
    State(state): State<AppData>,
    AuthUser(user): AuthUser,
    Path(team_slug): Path<String>,
    Json(payload): Json<SeriesRequest>,
) -> ApiResult<impl IntoResponse> {
    let team = load_team(&state, &team_slug).await?;
    if !is_trainer(&user, &team) {
        return Err(ApiError::Forbidden(
            "Only trainers may create training series".to_string(),
        ));
    }

    let weekday = Weekday::try_from(payload.weekday)
        .map_err(|_| ApiError::BadRequest(format!("Invalid weekday {}", payload.weekday)))?;
    if payload.end_date < payload.start_date {
        return Err(ApiError::BadRequest(
            "End date must not precede start date".to_string(),
        ));
    }

    let series = state
        .storage
        .create_training_series(
            team.id,
            user.id,
            SeriesFields {
                weekday,
                time: payload.time,
                start_date: payload.start_date,
                end_date: payload.end_date,
            },
        )
        .await?;

    let events_created = state.storage.generate_series_events(&series).await?;

    Ok(Json(SeriesResponse {
        id: series.id,
        weekday: series.weekday.num_days_from_monday() as u8,
        time: series.time,
        start_date: series.start_date,
        end_date: series.end_date,
        events_created,
    }))
}

/// Re-expands an existing series; new events only for dates that are
/// still missing.
pub async fn series_generate_action(
    State(state): State<AppData>,
    AuthUser(user): AuthUser,
    Path((team_slug, series_id)): Path<(String, u32)>,
) -> ApiResult<impl IntoResponse> {
    let team = load_team(&state, &team_slug).await?;
    if !is_trainer(&user, &team) {
        return Err(ApiError::Forbidden(
            "Only trainers may expand training series".to_string(),
        ));
    }

    let series = state
        .storage
        .training_series_for_team(team.id)
        .await?
        .into_iter()
        .find(|s| s.id == series_id)
        .ok_or_else(|| ApiError::NotFound(format!("Series {} not found", series_id)))?;

    let events_created = state.storage.generate_series_events(&series).await?;
    Ok(Json(serde_json::json!({ "events_created": events_created })))
}

#[derive(Deserialize)]
pub struct EventRequest {
    pub start: NaiveDateTime,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub note: String,
}

#[derive(Serialize)]
pub struct EventResponse {
    pub id: u32,
    pub start: NaiveDateTime,
    pub location: String,
    pub note: String,
    pub series_id: Option<u32>,
}

pub fn event_response(event: &TrainingEvent) -> EventResponse {
    EventResponse {
        id: event.id,
        start: event.start,
        location: event.location.clone(),
        note: event.note.clone(),
        series_id: event.series_id,
    }
}

pub async fn event_create_action(
    State(state): State<AppData>,
    AuthUser(user): AuthUser,
    Path(team_slug): Path<String>,
    Json(payload): Json<EventRequest>,
) -> ApiResult<impl IntoResponse> {
    let team = load_team(&state, &team_slug).await?;
    if !is_trainer(&user, &team) {
        return Err(ApiError::Forbidden(
            "Only trainers may create trainings".to_string(),
        ));
    }

    let event = state
        .storage
        .create_training_event(
            team.id,
            user.id,
            EventFields {
                start: payload.start,
                location: payload.location,
                note: payload.note,
            },
        )
        .await?;

    Ok(Json(event_response(&event)))
}

/// Member view of the training calendar: upcoming events with the
/// caller's own RSVP state attached.
#[derive(Serialize)]
pub struct CalendarEntry {
    #[serde(flatten)]
    pub event: EventResponse,
    pub my_rsvp: Option<RsvpEntry>,
}

#[derive(Serialize)]
pub struct RsvpEntry {
    pub status: RsvpStatus,
    pub comment: Option<String>,
}

pub async fn event_list_action(
    State(state): State<AppData>,
    AuthUser(user): AuthUser,
    Path(team_slug): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let team = load_team(&state, &team_slug).await?;
    if !is_member(&user, &team) {
        return Err(ApiError::Forbidden("Not a member of this team".to_string()));
    }

    let events = state
        .storage
        .upcoming_trainings(team.id, Utc::now().naive_utc())
        .await?;
    let mut rsvps = state.storage.user_rsvps_for_team(team.id, user.id).await?;

    Ok(Json(
        events
            .iter()
            .map(|event| CalendarEntry {
                event: event_response(event),
                my_rsvp: rsvps.remove(&event.id).map(|rsvp| RsvpEntry {
                    status: rsvp.status,
                    comment: rsvp.comment,
                }),
            })
            .collect::<Vec<_>>(),
    ))
}

pub async fn event_delete_action(
    State(state): State<AppData>,
    AuthUser(user): AuthUser,
    Path((team_slug, event_id)): Path<(String, u32)>,
) -> ApiResult<impl IntoResponse> {
    let team = load_team(&state, &team_slug).await?;
    if !is_trainer(&user, &team) {
        return Err(ApiError::Forbidden(
            "Only trainers may delete trainings".to_string(),
        ));
    }

    if !state.storage.delete_training_event(team.id, event_id).await? {
        return Err(ApiError::NotFound(format!("Training {} not found", event_id)));
    }

    Ok(Json(serde_json::json!({ "deleted": true })))
}

#[derive(Deserialize)]
pub struct RsvpRequest {
    pub status: String,
    pub comment: Option<String>,
}

pub async fn rsvp_action(
    State(state): State<AppData>,
    AuthUser(user): AuthUser,
    Path((team_slug, event_id)): Path<(String, u32)>,
    Json(payload): Json<RsvpRequest>,
) -> ApiResult<impl IntoResponse> {
    let team = load_team(&state, &team_slug).await?;
    if !is_member(&user, &team) {
        return Err(ApiError::Forbidden(
            "Only team members may respond to trainings".to_string(),
        ));
    }

    let event = state
        .storage
        .training_event_by_id(team.id, event_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Training {} not found", event_id)))?;

    let status = RsvpStatus::from_str_name(&payload.status)
        .ok_or_else(|| ApiError::BadRequest(format!("Invalid status '{}'", payload.status)))?;
    let comment = rsvp_comment(status, payload.comment.as_deref());

    let rsvp = state
        .storage
        .upsert_rsvp(event.id, user.id, status, comment)
        .await?;

    Ok(Json(RsvpEntry {
        status: rsvp.status,
        comment: rsvp.comment,
    }))
}
