pub mod routes;

use crate::auth::AuthUser;
use crate::{ApiError, ApiResult, AppData};
use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use chrono::NaiveDate;
use database::NewProfileDates;
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct PlayerProfileRequest {
    pub pass_number: String,
    pub issue_date: Option<NaiveDate>,
    pub expires_at: Option<NaiveDate>,
    pub club_id: Option<u32>,
}

#[derive(Serialize)]
pub struct PlayerProfileResponse {
    pub pass_number: String,
    pub issue_date: Option<NaiveDate>,
    pub expires_at: Option<NaiveDate>,
    pub club_id: Option<u32>,
}

pub async fn player_profile_create_action(
    State(state): State<AppData>,
    AuthUser(user): AuthUser,
    Json(payload): Json<PlayerProfileRequest>,
) -> ApiResult<impl IntoResponse> {
    let pass_number = payload.pass_number.trim();
    if pass_number.is_empty() {
        return Err(ApiError::BadRequest("Pass number must not be empty".to_string()));
    }

    if state.storage.player_profile_by_user(user.id).await?.is_some() {
        return Err(ApiError::Conflict("User already has a player pass".to_string()));
    }

    let profile = state
        .storage
        .create_player_profile(
            user.id,
            pass_number,
            NewProfileDates {
                issue_date: payload.issue_date,
                expires_at: payload.expires_at,
            },
            payload.club_id,
        )
        .await?;

    Ok(Json(PlayerProfileResponse {
        pass_number: profile.pass_number,
        issue_date: profile.issue_date,
        expires_at: profile.expires_at,
        club_id: profile.club_id,
    }))
}

#[derive(Deserialize)]
pub struct RefereeProfileRequest {
    pub license_number: String,
    pub license_level: String,
    pub issue_date: Option<NaiveDate>,
    pub expires_at: Option<NaiveDate>,
    pub federation_id: Option<u32>,
}

pub async fn referee_profile_create_action(
    State(state): State<AppData>,
    AuthUser(user): AuthUser,
    Json(payload): Json<RefereeProfileRequest>,
) -> ApiResult<impl IntoResponse> {
    let license_number = payload.license_number.trim();
    if license_number.is_empty() {
        return Err(ApiError::BadRequest(
            "License number must not be empty".to_string(),
        ));
    }

    if state.storage.referee_profile_by_user(user.id).await?.is_some() {
        return Err(ApiError::Conflict(
            "User already has a referee license".to_string(),
        ));
    }

    let profile = state
        .storage
        .create_referee_profile(
            user.id,
            license_number,
            payload.license_level.trim(),
            NewProfileDates {
                issue_date: payload.issue_date,
                expires_at: payload.expires_at,
            },
            payload.federation_id,
        )
        .await?;

    Ok(Json(serde_json::json!({
        "license_number": profile.license_number,
        "license_level": profile.license_level,
    })))
}

#[derive(Deserialize)]
pub struct TimekeeperProfileRequest {
    pub license_number: String,
    pub qualification: String,
    pub issue_date: Option<NaiveDate>,
    pub expires_at: Option<NaiveDate>,
    pub federation_id: Option<u32>,
}

pub async fn timekeeper_profile_create_action(
    State(state): State<AppData>,
    AuthUser(user): AuthUser,
    Json(payload): Json<TimekeeperProfileRequest>,
) -> ApiResult<impl IntoResponse> {
    let license_number = payload.license_number.trim();
    if license_number.is_empty() {
        return Err(ApiError::BadRequest(
            "License number must not be empty".to_string(),
        ));
    }

    if state
        .storage
        .timekeeper_profile_by_user(user.id)
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict(
            "User already has a timekeeper qualification".to_string(),
        ));
    }

    let profile = state
        .storage
        .create_timekeeper_profile(
            user.id,
            license_number,
            payload.qualification.trim(),
            NewProfileDates {
                issue_date: payload.issue_date,
                expires_at: payload.expires_at,
            },
            payload.federation_id,
        )
        .await?;

    Ok(Json(serde_json::json!({
        "license_number": profile.license_number,
        "qualification": profile.qualification,
    })))
}

#[derive(Deserialize)]
pub struct SportCreateRequest {
    pub name: String,
}

pub async fn sport_create_action(
    State(state): State<AppData>,
    AuthUser(_user): AuthUser,
    Json(payload): Json<SportCreateRequest>,
) -> ApiResult<impl IntoResponse> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(ApiError::BadRequest("Sport name must not be empty".to_string()));
    }

    let sport = state.storage.create_sport(name).await?;
    Ok(Json(sport))
}

pub async fn sport_list_action(State(state): State<AppData>) -> ApiResult<impl IntoResponse> {
    let sports = state.storage.sports().await?;
    Ok(Json(sports))
}

pub async fn age_group_list_action(State(state): State<AppData>) -> ApiResult<impl IntoResponse> {
    let age_groups = state.storage.age_groups().await?;
    Ok(Json(age_groups))
}
