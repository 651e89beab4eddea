pub mod routes;

use crate::auth::AuthUser;
use crate::{ApiError, ApiResult, AppData};
use axum::Json;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use sportdesk_core::Club;
use database::ClubFields;
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct ClubRequest {
    pub name: String,
    pub federation_id: Option<u32>,
    pub sport_id: Option<u32>,
    #[serde(default)]
    pub address: String,
    pub contact_email: Option<String>,
    #[serde(default)]
    pub phone: String,
    pub website: Option<String>,
    pub additional_info: Option<String>,
}

#[derive(Serialize)]
pub struct ClubResponse {
    pub id: u32,
    pub name: String,
    pub slug: String,
    pub federation_id: Option<u32>,
    pub sport_id: Option<u32>,
    pub address: String,
    pub contact_email: Option<String>,
    pub phone: String,
    pub website: Option<String>,
    pub additional_info: Option<String>,
}

pub fn club_response(club: &Club) -> ClubResponse {
    ClubResponse {
        id: club.id,
        name: club.name.clone(),
        slug: club.slug.clone(),
        federation_id: club.federation_id,
        sport_id: club.sport_id,
        address: club.address.clone(),
        contact_email: club.contact_email.clone(),
        phone: club.phone.clone(),
        website: club.website.clone(),
        additional_info: club.additional_info.clone(),
    }
}

fn club_fields(payload: ClubRequest) -> Result<ClubFields, ApiError> {
    if payload.name.trim().is_empty() {
        return Err(ApiError::BadRequest("Club name must not be empty".to_string()));
    }
    Ok(ClubFields {
        name: payload.name.trim().to_string(),
        federation_id: payload.federation_id,
        sport_id: payload.sport_id,
        address: payload.address,
        contact_email: payload.contact_email,
        phone: payload.phone,
        website: payload.website,
        additional_info: payload.additional_info,
    })
}

pub async fn club_list_action(
    State(state): State<AppData>,
    AuthUser(_user): AuthUser,
) -> ApiResult<impl IntoResponse> {
    let clubs = state.storage.clubs().await?;
    Ok(Json(clubs.iter().map(club_response).collect::<Vec<_>>()))
}

pub async fn club_get_action(
    State(state): State<AppData>,
    AuthUser(_user): AuthUser,
    Path(club_slug): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let club = state
        .storage
        .club_by_slug(&club_slug)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Club '{}' not found", club_slug)))?;
    Ok(Json(club_response(&club)))
}

pub async fn club_create_action(
    State(state): State<AppData>,
    AuthUser(_user): AuthUser,
    Json(payload): Json<ClubRequest>,
) -> ApiResult<impl IntoResponse> {
    let club = state.storage.create_club(club_fields(payload)?).await?;
    Ok(Json(club_response(&club)))
}

pub async fn club_edit_action(
    State(state): State<AppData>,
    AuthUser(_user): AuthUser,
    Path(club_slug): Path<String>,
    Json(payload): Json<ClubRequest>,
) -> ApiResult<impl IntoResponse> {
    let club = state
        .storage
        .club_by_slug(&club_slug)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Club '{}' not found", club_slug)))?;

    let updated = state
        .storage
        .update_club(club.id, club_fields(payload)?)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Club '{}' not found", club_slug)))?;

    Ok(Json(club_response(&updated)))
}
