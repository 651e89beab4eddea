pub mod routes;

use crate::auth::AuthUser;
use crate::{ApiError, ApiResult, AppData};
use axum::Json;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use sportdesk_core::Venue;
use database::VenueFields;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Deserialize)]
pub struct VenueRequest {
    pub name: String,
    #[serde(default)]
    pub address: String,
    pub capacity: Option<i32>,
    #[serde(default)]
    pub contact: String,
    #[serde(default = "empty_slots")]
    pub available_slots: Value,
    pub additional_info: Option<String>,
}

fn empty_slots() -> Value {
    Value::Array(Vec::new())
}

#[derive(Serialize)]
pub struct VenueResponse {
    pub id: u32,
    pub name: String,
    pub slug: String,
    pub address: String,
    pub capacity: Option<i32>,
    pub contact: String,
    pub available_slots: Value,
}

fn venue_response(venue: &Venue) -> VenueResponse {
    VenueResponse {
        id: venue.id,
        name: venue.name.clone(),
        slug: venue.slug.clone(),
        address: venue.address.clone(),
        capacity: venue.capacity,
        contact: venue.contact.clone(),
        available_slots: venue.available_slots.clone(),
    }
}

pub async fn venue_list_action(
    State(state): State<AppData>,
    AuthUser(_user): AuthUser,
) -> ApiResult<impl IntoResponse> {
    let venues = state.storage.venues().await?;
    Ok(Json(venues.iter().map(venue_response).collect::<Vec<_>>()))
}

pub async fn venue_get_action(
    State(state): State<AppData>,
    AuthUser(_user): AuthUser,
    Path(venue_slug): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let venue = state
        .storage
        .venue_by_slug(&venue_slug)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Venue '{}' not found", venue_slug)))?;
    Ok(Json(venue_response(&venue)))
}

pub async fn venue_create_action(
    State(state): State<AppData>,
    AuthUser(_user): AuthUser,
    Json(payload): Json<VenueRequest>,
) -> ApiResult<impl IntoResponse> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(ApiError::BadRequest("Venue name must not be empty".to_string()));
    }
    if !payload.available_slots.is_array() {
        return Err(ApiError::BadRequest(
            "available_slots must be a list".to_string(),
        ));
    }

    let venue = state
        .storage
        .create_venue(VenueFields {
            name: name.to_string(),
            address: payload.address,
            capacity: payload.capacity,
            contact: payload.contact,
            available_slots: payload.available_slots,
            additional_info: payload.additional_info,
        })
        .await?;

    Ok(Json(venue_response(&venue)))
}
