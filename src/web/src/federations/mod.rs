pub mod routes;

use crate::auth::AuthUser;
use crate::{ApiError, ApiResult, AppData};
use axum::Json;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use sportdesk_core::OrgNode;
use database::{FederationFields, HeadFederationFields};
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct FederationRequest {
    pub name: String,
    pub parent_id: Option<u32>,
    pub head_federation_id: Option<u32>,
    pub sport_id: Option<u32>,
    #[serde(default)]
    pub country: String,
    pub contact_email: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub website: Option<String>,
    pub additional_info: Option<String>,
}

#[derive(Serialize)]
pub struct FederationResponse {
    pub id: u32,
    pub name: String,
    pub slug: String,
    pub parent_id: Option<u32>,
    pub head_federation_id: Option<u32>,
    pub sport_id: Option<u32>,
    pub country: String,
    pub contact_email: Option<String>,
    pub website: Option<String>,
    /// Parent chain, root first, present on detail views.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hierarchy: Option<Vec<HierarchyEntry>>,
}

#[derive(Serialize)]
pub struct HierarchyEntry {
    pub name: String,
    pub slug: String,
}

fn hierarchy_entries(chain: Vec<OrgNode>) -> Vec<HierarchyEntry> {
    chain
        .into_iter()
        .map(|node| HierarchyEntry {
            name: node.name,
            slug: node.slug,
        })
        .collect()
}

fn federation_response(
    federation: &sportdesk_core::Federation,
    hierarchy: Option<Vec<HierarchyEntry>>,
) -> FederationResponse {
    FederationResponse {
        id: federation.id,
        name: federation.name.clone(),
        slug: federation.slug.clone(),
        parent_id: federation.parent_id,
        head_federation_id: federation.head_federation_id,
        sport_id: federation.sport_id,
        country: federation.country.clone(),
        contact_email: federation.contact_email.clone(),
        website: federation.website.clone(),
        hierarchy,
    }
}

fn federation_fields(payload: FederationRequest) -> Result<FederationFields, ApiError> {
    if payload.name.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "Federation name must not be empty".to_string(),
        ));
    }
    Ok(FederationFields {
        name: payload.name.trim().to_string(),
        parent_id: payload.parent_id,
        head_federation_id: payload.head_federation_id,
        sport_id: payload.sport_id,
        country: payload.country,
        contact_email: payload.contact_email,
        address: payload.address,
        phone_number: payload.phone_number,
        website: payload.website,
        additional_info: payload.additional_info,
    })
}

pub async fn federation_list_action(
    State(state): State<AppData>,
    AuthUser(_user): AuthUser,
) -> ApiResult<impl IntoResponse> {
    let federations = state.storage.federations().await?;
    Ok(Json(
        federations
            .iter()
            .map(|f| federation_response(f, None))
            .collect::<Vec<_>>(),
    ))
}

pub async fn federation_get_action(
    State(state): State<AppData>,
    AuthUser(_user): AuthUser,
    Path(federation_slug): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let federation = state
        .storage
        .federation_by_slug(&federation_slug)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Federation '{}' not found", federation_slug)))?;

    let chain = state.storage.federation_hierarchy(federation.id).await?;
    Ok(Json(federation_response(
        &federation,
        Some(hierarchy_entries(chain)),
    )))
}

pub async fn federation_create_action(
    State(state): State<AppData>,
    AuthUser(_user): AuthUser,
    Json(payload): Json<FederationRequest>,
) -> ApiResult<impl IntoResponse> {
    let federation = state
        .storage
        .create_federation(federation_fields(payload)?)
        .await?;
    Ok(Json(federation_response(&federation, None)))
}

pub async fn federation_edit_action(
    State(state): State<AppData>,
    AuthUser(_user): AuthUser,
    Path(federation_slug): Path<String>,
    Json(payload): Json<FederationRequest>,
) -> ApiResult<impl IntoResponse> {
    let federation = state
        .storage
        .federation_by_slug(&federation_slug)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Federation '{}' not found", federation_slug)))?;

    let updated = state
        .storage
        .update_federation(federation.id, federation_fields(payload)?)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Federation '{}' not found", federation_slug)))?;

    Ok(Json(federation_response(&updated, None)))
}

#[derive(Deserialize)]
pub struct HeadFederationRequest {
    pub name: String,
    pub parent_id: Option<u32>,
    pub sport_id: Option<u32>,
    #[serde(default)]
    pub country: String,
    pub contact_email: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub website: Option<String>,
    pub additional_info: Option<String>,
}

#[derive(Serialize)]
pub struct HeadFederationResponse {
    pub id: u32,
    pub name: String,
    pub slug: String,
    pub parent_id: Option<u32>,
    pub sport_id: Option<u32>,
    pub country: String,
    pub contact_email: Option<String>,
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hierarchy: Option<Vec<HierarchyEntry>>,
}

fn head_federation_response(
    head: &sportdesk_core::HeadFederation,
    hierarchy: Option<Vec<HierarchyEntry>>,
) -> HeadFederationResponse {
    HeadFederationResponse {
        id: head.id,
        name: head.name.clone(),
        slug: head.slug.clone(),
        parent_id: head.parent_id,
        sport_id: head.sport_id,
        country: head.country.clone(),
        contact_email: head.contact_email.clone(),
        website: head.website.clone(),
        hierarchy,
    }
}

fn head_federation_fields(payload: HeadFederationRequest) -> Result<HeadFederationFields, ApiError> {
    if payload.name.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "Head federation name must not be empty".to_string(),
        ));
    }
    Ok(HeadFederationFields {
        name: payload.name.trim().to_string(),
        parent_id: payload.parent_id,
        sport_id: payload.sport_id,
        country: payload.country,
        contact_email: payload.contact_email,
        address: payload.address,
        phone_number: payload.phone_number,
        website: payload.website,
        additional_info: payload.additional_info,
    })
}

pub async fn head_list_action(
    State(state): State<AppData>,
    AuthUser(_user): AuthUser,
) -> ApiResult<impl IntoResponse> {
    let heads = state.storage.head_federations().await?;
    Ok(Json(
        heads
            .iter()
            .map(|h| head_federation_response(h, None))
            .collect::<Vec<_>>(),
    ))
}

pub async fn head_get_action(
    State(state): State<AppData>,
    AuthUser(_user): AuthUser,
    Path(head_slug): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let head = state
        .storage
        .head_federation_by_slug(&head_slug)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Head federation '{}' not found", head_slug)))?;

    let chain = state.storage.head_federation_hierarchy(head.id).await?;
    Ok(Json(head_federation_response(
        &head,
        Some(hierarchy_entries(chain)),
    )))
}

pub async fn head_create_action(
    State(state): State<AppData>,
    AuthUser(_user): AuthUser,
    Json(payload): Json<HeadFederationRequest>,
) -> ApiResult<impl IntoResponse> {
    let head = state
        .storage
        .create_head_federation(head_federation_fields(payload)?)
        .await?;
    Ok(Json(head_federation_response(&head, None)))
}

pub async fn head_edit_action(
    State(state): State<AppData>,
    AuthUser(_user): AuthUser,
    Path(head_slug): Path<String>,
    Json(payload): Json<HeadFederationRequest>,
) -> ApiResult<impl IntoResponse> {
    let head = state
        .storage
        .head_federation_by_slug(&head_slug)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Head federation '{}' not found", head_slug)))?;

    let updated = state
        .storage
        .update_head_federation(head.id, head_federation_fields(payload)?)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Head federation '{}' not found", head_slug)))?;

    Ok(Json(head_federation_response(&updated, None)))
}
