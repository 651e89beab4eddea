pub mod routes;

use crate::auth::{AuthUser, MaybeAuthUser};
use crate::{ApiError, ApiResult, AppData};
use axum::Json;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use chrono::{DateTime, Utc};
use sportdesk_core::{NewsItem, UserRole};
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct NewsRequest {
    pub title: String,
    pub body: String,
    pub federation_id: Option<u32>,
    #[serde(default = "default_public")]
    pub is_public: bool,
}

fn default_public() -> bool {
    true
}

#[derive(Serialize)]
pub struct NewsResponse {
    pub slug: String,
    pub title: String,
    pub body: String,
    pub federation_id: Option<u32>,
    pub published_at: DateTime<Utc>,
}

fn news_response(item: &NewsItem) -> NewsResponse {
    NewsResponse {
        slug: item.slug.clone(),
        title: item.title.clone(),
        body: item.body.clone(),
        federation_id: item.federation_id,
        published_at: item.published_at,
    }
}

pub async fn news_list_action(State(state): State<AppData>) -> ApiResult<impl IntoResponse> {
    let items = state.storage.public_news().await?;
    Ok(Json(items.iter().map(news_response).collect::<Vec<_>>()))
}

pub async fn news_get_action(
    State(state): State<AppData>,
    MaybeAuthUser(user): MaybeAuthUser,
    Path(news_slug): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let can_see_drafts = user
        .map(|u| matches!(u.role, UserRole::FederationAdmin | UserRole::GlobalAdmin))
        .unwrap_or(false);

    let item = state
        .storage
        .news_by_slug(&news_slug)
        .await?
        .filter(|item| item.is_public || can_see_drafts)
        .ok_or_else(|| ApiError::NotFound(format!("News item '{}' not found", news_slug)))?;
    Ok(Json(news_response(&item)))
}

pub async fn news_create_action(
    State(state): State<AppData>,
    AuthUser(user): AuthUser,
    Json(payload): Json<NewsRequest>,
) -> ApiResult<impl IntoResponse> {
    if !matches!(user.role, UserRole::FederationAdmin | UserRole::GlobalAdmin) {
        return Err(ApiError::Forbidden(
            "Only federation admins may publish news".to_string(),
        ));
    }

    let title = payload.title.trim();
    if title.is_empty() {
        return Err(ApiError::BadRequest("Title must not be empty".to_string()));
    }

    let item = state
        .storage
        .create_news_item(
            title,
            &payload.body,
            user.id,
            payload.federation_id,
            payload.is_public,
        )
        .await?;

    Ok(Json(news_response(&item)))
}
