use super::load_team;
use crate::auth::AuthUser;
use crate::{ApiError, ApiResult, AppData};
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use chrono::{DateTime, Utc};
use sportdesk_core::is_member;
use sportdesk_core::team::CHAT_PAGE_SIZE;
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct ChatPostRequest {
    pub text: String,
}

#[derive(Deserialize)]
pub struct ChatPageQuery {
    #[serde(default = "first_page")]
    pub page: u32,
}

fn first_page() -> u32 {
    1
}

#[derive(Serialize)]
pub struct ChatMessageResponse {
    pub id: u32,
    pub user_id: u32,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct ChatPageResponse {
    pub page: u32,
    pub pages: u32,
    pub messages: Vec<ChatMessageResponse>,
}

pub async fn chat_list_action(
    State(state): State<AppData>,
    AuthUser(user): AuthUser,
    Path(team_slug): Path<String>,
    Query(query): Query<ChatPageQuery>,
) -> ApiResult<impl IntoResponse> {
    let team = load_team(&state, &team_slug).await?;
    if !is_member(&user, &team) {
        return Err(ApiError::Forbidden(
            "Only team members may read the chat".to_string(),
        ));
    }

    let page = query.page.max(1);
    let messages = state.storage.chat_messages_page(team.id, page).await?;
    let total = state.storage.chat_message_count(team.id).await?;
    let pages = total.div_ceil(CHAT_PAGE_SIZE).max(1);

    Ok(Json(ChatPageResponse {
        page,
        pages,
        messages: messages
            .iter()
            .map(|m| ChatMessageResponse {
                id: m.id,
                user_id: m.user_id,
                text: m.text.clone(),
                created_at: m.created_at,
            })
            .collect(),
    }))
}

pub async fn chat_post_action(
    State(state): State<AppData>,
    AuthUser(user): AuthUser,
    Path(team_slug): Path<String>,
    Json(payload): Json<ChatPostRequest>,
) -> ApiResult<impl IntoResponse> {
    let team = load_team(&state, &team_slug).await?;
    if !is_member(&user, &team) {
        return Err(ApiError::Forbidden(
            "Only team members may chat".to_string(),
        ));
    }

    let text = payload.text.trim();
    if text.is_empty() {
        return Err(ApiError::BadRequest("Message must not be empty".to_string()));
    }

    let message = state.storage.add_chat_message(team.id, user.id, text).await?;
    Ok(Json(ChatMessageResponse {
        id: message.id,
        user_id: message.user_id,
        text: message.text,
        created_at: message.created_at,
    }))
}
