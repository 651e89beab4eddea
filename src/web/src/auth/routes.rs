use super::{AuthUser, clear_session_cookie, hash_password, open_session, session_cookie, verify_password};
use crate::{ApiError, ApiResult, AppData};
use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use sportdesk_core::UserRole;
use database::NewUser;
use log::info;
use serde::{Deserialize, Serialize};

pub fn auth_routes() -> Router<AppData> {
    Router::new()
        .route("/auth/register", post(register_action))
        .route("/auth/login", post(login_action))
        .route("/auth/logout", post(logout_action))
        .route("/auth/profile", get(profile_action))
}

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub role: String,
    pub password: String,
    pub password_repeat: String,
}

#[derive(Serialize)]
pub struct UserResponse {
    pub id: u32,
    pub username: String,
    pub email: String,
    pub role: &'static str,
    pub short_id: String,
}

fn user_response(user: &sportdesk_core::User) -> UserResponse {
    UserResponse {
        id: user.id,
        username: user.username.clone(),
        email: user.email.clone(),
        role: user.role.as_str(),
        short_id: user.short_id.clone(),
    }
}

async fn register_action(
    State(state): State<AppData>,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult<impl IntoResponse> {
    let username = payload.username.trim();
    if username.is_empty() {
        return Err(ApiError::BadRequest("Username must not be empty".to_string()));
    }
    if payload.password.len() < 8 {
        return Err(ApiError::BadRequest(
            "Password must be at least 8 characters".to_string(),
        ));
    }
    if payload.password != payload.password_repeat {
        return Err(ApiError::BadRequest("Passwords do not match".to_string()));
    }

    let role = UserRole::from_str_name(&payload.role)
        .ok_or_else(|| ApiError::BadRequest(format!("Unknown role '{}'", payload.role)))?;

    let user = state
        .storage
        .create_user(NewUser {
            username: username.to_string(),
            email: payload.email.trim().to_string(),
            password_hash: hash_password(&payload.password)?,
            role,
            short_id: sportdesk_core::short_id(),
        })
        .await?;

    info!("user registered: {} ({})", user.username, user.role.as_str());

    Ok(Json(user_response(&user)))
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

async fn login_action(
    State(state): State<AppData>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    let user = state
        .storage
        .user_by_username(&payload.username)
        .await?
        .filter(|user| verify_password(&payload.password, &user.password_hash))
        .ok_or_else(|| ApiError::Unauthorized("Invalid username or password".to_string()))?;

    let token = open_session(&state, &user).await?;

    Ok((
        [(SET_COOKIE, session_cookie(&token))],
        Json(user_response(&user)),
    ))
}

async fn logout_action(
    State(state): State<AppData>,
    headers: axum::http::HeaderMap,
) -> ApiResult<impl IntoResponse> {
    let header = headers
        .get(axum::http::header::COOKIE)
        .and_then(|v| v.to_str().ok());
    if let Some(token) = super::cookie_value(header, super::SESSION_COOKIE) {
        state.storage.delete_session(token).await?;
    }

    Ok((
        [(SET_COOKIE, clear_session_cookie())],
        Json(serde_json::json!({ "logged_out": true })),
    ))
}

#[derive(Serialize)]
pub struct ProfileResponse {
    pub user: UserResponse,
    pub player_pass: Option<String>,
    pub referee_license: Option<String>,
    pub timekeeper_license: Option<String>,
}

async fn profile_action(
    State(state): State<AppData>,
    AuthUser(user): AuthUser,
) -> ApiResult<impl IntoResponse> {
    let player = state.storage.player_profile_by_user(user.id).await?;
    let referee = state.storage.referee_profile_by_user(user.id).await?;
    let timekeeper = state.storage.timekeeper_profile_by_user(user.id).await?;

    Ok(Json(ProfileResponse {
        user: user_response(&user),
        player_pass: player.map(|p| p.pass_number),
        referee_license: referee.map(|p| p.license_number),
        timekeeper_license: timekeeper.map(|p| p.license_number),
    }))
}
