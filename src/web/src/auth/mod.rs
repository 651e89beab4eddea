pub mod routes;

use crate::{ApiError, AppData};
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use axum::extract::FromRequestParts;
use axum::http::header::COOKIE;
use axum::http::request::Parts;
use chrono::{Duration, Utc};
use sportdesk_core::User;

pub const SESSION_COOKIE: &str = "session";
pub const SESSION_HOURS: i64 = 24;

pub fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ApiError::InternalError(format!("Password hashing failed: {}", e)))
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Mints an opaque session token and stores it alongside its expiry.
pub async fn open_session(state: &AppData, user: &User) -> Result<String, ApiError> {
    let token = uuid::Uuid::new_v4().simple().to_string();
    let now = Utc::now();

    // housekeeping while we are here
    state.storage.delete_expired_sessions(now).await?;
    state
        .storage
        .create_session(user.id, &token, now + Duration::hours(SESSION_HOURS))
        .await?;

    Ok(token)
}

pub fn session_cookie(token: &str) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE,
        token,
        SESSION_HOURS * 3600
    )
}

pub fn clear_session_cookie() -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", SESSION_COOKIE)
}

/// Pulls a named cookie out of the raw `Cookie` header.
pub fn cookie_value<'a>(header: Option<&'a str>, name: &str) -> Option<&'a str> {
    header?
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}

/// The logged-in caller, resolved from the session cookie. Rejects with
/// 401 when the cookie is missing, unknown or expired.
pub struct AuthUser(pub User);

impl FromRequestParts<AppData> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppData,
    ) -> Result<Self, Self::Rejection> {
        let header = parts.headers.get(COOKIE).and_then(|v| v.to_str().ok());
        let token = cookie_value(header, SESSION_COOKIE)
            .ok_or_else(|| ApiError::Unauthorized("Login required".to_string()))?;

        let user = state
            .storage
            .session_user(token, Utc::now())
            .await?
            .ok_or_else(|| ApiError::Unauthorized("Session expired".to_string()))?;

        Ok(AuthUser(user))
    }
}

/// Like `AuthUser`, but anonymous callers pass through as `None`.
pub struct MaybeAuthUser(pub Option<User>);

impl FromRequestParts<AppData> for MaybeAuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppData,
    ) -> Result<Self, Self::Rejection> {
        let header = parts.headers.get(COOKIE).and_then(|v| v.to_str().ok());
        let Some(token) = cookie_value(header, SESSION_COOKIE) else {
            return Ok(MaybeAuthUser(None));
        };

        let user = state.storage.session_user(token, Utc::now()).await?;
        Ok(MaybeAuthUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_round_trip() {
        let hash = hash_password("correct horse").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("correct horse", &hash));
        assert!(!verify_password("wrong horse", &hash));
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        assert!(!verify_password("anything", "not-a-hash"));
    }

    #[test]
    fn test_cookie_value_parsing() {
        let header = Some("theme=dark; session=abc123; lang=de");
        assert_eq!(cookie_value(header, "session"), Some("abc123"));
        assert_eq!(cookie_value(header, "theme"), Some("dark"));
        assert_eq!(cookie_value(header, "missing"), None);
        assert_eq!(cookie_value(None, "session"), None);
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("abc");
        assert!(cookie.contains("session=abc"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(clear_session_cookie().contains("Max-Age=0"));
    }
}
