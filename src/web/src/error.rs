use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Custom error type for API handlers
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    Conflict(String),
    InternalError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::InternalError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<database::StoreError> for ApiError {
    fn from(err: database::StoreError) -> Self {
        match &err {
            database::StoreError::RowNotFound => ApiError::NotFound("Not found".to_string()),
            database::StoreError::Database(db_err) if db_err.is_unique_violation() => {
                ApiError::Conflict("Already exists".to_string())
            }
            database::StoreError::Database(db_err) if db_err.is_foreign_key_violation() => {
                ApiError::BadRequest("Referenced entity does not exist".to_string())
            }
            _ => ApiError::InternalError(format!("Database error: {}", err)),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::InternalError(format!("JSON error: {}", err))
    }
}

impl From<sportdesk_core::RosterError> for ApiError {
    fn from(err: sportdesk_core::RosterError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

/// Helper type for handler results
pub type ApiResult<T> = Result<T, ApiError>;
