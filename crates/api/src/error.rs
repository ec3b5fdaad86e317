//! API error types and the response envelope

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;

/// Envelope status for a successful response.
pub const STATUS_OK: u32 = 10000;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Database error: {0}")]
    Database(String),
    #[error("Internal server error")]
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, info) = match &self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, 10001, msg.clone()),
            ApiError::InvalidCredentials => (StatusCode::UNAUTHORIZED, 10002, self.to_string()),
            ApiError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, 10003, "Database error".to_string()),
            ApiError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, 10004, self.to_string()),
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, 10005, self.to_string()),
        };

        let body = Json(json!({
            "status": code,
            "info": info,
        }));

        (status, body).into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!("Database error: {:?}", err);
        ApiError::Database(err.to_string())
    }
}

/// Successful response envelope
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub status: u32,
    pub info: &'static str,
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Json<Self> {
        Json(Self {
            status: STATUS_OK,
            info: "success",
            data,
        })
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
