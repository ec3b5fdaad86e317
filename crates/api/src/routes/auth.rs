//! Token issuance and refresh routes

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use storefront_auth::{RefreshError, TokenPair};

use crate::{
    auth::CredentialError,
    error::{ApiError, ApiResult, Envelope},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshQuery {
    pub refresh_token: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TokenData {
    pub refresh_token: String,
    pub token: String,
}

impl From<TokenPair> for TokenData {
    fn from(pair: TokenPair) -> Self {
        Self {
            refresh_token: pair.refresh_token,
            token: pair.session_token,
        }
    }
}

/// Log in with username and password and receive a token pair
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<Envelope<TokenData>>> {
    let Json(req) = body.map_err(|e| {
        tracing::debug!(error = %e, "Rejected login body");
        ApiError::BadRequest("Invalid request".to_string())
    })?;

    if req.username.is_empty() || req.password.is_empty() {
        return Err(ApiError::BadRequest("Invalid request".to_string()));
    }

    let verified = state
        .credentials
        .verify(&req.username, &req.password)
        .await
        .map_err(|e| match e {
            CredentialError::Database(err) => ApiError::from(err),
            CredentialError::Password(err) => {
                tracing::error!(username = %req.username, error = %err, "Stored password hash is unusable");
                ApiError::Internal
            }
        })?;

    if !verified {
        tracing::info!(username = %req.username, "Login failed");
        return Err(ApiError::InvalidCredentials);
    }

    let pair = state.sessions.login(&req.username).map_err(|e| {
        tracing::error!(error = %e, "Failed to issue tokens");
        ApiError::Internal
    })?;

    tracing::info!(username = %req.username, "Login succeeded");

    Ok(Envelope::success(pair.into()))
}

/// Exchange a refresh token for a new token pair
pub async fn refresh(
    State(state): State<AppState>,
    Query(query): Query<RefreshQuery>,
) -> ApiResult<Json<Envelope<TokenData>>> {
    let refresh_token = query
        .refresh_token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::BadRequest("refresh_token is required".to_string()))?;

    let pair = state.sessions.refresh(&refresh_token).map_err(|e| match e {
        RefreshError::Rejected => ApiError::Unauthorized,
        RefreshError::Issue(err) => {
            tracing::error!(error = %err, "Failed to issue refreshed tokens");
            ApiError::Internal
        }
    })?;

    Ok(Envelope::success(pair.into()))
}
