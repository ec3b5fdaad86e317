//! Bearer authentication middleware

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use storefront_auth::{Rejection, SessionManager};

use crate::error::ApiError;

/// State handed to [`require_auth`]
#[derive(Clone)]
pub struct AuthState {
    pub sessions: Arc<SessionManager>,
}

/// The authenticated caller, placed in request extensions by [`require_auth`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub username: String,
}

/// Reject the request unless it carries a valid `Authorization: Bearer` token.
///
/// Every rejection renders the same 401 body.
pub async fn require_auth(
    State(auth): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = match request.headers().get(AUTHORIZATION) {
        Some(value) => Some(value.to_str().map_err(|_| {
            tracing::debug!(rejection = %Rejection::MalformedScheme, "Authorization header is not ASCII");
            ApiError::Unauthorized
        })?),
        None => None,
    };

    let identity = auth.sessions.authorize(header).map_err(|rejection| {
        tracing::debug!(rejection = %rejection, path = %request.uri().path(), "Request rejected");
        ApiError::Unauthorized
    })?;

    request.extensions_mut().insert(AuthUser {
        username: identity.subject,
    });

    Ok(next.run(request).await)
}
