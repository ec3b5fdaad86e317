//! Routes about the signed-in user

use axum::{Extension, Json};
use serde::Serialize;

use crate::{auth::AuthUser, error::Envelope};

#[derive(Debug, Serialize)]
pub struct UserData {
    pub user: UserResponse,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub username: String,
}

/// Who the bearer token belongs to
pub async fn me(Extension(user): Extension<AuthUser>) -> Json<Envelope<UserData>> {
    Envelope::success(UserData {
        user: UserResponse {
            username: user.username,
        },
    })
}
