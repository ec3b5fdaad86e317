//! Username/password lookup used at login
//!
//! - Postgres: the `users` table shared with the registration service
//! - In-memory: fixed accounts for tests and local runs

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;

use super::password::{hash_password, verify_stored_password, PasswordError};

#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Password(#[from] PasswordError),
}

/// Checks a username/password pair.
///
/// Returns `Ok(false)` for both an unknown user and a wrong password, after
/// the same amount of hashing work.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn verify(&self, username: &str, password: &str) -> Result<bool, CredentialError>;
}

/// Credentials in the `users` table (`username`, `password_hash`).
#[derive(Clone)]
pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn verify(&self, username: &str, password: &str) -> Result<bool, CredentialError> {
        let hash: Option<String> =
            sqlx::query_scalar("SELECT password_hash FROM users WHERE username = $1")
                .bind(username)
                .fetch_optional(&self.pool)
                .await?;

        Ok(verify_stored_password(password, hash.as_deref())?)
    }
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryCredentialStore {
    users: HashMap<String, String>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, username: &str, password: &str) -> Result<Self, PasswordError> {
        self.users
            .insert(username.to_string(), hash_password(password)?);
        Ok(self)
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn verify(&self, username: &str, password: &str) -> Result<bool, CredentialError> {
        let hash = self.users.get(username).map(String::as_str);
        Ok(verify_stored_password(password, hash)?)
    }
}
