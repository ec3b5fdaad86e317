//! Shared application state

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use storefront_auth::{SessionManager, SigningKey};

use crate::auth::{AuthState, CredentialStore, PgCredentialStore};
use crate::config::Config;

/// State cloned into every handler
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionManager>,
    pub credentials: Arc<dyn CredentialStore>,
}

impl AppState {
    /// Build production state: the signing key is loaded once here and every
    /// component shares it.
    pub fn from_config(config: &Config) -> Result<Self, sqlx::Error> {
        let key = Arc::new(SigningKey::from_secret(&config.jwt_secret));
        let sessions = SessionManager::new(key, config.token_lifetimes(), config.token_leeway_secs);

        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .connect_lazy(&config.database_url)?;

        Ok(Self::new(sessions, Arc::new(PgCredentialStore::new(pool))))
    }

    pub fn new(sessions: SessionManager, credentials: Arc<dyn CredentialStore>) -> Self {
        Self {
            sessions: Arc::new(sessions),
            credentials,
        }
    }

    pub fn auth_state(&self) -> AuthState {
        AuthState {
            sessions: self.sessions.clone(),
        }
    }
}
