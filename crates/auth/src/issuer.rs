//! Session and refresh token issuance

use std::sync::Arc;

use serde::Serialize;
use time::Duration;

use crate::claims::Claims;
use crate::clock::Clock;
use crate::codec;
use crate::error::{AuthError, AuthResult};
use crate::keys::SigningKey;

/// Validity windows for issued tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenLifetimes {
    pub session_ttl: Duration,
    pub refresh_ttl: Duration,
}

impl TokenLifetimes {
    /// Session and refresh tokens that both live for `ttl`.
    pub fn uniform(ttl: Duration) -> Self {
        Self {
            session_ttl: ttl,
            refresh_ttl: ttl,
        }
    }
}

impl Default for TokenLifetimes {
    fn default() -> Self {
        Self::uniform(Duration::hours(2))
    }
}

/// A freshly minted session/refresh pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenPair {
    pub session_token: String,
    pub refresh_token: String,
    /// Session token lifetime in seconds
    pub expires_in: i64,
}

/// Builds signed tokens for an already authenticated subject.
#[derive(Clone)]
pub struct TokenIssuer {
    key: Arc<SigningKey>,
    clock: Arc<dyn Clock>,
    lifetimes: TokenLifetimes,
}

impl TokenIssuer {
    pub fn new(key: Arc<SigningKey>, clock: Arc<dyn Clock>, lifetimes: TokenLifetimes) -> Self {
        Self {
            key,
            clock,
            lifetimes,
        }
    }

    pub fn issue_session_token(&self, subject: &str) -> AuthResult<String> {
        self.issue(subject, self.lifetimes.session_ttl)
    }

    pub fn issue_refresh_token(&self, subject: &str) -> AuthResult<String> {
        self.issue(subject, self.lifetimes.refresh_ttl)
    }

    pub fn issue_pair(&self, subject: &str) -> AuthResult<TokenPair> {
        let session_token = self.issue_session_token(subject)?;
        let refresh_token = self.issue_refresh_token(subject)?;

        tracing::debug!(subject = %subject, "Issued session token pair");

        Ok(TokenPair {
            session_token,
            refresh_token,
            expires_in: self.lifetimes.session_ttl.whole_seconds(),
        })
    }

    fn issue(&self, subject: &str, ttl: Duration) -> AuthResult<String> {
        if subject.is_empty() {
            return Err(AuthError::MissingSubject);
        }

        let expires_at = self
            .clock
            .now()
            .checked_add(ttl)
            .ok_or(AuthError::ExpiryOutOfRange)?;
        let claims = Claims::new(subject, expires_at.unix_timestamp());
        codec::encode(&claims, &self.key)
    }
}
