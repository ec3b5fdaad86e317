//! Exchanging a refresh token for a new session pair
//!
//! Refresh tokens are not rotated: the presented token stays valid until its
//! own `exp`. There is no store to revoke it in.

use crate::error::AuthError;
use crate::issuer::{TokenIssuer, TokenPair};
use crate::validator::TokenValidator;

#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    /// The refresh token failed validation. The reason is not exposed.
    #[error("Refresh token rejected")]
    Rejected,
    #[error("Failed to issue replacement tokens: {0}")]
    Issue(#[source] AuthError),
}

#[derive(Clone)]
pub struct RefreshExchange {
    validator: TokenValidator,
    issuer: TokenIssuer,
}

impl RefreshExchange {
    pub fn new(validator: TokenValidator, issuer: TokenIssuer) -> Self {
        Self { validator, issuer }
    }

    pub fn refresh(&self, refresh_token: &str) -> Result<TokenPair, RefreshError> {
        let identity = self.validator.validate(refresh_token).map_err(|e| {
            tracing::debug!(reason = %e, "Refresh token rejected");
            RefreshError::Rejected
        })?;

        let pair = self
            .issuer
            .issue_pair(&identity.subject)
            .map_err(RefreshError::Issue)?;

        tracing::info!(subject = %identity.subject, "Session refreshed");

        Ok(pair)
    }
}
