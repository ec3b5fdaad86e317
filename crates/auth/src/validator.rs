//! Token validation

use std::sync::Arc;

use crate::claims::Identity;
use crate::clock::Clock;
use crate::codec;
use crate::error::{AuthError, AuthResult};
use crate::keys::SigningKey;

/// Verifies incoming tokens and recovers the identity they carry.
#[derive(Clone)]
pub struct TokenValidator {
    key: Arc<SigningKey>,
    clock: Arc<dyn Clock>,
    leeway_secs: i64,
}

impl TokenValidator {
    pub fn new(key: Arc<SigningKey>, clock: Arc<dyn Clock>) -> Self {
        Self {
            key,
            clock,
            leeway_secs: 0,
        }
    }

    /// Accept tokens up to `secs` seconds past their expiry.
    pub fn with_leeway(mut self, secs: u32) -> Self {
        self.leeway_secs = i64::from(secs);
        self
    }

    /// Decode, then check expiry, then check the subject. The first failing
    /// step wins.
    pub fn validate(&self, token: &str) -> AuthResult<Identity> {
        let claims = codec::decode(token, &self.key)?;

        let now = self.clock.now().unix_timestamp();
        if now >= claims.exp.saturating_add(self.leeway_secs) {
            return Err(AuthError::TokenExpired);
        }

        match claims.sub {
            Some(subject) if !subject.is_empty() => Ok(Identity { subject }),
            _ => Err(AuthError::MissingSubject),
        }
    }
}
