//! One place to build every auth component from the same key and clock

use std::sync::Arc;

use crate::claims::Identity;
use crate::clock::{Clock, SystemClock};
use crate::error::AuthResult;
use crate::gate::{AuthorizationGate, Rejection};
use crate::issuer::{TokenIssuer, TokenLifetimes, TokenPair};
use crate::keys::SigningKey;
use crate::refresh::{RefreshError, RefreshExchange};
use crate::validator::TokenValidator;

/// Session manager shared by every service.
///
/// Holding the issuer, validator, gate and refresh exchange together means a
/// service cannot end up with a validator built from a different key than the
/// issuer, or one that skips a check.
#[derive(Clone)]
pub struct SessionManager {
    issuer: TokenIssuer,
    validator: TokenValidator,
    gate: AuthorizationGate,
    exchange: RefreshExchange,
}

impl SessionManager {
    /// Create a session manager on the wall clock
    pub fn new(key: Arc<SigningKey>, lifetimes: TokenLifetimes, leeway_secs: u32) -> Self {
        Self::with_clock(key, lifetimes, leeway_secs, Arc::new(SystemClock))
    }

    pub fn with_clock(
        key: Arc<SigningKey>,
        lifetimes: TokenLifetimes,
        leeway_secs: u32,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let issuer = TokenIssuer::new(key.clone(), clock.clone(), lifetimes);
        let validator = TokenValidator::new(key, clock).with_leeway(leeway_secs);

        Self {
            gate: AuthorizationGate::new(validator.clone()),
            exchange: RefreshExchange::new(validator.clone(), issuer.clone()),
            issuer,
            validator,
        }
    }

    /// Issue a session/refresh pair after the caller has checked credentials
    pub fn login(&self, subject: &str) -> AuthResult<TokenPair> {
        self.issuer.issue_pair(subject)
    }

    pub fn validate(&self, token: &str) -> AuthResult<Identity> {
        self.validator.validate(token)
    }

    pub fn authorize(&self, header: Option<&str>) -> Result<Identity, Rejection> {
        self.gate.authorize(header)
    }

    pub fn refresh(&self, refresh_token: &str) -> Result<TokenPair, RefreshError> {
        self.exchange.refresh(refresh_token)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::error::AuthError;
    use time::{Duration, OffsetDateTime};

    #[test]
    fn test_login_authorize_refresh_flow() {
        let t0 = OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap();
        let clock = Arc::new(ManualClock::new(t0));
        let manager = SessionManager::with_clock(
            Arc::new(SigningKey::from_secret("test-secret-key-at-least-32-chars!")),
            TokenLifetimes {
                session_ttl: Duration::hours(2),
                refresh_ttl: Duration::hours(24),
            },
            0,
            clock.clone(),
        );

        let pair = manager.login("alice").unwrap();
        assert_eq!(pair.expires_in, 7200);

        let header = format!("Bearer {}", pair.session_token);
        assert_eq!(manager.authorize(Some(&header)).unwrap().subject, "alice");

        clock.set(t0 + Duration::hours(3));
        assert_eq!(manager.authorize(Some(&header)), Err(Rejection::Unauthorized));
        assert_eq!(manager.validate(&pair.session_token), Err(AuthError::TokenExpired));

        let renewed = manager.refresh(&pair.refresh_token).unwrap();
        let header = format!("Bearer {}", renewed.session_token);
        assert_eq!(manager.authorize(Some(&header)).unwrap().subject, "alice");
    }

    #[test]
    fn test_leeway_applies_to_gate_and_refresh() {
        let t0 = OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap();
        let clock = Arc::new(ManualClock::new(t0));
        let manager = SessionManager::with_clock(
            Arc::new(SigningKey::from_secret("test-secret-key-at-least-32-chars!")),
            TokenLifetimes::uniform(Duration::minutes(5)),
            60,
            clock.clone(),
        );
        let pair = manager.login("alice").unwrap();

        clock.set(t0 + Duration::minutes(5) + Duration::seconds(30));
        let header = format!("Bearer {}", pair.session_token);
        assert!(manager.authorize(Some(&header)).is_ok());
        assert!(manager.refresh(&pair.refresh_token).is_ok());
    }

    #[test]
    fn test_oversized_ttl_fails_login_without_panicking() {
        let manager = SessionManager::new(
            Arc::new(SigningKey::from_secret("test-secret-key-at-least-32-chars!")),
            TokenLifetimes::uniform(Duration::seconds(300_000_000_000)),
            0,
        );
        assert_eq!(manager.login("alice"), Err(AuthError::ExpiryOutOfRange));
    }
}
