//! Request-time bearer authorization

use crate::claims::Identity;
use crate::error::{AuthError, AuthResult};
use crate::validator::TokenValidator;

const BEARER_PREFIX: &str = "Bearer ";

/// Why a request was turned away.
///
/// Header problems are reported as such. Anything wrong with the token itself
/// collapses into `Unauthorized` so callers cannot tell an expired token from
/// a forged one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("Missing authorization header")]
    MissingHeader,
    #[error("Malformed authorization scheme")]
    MalformedScheme,
    #[error("Unauthorized")]
    Unauthorized,
}

/// Pull the token out of an `Authorization` header value.
///
/// The scheme must be exactly `Bearer ` (case-sensitive, one space).
pub fn extract_bearer(header: Option<&str>) -> AuthResult<&str> {
    let header = match header {
        Some(h) if !h.is_empty() => h,
        _ => return Err(AuthError::MissingHeader),
    };

    header
        .strip_prefix(BEARER_PREFIX)
        .ok_or(AuthError::MalformedScheme)
}

/// Gate run before every protected handler.
#[derive(Clone)]
pub struct AuthorizationGate {
    validator: TokenValidator,
}

impl AuthorizationGate {
    pub fn new(validator: TokenValidator) -> Self {
        Self { validator }
    }

    pub fn authorize(&self, header: Option<&str>) -> Result<Identity, Rejection> {
        let token = extract_bearer(header).map_err(|e| match e {
            AuthError::MissingHeader => Rejection::MissingHeader,
            _ => Rejection::MalformedScheme,
        })?;

        self.validator.validate(token).map_err(|e| {
            tracing::debug!(reason = %e, "Bearer token rejected");
            Rejection::Unauthorized
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::issuer::{TokenIssuer, TokenLifetimes};
    use crate::keys::SigningKey;
    use std::sync::Arc;
    use time::{Duration, OffsetDateTime};

    fn setup() -> (AuthorizationGate, TokenIssuer, Arc<ManualClock>, OffsetDateTime) {
        let t0 = OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap();
        let key = Arc::new(SigningKey::from_secret("test-secret-key-at-least-32-chars!"));
        let clock = Arc::new(ManualClock::new(t0));
        let issuer = TokenIssuer::new(key.clone(), clock.clone(), TokenLifetimes::default());
        let gate = AuthorizationGate::new(TokenValidator::new(key, clock.clone()));
        (gate, issuer, clock, t0)
    }

    #[test]
    fn test_extract_bearer() {
        assert_eq!(extract_bearer(Some("Bearer abc.def.ghi")), Ok("abc.def.ghi"));
        assert_eq!(extract_bearer(Some("Bearer ")), Ok(""));
        assert_eq!(extract_bearer(None), Err(AuthError::MissingHeader));
        assert_eq!(extract_bearer(Some("")), Err(AuthError::MissingHeader));
    }

    #[test]
    fn test_short_or_wrong_scheme_never_panics() {
        for header in ["Bearer", "B", "Beare", "bearer abc", "BEARER abc", "Bearer\tabc", "Basic dXNlcg==", "Token abc", "Beerer abc"] {
            assert_eq!(
                extract_bearer(Some(header)),
                Err(AuthError::MalformedScheme),
                "header {:?}",
                header
            );
        }
    }

    #[test]
    fn test_valid_bearer_yields_identity() {
        let (gate, issuer, _, _) = setup();
        let token = issuer.issue_session_token("alice").unwrap();

        let header = format!("Bearer {}", token);
        assert_eq!(gate.authorize(Some(&header)), Ok(Identity::new("alice")));
    }

    #[test]
    fn test_misspelled_scheme_rejected_before_validation() {
        let (gate, issuer, _, _) = setup();
        let token = issuer.issue_session_token("alice").unwrap();

        // The token is valid, so only the scheme check can produce this.
        let header = format!("Beerer {}", token);
        assert_eq!(gate.authorize(Some(&header)), Err(Rejection::MalformedScheme));
    }

    #[test]
    fn test_empty_and_bare_scheme_headers() {
        let (gate, _, _, _) = setup();
        assert_eq!(gate.authorize(None), Err(Rejection::MissingHeader));
        assert_eq!(gate.authorize(Some("")), Err(Rejection::MissingHeader));
        assert_eq!(gate.authorize(Some("Bearer")), Err(Rejection::MalformedScheme));
    }

    #[test]
    fn test_token_failures_are_indistinguishable() {
        let (gate, issuer, clock, t0) = setup();
        let token = issuer.issue_session_token("alice").unwrap();
        let mut tampered = token.clone();
        tampered.push('x');

        let foreign = TokenIssuer::new(
            Arc::new(SigningKey::from_secret("another-secret-another-secret-!!")),
            clock.clone(),
            TokenLifetimes::default(),
        )
        .issue_session_token("alice")
        .unwrap();

        let bad_signature = gate.authorize(Some(&format!("Bearer {}", foreign)));
        let malformed = gate.authorize(Some("Bearer not-a-token"));
        let empty = gate.authorize(Some("Bearer "));
        let altered = gate.authorize(Some(&format!("Bearer {}", tampered)));

        clock.set(t0 + Duration::hours(3));
        let expired = gate.authorize(Some(&format!("Bearer {}", token)));

        for result in [bad_signature, malformed, empty, altered, expired] {
            assert_eq!(result, Err(Rejection::Unauthorized));
        }
    }
}
