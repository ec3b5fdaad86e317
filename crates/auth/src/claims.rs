//! Claim set and authenticated identity

use serde::{Deserialize, Serialize};

/// The signed payload of a session or refresh token.
///
/// `sub` is optional on the wire so a token without it still decodes and the
/// validator can reject it as [`MissingSubject`](crate::AuthError::MissingSubject)
/// rather than as a parse failure. `exp` is required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (username)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// Expiration, unix seconds
    pub exp: i64,
}

impl Claims {
    pub fn new(subject: impl Into<String>, expires_at: i64) -> Self {
        Self {
            sub: Some(subject.into()),
            exp: expires_at,
        }
    }
}

/// The principal recovered from a valid token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity {
    pub subject: String,
}

impl Identity {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
        }
    }
}
