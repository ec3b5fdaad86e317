//! The shared HMAC signing secret

use std::fmt;

use jsonwebtoken::{DecodingKey, EncodingKey};

/// Symmetric key used to sign and verify every token.
///
/// Built once at startup and shared behind an `Arc`. It is never mutated, so
/// concurrent requests read it without synchronization. Every issuer and
/// validator in the deployment must be handed the same secret.
#[derive(Clone)]
pub struct SigningKey {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SigningKey {
    pub fn from_secret(secret: impl AsRef<[u8]>) -> Self {
        let secret = secret.as_ref();
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }

    pub(crate) fn encoding(&self) -> &EncodingKey {
        &self.encoding
    }

    pub(crate) fn decoding(&self) -> &DecodingKey {
        &self.decoding
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SigningKey([REDACTED])")
    }
}
