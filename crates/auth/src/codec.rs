//! Compact HS256 token encoding and decoding
//!
//! Tokens are standard compact JWS strings: `header.payload.signature`, each
//! segment base64url without padding, signed with HMAC-SHA256. Signing and
//! signature verification go through `jsonwebtoken`. Expiry is
//! not checked here; the validator owns it so the injected clock decides.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use jsonwebtoken::{Algorithm, Header, Validation};
use serde::Deserialize;

use crate::claims::Claims;
use crate::error::{AuthError, AuthResult};
use crate::keys::SigningKey;

/// The one algorithm this system signs with and accepts.
pub const ALGORITHM: Algorithm = Algorithm::HS256;
const ALGORITHM_NAME: &str = "HS256";

#[derive(Deserialize)]
struct RawHeader {
    alg: String,
}

/// Sign a claim set. Output is deterministic for a given (claims, key).
pub fn encode(claims: &Claims, key: &SigningKey) -> AuthResult<String> {
    jsonwebtoken::encode(&Header::new(ALGORITHM), claims, key.encoding())
        .map_err(|e| AuthError::Encoding(e.to_string()))
}

/// Verify a token's structure, algorithm and signature and return its claims.
pub fn decode(token: &str, key: &SigningKey) -> AuthResult<Claims> {
    let alg = header_algorithm(token)?;
    if alg != ALGORITHM_NAME {
        return Err(AuthError::UnsupportedAlgorithm(alg));
    }

    jsonwebtoken::decode::<Claims>(token, key.decoding(), &signature_only())
        .map(|data| data.claims)
        .map_err(AuthError::from)
}

/// Read the `alg` a token claims without trusting it.
fn header_algorithm(token: &str) -> AuthResult<String> {
    let mut segments = token.split('.');
    let (Some(header), Some(_payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(AuthError::MalformedToken);
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(header)
        .map_err(|_| AuthError::MalformedToken)?;
    let raw: RawHeader = serde_json::from_slice(&bytes).map_err(|_| AuthError::MalformedToken)?;

    Ok(raw.alg)
}

fn signature_only() -> Validation {
    let mut validation = Validation::new(ALGORITHM);
    validation.validate_exp = false;
    validation.validate_nbf = false;
    validation.validate_aud = false;
    validation.leeway = 0;
    validation.required_spec_claims.clear();
    validation
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use hmac::{Hmac, Mac};
    use sha2::Sha256;

    const SECRET: &str = "test-secret-key-at-least-32-chars!";

    fn b64(bytes: &[u8]) -> String {
        URL_SAFE_NO_PAD.encode(bytes)
    }

    /// Build a compact token by hand so the codec can be checked against it.
    fn sign_raw(header: &str, payload: &str, secret: &str) -> String {
        let signing_input = format!("{}.{}", b64(header.as_bytes()), b64(payload.as_bytes()));
        let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(signing_input.as_bytes());
        let signature = mac.finalize().into_bytes();
        format!("{}.{}", signing_input, b64(&signature))
    }

    #[test]
    fn test_encode_matches_hand_computed_hs256() {
        let key = SigningKey::from_secret(SECRET);
        let claims = Claims::new("alice", 1_700_007_200);

        let token = encode(&claims, &key).unwrap();
        let expected = sign_raw(
            r#"{"typ":"JWT","alg":"HS256"}"#,
            r#"{"sub":"alice","exp":1700007200}"#,
            SECRET,
        );

        assert_eq!(token, expected);
    }

    #[test]
    fn test_decode_accepts_externally_signed_token() {
        let key = SigningKey::from_secret(SECRET);
        let token = sign_raw(
            r#"{"alg":"HS256","typ":"JWT"}"#,
            r#"{"sub":"bob","exp":42,"iat":1}"#,
            SECRET,
        );

        let claims = decode(&token, &key).unwrap();
        assert_eq!(claims, Claims::new("bob", 42));
    }

    #[test]
    fn test_encode_is_deterministic() {
        let key = SigningKey::from_secret(SECRET);
        let claims = Claims::new("alice", 1_700_000_000);
        assert_eq!(encode(&claims, &key).unwrap(), encode(&claims, &key).unwrap());
    }

    #[test]
    fn test_decode_ignores_expiry() {
        let key = SigningKey::from_secret(SECRET);
        let token = encode(&Claims::new("alice", 1), &key).unwrap();
        assert_eq!(decode(&token, &key).unwrap().exp, 1);
    }

    #[test]
    fn test_wrong_segment_count_is_malformed() {
        let key = SigningKey::from_secret(SECRET);
        for token in ["", "abc", "a.b", "a.b.c.d", "..."] {
            assert_eq!(
                decode(token, &key),
                Err(AuthError::MalformedToken),
                "token {:?}",
                token
            );
        }
    }

    #[test]
    fn test_garbage_header_is_malformed() {
        let key = SigningKey::from_secret(SECRET);
        assert_eq!(decode("!!!.e30.sig", &key), Err(AuthError::MalformedToken));

        let not_json = format!("{}.e30.sig", b64(b"not json"));
        assert_eq!(decode(&not_json, &key), Err(AuthError::MalformedToken));

        let no_alg = format!("{}.e30.sig", b64(br#"{"typ":"JWT"}"#));
        assert_eq!(decode(&no_alg, &key), Err(AuthError::MalformedToken));
    }

    #[test]
    fn test_none_algorithm_is_rejected() {
        let key = SigningKey::from_secret(SECRET);
        for alg in ["none", "None", "nOnE"] {
            let header = format!(r#"{{"alg":"{}","typ":"JWT"}}"#, alg);
            let token = format!(
                "{}.{}.",
                b64(header.as_bytes()),
                b64(br#"{"sub":"admin","exp":9999999999}"#)
            );
            assert_eq!(
                decode(&token, &key),
                Err(AuthError::UnsupportedAlgorithm(alg.to_string()))
            );
        }
    }

    #[test]
    fn test_other_hmac_algorithm_is_rejected_even_when_correctly_signed() {
        use sha2::Sha512;

        let key = SigningKey::from_secret(SECRET);
        let signing_input = format!(
            "{}.{}",
            b64(br#"{"alg":"HS512","typ":"JWT"}"#),
            b64(br#"{"sub":"alice","exp":9999999999}"#)
        );
        let mut mac = Hmac::<Sha512>::new_from_slice(SECRET.as_bytes()).unwrap();
        mac.update(signing_input.as_bytes());
        let token = format!("{}.{}", signing_input, b64(&mac.finalize().into_bytes()));

        assert_eq!(
            decode(&token, &key),
            Err(AuthError::UnsupportedAlgorithm("HS512".to_string()))
        );
    }

    #[test]
    fn test_wrong_key_is_signature_mismatch() {
        let k1 = SigningKey::from_secret("key-one-key-one-key-one-key-one!");
        let k2 = SigningKey::from_secret("key-two-key-two-key-two-key-two!");
        let token = encode(&Claims::new("alice", 9_999_999_999), &k1).unwrap();

        assert_eq!(decode(&token, &k2), Err(AuthError::SignatureMismatch));
    }

    #[test]
    fn test_missing_exp_is_malformed() {
        let key = SigningKey::from_secret(SECRET);
        let token = sign_raw(r#"{"alg":"HS256","typ":"JWT"}"#, r#"{"sub":"alice"}"#, SECRET);
        assert_eq!(decode(&token, &key), Err(AuthError::MalformedToken));
    }

    #[test]
    fn test_missing_sub_still_decodes() {
        let key = SigningKey::from_secret(SECRET);
        let token = sign_raw(r#"{"alg":"HS256","typ":"JWT"}"#, r#"{"exp":42}"#, SECRET);
        assert_eq!(decode(&token, &key).unwrap().sub, None);
    }
}
