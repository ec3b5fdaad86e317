//! Error types for token handling

/// Every way a credential can fail inside the core.
///
/// These kinds are precise so the validator can be tested exactly. Nothing
/// outside this crate should show them to a client; see [`Rejection`].
///
/// [`Rejection`]: crate::gate::Rejection
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Malformed token")]
    MalformedToken,
    #[error("Unsupported token algorithm: {0}")]
    UnsupportedAlgorithm(String),
    #[error("Token signature mismatch")]
    SignatureMismatch,
    #[error("Token has expired")]
    TokenExpired,
    #[error("Token has no subject")]
    MissingSubject,
    #[error("Missing authorization header")]
    MissingHeader,
    #[error("Malformed authorization scheme")]
    MalformedScheme,
    #[error("Token expiry is out of range")]
    ExpiryOutOfRange,
    #[error("Token encoding failed: {0}")]
    Encoding(String),
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::InvalidSignature => AuthError::SignatureMismatch,
            ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
                AuthError::UnsupportedAlgorithm(err.to_string())
            }
            ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::MalformedToken,
        }
    }
}

/// Result type alias for core operations
pub type AuthResult<T> = Result<T, AuthError>;
