//! Password hashing with Argon2

use std::sync::OnceLock;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Hash a password using Argon2id
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::Hashing(e.to_string()))
}

/// Check a password against a stored PHC-format hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed =
        PasswordHash::new(hash).map_err(|e| PasswordError::InvalidHash(e.to_string()))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Hash checked when the account does not exist, so a miss costs the same
/// Argon2 work as a wrong password.
static UNKNOWN_USER_HASH: OnceLock<String> = OnceLock::new();

fn unknown_user_hash() -> Result<&'static str, PasswordError> {
    if let Some(hash) = UNKNOWN_USER_HASH.get() {
        return Ok(hash);
    }
    let hash = hash_password("unknown-user-placeholder")?;
    Ok(UNKNOWN_USER_HASH.get_or_init(|| hash))
}

/// Check a password against the stored hash of a looked-up account.
///
/// `None` means no such account: the password is still run through Argon2
/// and the result is always `false`.
pub fn verify_stored_password(password: &str, stored: Option<&str>) -> Result<bool, PasswordError> {
    match stored {
        Some(hash) => verify_password(password, hash),
        None => {
            let _ = verify_password(password, unknown_user_hash()?)?;
            Ok(false)
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    Hashing(String),
    #[error("Invalid password hash: {0}")]
    InvalidHash(String),
}
