//! Authentication for the storefront API

pub mod credentials;
pub mod middleware;
pub mod password;

pub use credentials::{CredentialError, CredentialStore, InMemoryCredentialStore, PgCredentialStore};
pub use middleware::{require_auth, AuthState, AuthUser};
pub use password::{hash_password, verify_password, PasswordError};
