//! Storefront session authentication
//!
//! Stateless bearer tokens for the storefront services: HS256-signed compact
//! tokens carrying a username (`sub`) and an expiry (`exp`). Login issues a
//! session/refresh pair, every protected request passes the
//! [`AuthorizationGate`], and a refresh token can be exchanged for a new pair.
//!
//! Nothing is stored server side. A token is valid exactly when its signature
//! checks out against the shared [`SigningKey`] and it has not expired.

pub mod claims;
pub mod clock;
pub mod codec;
pub mod error;
pub mod gate;
pub mod issuer;
pub mod keys;
pub mod manager;
pub mod refresh;
pub mod validator;

pub use claims::{Claims, Identity};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{AuthError, AuthResult};
pub use gate::{extract_bearer, AuthorizationGate, Rejection};
pub use issuer::{TokenIssuer, TokenLifetimes, TokenPair};
pub use keys::SigningKey;
pub use manager::SessionManager;
pub use refresh::{RefreshError, RefreshExchange};
pub use validator::TokenValidator;
