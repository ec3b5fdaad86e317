//! Storefront API Library
//!
//! The user-facing token service: login, token refresh and the bearer
//! middleware the other storefront routes sit behind.

pub mod auth;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::{Config, LogFormat};
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
