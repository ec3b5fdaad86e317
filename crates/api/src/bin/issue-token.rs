//! Token minting utility for the storefront services
//!
//! Signs a session/refresh pair for a username with the deployment's
//! `JWT_SECRET`, without going through the login route. Useful for smoke
//! testing protected routes.
//!
//! Usage:
//!   cargo run --bin issue-token -- alice
//!
//! Reads `JWT_SECRET`, `SESSION_TTL_SECS` and `REFRESH_TTL_SECS` from the
//! environment (or `.env`).

use std::sync::Arc;

use storefront_api::config::{jwt_secret_from_env, ttl_secs_from_env};
use storefront_auth::{SessionManager, SigningKey, TokenLifetimes};
use time::Duration;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let Some(username) = std::env::args().nth(1) else {
        eprintln!("Usage: issue-token <username>");
        std::process::exit(2);
    };

    let secret = jwt_secret_from_env()?;
    let (session_secs, refresh_secs) = ttl_secs_from_env()?;
    let lifetimes = TokenLifetimes {
        session_ttl: Duration::seconds(session_secs),
        refresh_ttl: Duration::seconds(refresh_secs),
    };

    let sessions = SessionManager::new(Arc::new(SigningKey::from_secret(secret)), lifetimes, 0);
    let pair = sessions.login(&username)?;

    println!("{}", serde_json::to_string_pretty(&pair)?);

    Ok(())
}
