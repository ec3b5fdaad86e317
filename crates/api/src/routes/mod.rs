//! API routes

pub mod auth;
pub mod health;
pub mod users;

use axum::{middleware, routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::{auth::require_auth, state::AppState};

/// Create all API routes
pub fn create_router(state: AppState) -> Router {
    let auth_state = state.auth_state();

    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness));

    // Existing clients send credentials on GET; POST is accepted as well.
    let public_routes = Router::new()
        .route("/user/token", get(auth::login).post(auth::login))
        .route("/user/token/refresh", get(auth::refresh));

    let protected_routes = Router::new()
        .route("/user/me", get(users::me))
        .route_layer(middleware::from_fn_with_state(auth_state, require_auth));

    Router::new()
        .merge(health_routes)
        .merge(public_routes)
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
