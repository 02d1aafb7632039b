//! Route definitions for the Bazaar HTTP API.
//!
//! All routes are mounted under `/api`. Gates are attached per route group
//! with `route_layer`; the last layer added runs first, so `protect` is
//! always added after the gates that depend on the identity it attaches.

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, patch, post},
};

use bazaar_auth::RoleGate;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the API router with all routes and gates.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(public_auth_routes())
        .merge(protected_auth_routes(&state))
        .merge(session_routes(&state))
        .merge(admin_routes(&state))
        .merge(premium_routes(&state))
        .merge(health_routes());

    Router::new().nest("/api", api_routes).with_state(state)
}

/// Signup, login, logout: no gate.
fn public_auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(handlers::auth::signup))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/logout", get(handlers::auth::logout))
}

/// Endpoints that require a valid session.
fn protected_auth_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route("/auth/update-password", patch(handlers::auth::update_password))
        .route("/auth/me", get(handlers::auth::me))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::protect,
        ))
}

/// Soft-login check.
fn session_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/auth/session", get(handlers::auth::session))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::is_logged_in,
        ))
}

/// Account administration, admin only.
fn admin_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/users/{id}/deactivate", patch(handlers::users::deactivate))
        .route("/users/{id}/activate", patch(handlers::users::activate))
        .route_layer(axum_middleware::from_fn_with_state(
            RoleGate::admin_only(),
            middleware::restrict_to,
        ))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::protect,
        ))
}

/// Premium tier endpoints.
fn premium_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/premium/status", get(handlers::premium::status))
        .route_layer(axum_middleware::from_fn(middleware::require_premium))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::protect,
        ))
}

/// Liveness check.
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
