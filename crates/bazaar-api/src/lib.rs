//! # bazaar-api
//!
//! HTTP API layer for Bazaar built on Axum.
//!
//! Provides the session endpoints, the auth/role/premium middleware chain,
//! extractors for the resolved identity, DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use state::AppState;
