//! Axum middleware stack.

pub mod auth;
pub mod cors;
pub mod logging;
pub mod rbac;

pub use auth::{is_logged_in, protect};
pub use rbac::{require_premium, restrict_to};
