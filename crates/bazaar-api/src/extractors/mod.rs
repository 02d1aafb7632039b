//! Custom Axum extractors.

pub mod auth;
pub mod validated;

pub use auth::{CurrentUser, MaybeUser};
pub use validated::{JsonBody, ValidatedJson};
