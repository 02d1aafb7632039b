//! # bazaar-core
//!
//! Core crate for the Bazaar marketplace API. Contains configuration
//! schemas, the unified error system, and small shared helpers.
//!
//! This crate has **no** internal dependencies on other Bazaar crates.

pub mod config;
pub mod duration;
pub mod error;
pub mod result;

pub use error::AppError;
pub use result::AppResult;
