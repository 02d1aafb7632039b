//! # bazaar-entity
//!
//! Domain entity models for the Bazaar marketplace. Only the identity
//! record lives here; content entities belong to the resource services.

pub mod user;
