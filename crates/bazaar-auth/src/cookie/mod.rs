//! Session cookie policy.

pub mod origin;
pub mod policy;

pub use policy::{CookieOptions, CookiePolicy, SiteMode};
