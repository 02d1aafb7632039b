//! Token extraction and request authentication.

pub mod extract;
pub mod gate;

pub use extract::{bearer_token, cookie_token, extract_token};
pub use gate::AuthGuard;
