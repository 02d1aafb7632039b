//! Session flows built on the credential store and the token issuer.

pub mod auth;

pub use auth::{AuthService, AuthSession, SignupInput};
