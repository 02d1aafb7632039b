//! Session token encoding, decoding, and claims.

pub mod claims;
pub mod decoder;
pub mod encoder;

pub use claims::Claims;
pub use decoder::{DecodeError, JwtDecoder};
pub use encoder::{IssuedToken, JwtEncoder};

use bazaar_core::config::AuthConfig;
use bazaar_core::error::AppError;

/// Returns the configured signing secret, or a configuration error when it
/// is absent or blank.
fn signing_secret(config: &AuthConfig) -> Result<&str, AppError> {
    match config.jwt_secret.as_deref().map(str::trim) {
        Some(secret) if !secret.is_empty() => Ok(secret),
        _ => Err(AppError::configuration(
            "JWT signing secret is not configured (auth.jwt_secret)",
        )),
    }
}
