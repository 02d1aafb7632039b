//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Token signing and credential policy configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256). Required; there is no default.
    #[serde(default)]
    pub jwt_secret: Option<String>,
    /// Token lifetime, e.g. `30d`, `12h`, `3600`.
    #[serde(default = "default_expires_in")]
    pub jwt_expires_in: String,
    /// Seconds the `iat` claim is backdated by to absorb clock skew.
    #[serde(default = "default_issued_at_skew")]
    pub issued_at_skew_seconds: i64,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            jwt_expires_in: default_expires_in(),
            issued_at_skew_seconds: default_issued_at_skew(),
            password_min_length: default_password_min(),
        }
    }
}

fn default_expires_in() -> String {
    "30d".to_string()
}

fn default_issued_at_skew() -> i64 {
    30
}

fn default_password_min() -> usize {
    8
}
