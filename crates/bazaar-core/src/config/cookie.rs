//! Session cookie configuration.

use serde::{Deserialize, Serialize};

/// Session cookie configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CookieConfig {
    /// Cookie name carrying the session token.
    #[serde(default = "default_name")]
    pub name: String,
    /// Cookie lifetime in days.
    #[serde(default = "default_expires_in_days")]
    pub expires_in_days: i64,
    /// Always issue cross-site (`SameSite=None`) cookies.
    #[serde(default)]
    pub force_cross_site: bool,
    /// Domain attribute, applied only in production.
    #[serde(default)]
    pub domain: Option<String>,
    /// Path attribute.
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            expires_in_days: default_expires_in_days(),
            force_cross_site: false,
            domain: None,
            path: default_path(),
        }
    }
}

fn default_name() -> String {
    "jwt".to_string()
}

fn default_expires_in_days() -> i64 {
    30
}

fn default_path() -> String {
    "/".to_string()
}
