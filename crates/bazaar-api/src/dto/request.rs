//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Signup request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignupRequest {
    /// Display name.
    #[validate(length(min = 1, max = 100, message = "Please tell us your name!"))]
    pub name: String,
    /// Login email.
    #[validate(email(message = "Please provide a valid email"))]
    pub email: String,
    /// New password.
    pub password: String,
    /// Must equal `password`.
    #[serde(alias = "passwordConfirm")]
    pub password_confirm: String,
}

/// Login request body.
///
/// Fields default to empty so a missing field reaches the credential check
/// and is reported as such.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Password change request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdatePasswordRequest {
    /// Current password.
    #[serde(alias = "passwordCurrent")]
    #[validate(length(min = 1, message = "Please provide your current password"))]
    pub password_current: String,
    /// New password.
    pub password: String,
    /// Must equal `password`.
    #[serde(alias = "passwordConfirm")]
    pub password_confirm: String,
}
