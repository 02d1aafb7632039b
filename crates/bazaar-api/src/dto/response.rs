//! Response DTOs.

use serde::{Deserialize, Serialize};

use bazaar_entity::user::User;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Always `success`.
    pub status: String,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            status: "success".to_string(),
            data,
        }
    }
}

/// `{ "user": ... }` payload.
#[derive(Debug, Clone, Serialize)]
pub struct UserData {
    pub user: User,
}

/// Response for every endpoint that issues a session token.
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub status: String,
    /// The same token that is set in the session cookie.
    pub token: String,
    pub data: UserData,
}

impl TokenResponse {
    /// Wraps a freshly issued token and its identity.
    pub fn new(token: String, user: User) -> Self {
        Self {
            status: "success".to_string(),
            token,
            data: UserData { user },
        }
    }
}

/// Soft-login check result.
#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    /// Whether a valid session accompanied the request.
    pub logged_in: bool,
    /// The resolved identity, when logged in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

/// Premium tier check result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PremiumStatusResponse {
    pub is_premium: bool,
    pub role: String,
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
}
