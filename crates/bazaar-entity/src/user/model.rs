//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::UserRole;

/// A registered marketplace account.
///
/// Secrets (`password_hash`, `otp`, `otp_expires`) never serialize outward.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Login email, unique and case-insensitive.
    pub email: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Role.
    pub role: UserRole,
    /// Premium tier flag, independent of role.
    pub is_premium: bool,
    /// Inactive accounts are never authenticated.
    pub active: bool,
    /// Last password change. Tokens issued before this are stale.
    pub password_changed_at: Option<DateTime<Utc>>,
    /// One-time password for second-factor flows.
    #[serde(skip_serializing)]
    pub otp: Option<String>,
    /// OTP expiry.
    #[serde(skip_serializing)]
    pub otp_expires: Option<DateTime<Utc>>,
    /// Permanent removal marker.
    #[serde(skip_serializing)]
    pub deleted_at: Option<DateTime<Utc>>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Whether a token issued at `issued_at` (seconds since epoch) predates
    /// the last password change.
    pub fn changed_password_after(&self, issued_at: i64) -> bool {
        self.password_changed_at
            .map(|changed| changed.timestamp() > issued_at)
            .unwrap_or(false)
    }

    /// Check if this user has admin privileges.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Whether the account was permanently removed.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Assigned role.
    pub role: UserRole,
}
