//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles recognized by the marketplace.
///
/// `Admin` is the only privileged role; the others describe what kind of
/// content an account publishes and are not ordered relative to each other.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, Default,
)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Regular customer account.
    #[default]
    User,
    /// Publishes articles.
    Author,
    /// Publishes courses.
    Instructor,
    /// Publishes job offers.
    Employer,
    /// Platform administrator.
    Admin,
}

impl UserRole {
    /// Every role, in declaration order.
    pub const ALL: [UserRole; 5] = [
        Self::User,
        Self::Author,
        Self::Instructor,
        Self::Employer,
        Self::Admin,
    ];

    /// Check if this role is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Author => "author",
            Self::Instructor => "instructor",
            Self::Employer => "employer",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = bazaar_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Self::User),
            "author" => Ok(Self::Author),
            "instructor" => Ok(Self::Instructor),
            "employer" => Ok(Self::Employer),
            "admin" => Ok(Self::Admin),
            _ => Err(bazaar_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: user, author, instructor, employer, admin"
            ))),
        }
    }
}
