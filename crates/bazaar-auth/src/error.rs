//! Auth failure taxonomy.

use thiserror::Error;

use bazaar_core::error::{AppError, ErrorKind};

/// Every way the auth gate, role gate, or premium gate can refuse a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No bearer token and no session cookie.
    #[error("You are not logged in! Please log in to get access.")]
    Unauthenticated,
    /// Bad signature or malformed token.
    #[error("Invalid token. Please log in again.")]
    InvalidToken,
    /// Token past its expiry.
    #[error("Your session has expired. Please log in again.")]
    ExpiredSession,
    /// Subject no longer resolves to a live identity.
    #[error("The user belonging to this token no longer exists.")]
    UnknownUser,
    /// Token issued before the last password change.
    #[error("User recently changed password. Please log in again.")]
    StaleToken,
    /// Identity exists but is inactive.
    #[error("This account has been deactivated.")]
    DeactivatedAccount,
    /// Unexpected fault while authenticating.
    #[error("Authentication failed. Please log in again.")]
    AuthenticationFailed,
    /// Authenticated, but the role is not allowed.
    #[error("You do not have permission to perform this action")]
    Forbidden,
    /// Authenticated, but not on the premium tier.
    #[error("This feature requires a premium subscription")]
    PremiumRequired,
}

impl AuthError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::ExpiredSession => "EXPIRED_SESSION",
            Self::UnknownUser => "UNKNOWN_USER",
            Self::StaleToken => "STALE_TOKEN",
            Self::DeactivatedAccount => "DEACTIVATED_ACCOUNT",
            Self::AuthenticationFailed => "AUTHENTICATION_FAILED",
            Self::Forbidden => "FORBIDDEN",
            Self::PremiumRequired => "PREMIUM_REQUIRED",
        }
    }

    /// HTTP status the failure maps to.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Forbidden | Self::PremiumRequired => 403,
            _ => 401,
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        let kind = if err.status_code() == 403 {
            ErrorKind::Authorization
        } else {
            ErrorKind::Authentication
        };
        AppError::new(kind, err.to_string()).with_code(err.code())
    }
}
