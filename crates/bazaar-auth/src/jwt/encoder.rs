//! Session token issuance.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bazaar_core::config::AuthConfig;
use bazaar_core::duration::parse_lifetime;
use bazaar_core::error::AppError;
use bazaar_entity::user::UserRole;

use super::claims::Claims;

/// Creates signed HS256 session tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    encoding_key: EncodingKey,
    lifetime: Duration,
    issued_at_skew: Duration,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("lifetime", &self.lifetime)
            .field("issued_at_skew", &self.issued_at_skew)
            .finish()
    }
}

/// A freshly signed token and its expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedToken {
    /// Compact JWT.
    pub token: String,
    /// Expiration timestamp.
    pub expires_at: DateTime<Utc>,
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    ///
    /// Fails when the signing secret is missing, or when the lifetime or
    /// skew is malformed or would put `exp`/`iat` outside the calendar range.
    /// All of these are startup errors.
    pub fn new(config: &AuthConfig) -> Result<Self, AppError> {
        let secret = super::signing_secret(config)?;
        let lifetime = parse_lifetime(&config.jwt_expires_in)?;
        let now = Utc::now();

        if now.checked_add_signed(lifetime).is_none() {
            return Err(AppError::configuration(format!(
                "auth.jwt_expires_in '{}' puts token expiry out of range",
                config.jwt_expires_in
            )));
        }

        let issued_at_skew = Duration::try_seconds(config.issued_at_skew_seconds.max(0))
            .filter(|skew| now.checked_sub_signed(*skew).is_some())
            .ok_or_else(|| {
                AppError::configuration(format!(
                    "auth.issued_at_skew_seconds {} is out of range",
                    config.issued_at_skew_seconds
                ))
            })?;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            lifetime,
            issued_at_skew,
        })
    }

    /// Token lifetime.
    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// How far `iat` is backdated.
    pub fn issued_at_skew(&self) -> Duration {
        self.issued_at_skew
    }

    /// Issues a token for the given identity. A missing role means `user`.
    pub fn issue_token(
        &self,
        user_id: Uuid,
        role: Option<UserRole>,
    ) -> Result<IssuedToken, AppError> {
        self.issue_token_at(user_id, role, Utc::now())
    }

    /// Issues a token as if the current time were `now`.
    pub fn issue_token_at(
        &self,
        user_id: Uuid,
        role: Option<UserRole>,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, AppError> {
        let out_of_range = || AppError::internal("Token timestamps out of range");
        let expires_at = now
            .checked_add_signed(self.lifetime)
            .ok_or_else(out_of_range)?;
        let issued_at = now
            .checked_sub_signed(self.issued_at_skew)
            .ok_or_else(out_of_range)?;

        let claims = Claims {
            sub: user_id,
            role: role.unwrap_or_default(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode session token: {e}")))?;

        Ok(IssuedToken { token, expires_at })
    }
}
