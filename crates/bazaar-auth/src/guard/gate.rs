//! The auth gate and the soft-login check.
//!
//! Validation order: signature and expiry, identity lookup, password-change
//! check, active flag. Invalidation is derived entirely from the token and
//! the stored identity; nothing is written.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tracing::{debug, error, warn};

use bazaar_database::UserStore;
use bazaar_entity::user::User;

use crate::error::AuthError;
use crate::jwt::{DecodeError, JwtDecoder};

/// Authenticates requests from a session token.
#[derive(Clone)]
pub struct AuthGuard {
    decoder: JwtDecoder,
    users: Arc<dyn UserStore>,
}

impl std::fmt::Debug for AuthGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthGuard")
            .field("decoder", &self.decoder)
            .finish()
    }
}

impl AuthGuard {
    /// Creates a guard over the given decoder and credential store.
    pub fn new(decoder: JwtDecoder, users: Arc<dyn UserStore>) -> Self {
        Self { decoder, users }
    }

    /// Runs the full gate. Returns the identity to attach to the request.
    ///
    /// Faults inside the gate, panics included, surface as
    /// [`AuthError::AuthenticationFailed`]; the gate never forwards on error.
    pub async fn authenticate(&self, token: Option<&str>) -> Result<User, AuthError> {
        let token = token.ok_or(AuthError::Unauthenticated)?;

        let outcome = AssertUnwindSafe(self.verify(token)).catch_unwind().await;
        let user = match outcome {
            Ok(result) => result?,
            Err(_) => {
                error!("Auth gate panicked while verifying a token");
                return Err(AuthError::AuthenticationFailed);
            }
        };

        if !user.active {
            return Err(AuthError::DeactivatedAccount);
        }
        Ok(user)
    }

    /// Soft-login check. Never fails: any problem means anonymous.
    ///
    /// Only the session cookie is consulted by callers; pass `None` when it
    /// is absent.
    pub async fn soft_login(&self, cookie_token: Option<&str>) -> Option<User> {
        let token = cookie_token?;

        match AssertUnwindSafe(self.verify(token)).catch_unwind().await {
            Ok(Ok(user)) if user.active => Some(user),
            Ok(Ok(user)) => {
                debug!(user_id = %user.id, "Soft login ignored inactive account");
                None
            }
            Ok(Err(reason)) => {
                debug!(reason = reason.code(), "Soft login treating caller as anonymous");
                None
            }
            Err(_) => {
                warn!("Soft login panicked while verifying a token");
                None
            }
        }
    }

    /// Signature, expiry, lookup and password-change checks.
    async fn verify(&self, token: &str) -> Result<User, AuthError> {
        let claims = match self.decoder.decode(token) {
            Ok(claims) => claims,
            Err(DecodeError::Invalid) => return Err(AuthError::InvalidToken),
            Err(DecodeError::Expired) => return Err(AuthError::ExpiredSession),
            Err(DecodeError::Fault(e)) => {
                error!(error = %e, "Token verification fault");
                return Err(AuthError::AuthenticationFailed);
            }
        };

        let user = self
            .users
            .find_by_id(claims.user_id())
            .await
            .map_err(|e| {
                warn!(user_id = %claims.sub, error = %e, "Identity lookup failed");
                AuthError::AuthenticationFailed
            })?
            .ok_or(AuthError::UnknownUser)?;

        if user.changed_password_after(claims.iat) {
            return Err(AuthError::StaleToken);
        }

        Ok(user)
    }
}
