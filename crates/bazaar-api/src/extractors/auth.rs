//! Identity extractors reading what the auth middleware attached.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use bazaar_auth::AuthError;
use bazaar_core::error::AppError;
use bazaar_entity::user::User;

/// The identity resolved by `protect`.
///
/// Rejects with `Unauthenticated` when the route is not behind the auth
/// gate, so a missing layer fails closed.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl std::ops::Deref for CurrentUser {
    type Target = User;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<User>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| AuthError::Unauthenticated.into())
    }
}

/// The identity resolved by `is_logged_in`, if any. Never rejects.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<User>);

impl<S> FromRequestParts<S> for MaybeUser
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(parts.extensions.get::<User>().cloned()))
    }
}
