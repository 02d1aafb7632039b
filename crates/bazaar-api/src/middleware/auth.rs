//! Auth gate and soft-login check as axum middleware.
//!
//! Both attach the resolved [`User`] to request extensions, where the
//! [`CurrentUser`](crate::extractors::CurrentUser) and
//! [`MaybeUser`](crate::extractors::MaybeUser) extractors pick it up.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::debug;

use bazaar_auth::guard::{cookie_token, extract_token};
use bazaar_core::error::AppError;

use crate::state::AppState;

/// Rejects the request unless it carries a valid session for an active
/// identity. Bearer header first, session cookie second.
pub async fn protect(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let token = extract_token(request.headers(), state.cookie_policy.cookie_name());

    match state.guard.authenticate(token.as_deref()).await {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(reason) => {
            debug!(
                path = %request.uri().path(),
                reason = reason.code(),
                "Auth gate rejected request"
            );
            AppError::from(reason).into_response()
        }
    }
}

/// Attaches the identity when the session cookie is valid; otherwise lets
/// the request through anonymously.
pub async fn is_logged_in(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = cookie_token(request.headers(), state.cookie_policy.cookie_name());

    if let Some(user) = state.guard.soft_login(token.as_deref()).await {
        request.extensions_mut().insert(user);
    }
    next.run(request).await
}
