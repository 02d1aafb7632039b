//! Role and premium gates. Both must be layered inside `protect`.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::debug;

use bazaar_auth::{AuthError, PremiumGate, RoleGate};
use bazaar_core::error::AppError;
use bazaar_entity::user::User;

/// Forwards only identities whose role the gate permits.
///
/// Mount with `from_fn_with_state(RoleGate::..., restrict_to)`.
pub async fn restrict_to(State(gate): State<RoleGate>, request: Request, next: Next) -> Response {
    let Some(user) = request.extensions().get::<User>() else {
        return AppError::from(AuthError::Unauthenticated).into_response();
    };

    if let Err(reason) = gate.check(user) {
        debug!(user_id = %user.id, role = %user.role, "Role gate rejected request");
        return AppError::from(reason).into_response();
    }
    next.run(request).await
}

/// Forwards only premium identities and admins.
pub async fn require_premium(request: Request, next: Next) -> Response {
    let Some(user) = request.extensions().get::<User>() else {
        return AppError::from(AuthError::Unauthenticated).into_response();
    };

    if let Err(reason) = PremiumGate.check(user) {
        debug!(user_id = %user.id, "Premium gate rejected request");
        return AppError::from(reason).into_response();
    }
    next.run(request).await
}
