//! Admin account management.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use bazaar_core::error::AppError;

use crate::dto::response::{ApiResponse, MessageResponse};
use crate::extractors::CurrentUser;
use crate::state::AppState;

/// PATCH /api/users/{id}/deactivate
///
/// Existing tokens for the account stop passing the auth gate immediately.
pub async fn deactivate(
    State(state): State<AppState>,
    CurrentUser(admin): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    state.auth_service.set_active(id, false).await?;
    tracing::info!(admin_id = %admin.id, user_id = %id, "Account deactivated");

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "User deactivated".to_string(),
    })))
}

/// PATCH /api/users/{id}/activate
pub async fn activate(
    State(state): State<AppState>,
    CurrentUser(admin): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    state.auth_service.set_active(id, true).await?;
    tracing::info!(admin_id = %admin.id, user_id = %id, "Account activated");

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "User activated".to_string(),
    })))
}
