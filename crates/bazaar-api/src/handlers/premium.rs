//! Premium tier check.

use axum::Json;

use crate::dto::response::{ApiResponse, PremiumStatusResponse};
use crate::extractors::CurrentUser;

/// GET /api/premium/status
pub async fn status(CurrentUser(user): CurrentUser) -> Json<ApiResponse<PremiumStatusResponse>> {
    Json(ApiResponse::ok(PremiumStatusResponse {
        is_premium: user.is_premium,
        role: user.role.to_string(),
    }))
}
