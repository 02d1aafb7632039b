//! Session handlers: signup, login, logout, refresh, update-password, me, session.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;

use bazaar_auth::{AuthSession, SignupInput};
use bazaar_core::error::AppError;

use crate::dto::request::{LoginRequest, SignupRequest, UpdatePasswordRequest};
use crate::dto::response::{ApiResponse, SessionResponse, TokenResponse, UserData};
use crate::extractors::{CurrentUser, JsonBody, MaybeUser, ValidatedJson};
use crate::state::AppState;

/// Sets the session cookie and builds the token body.
fn send_token(
    state: &AppState,
    parts: &Parts,
    jar: CookieJar,
    session: AuthSession,
) -> (CookieJar, Json<TokenResponse>) {
    let cookie = state
        .cookie_policy
        .session_cookie(parts, session.token.token.clone());
    (
        jar.add(cookie),
        Json(TokenResponse::new(session.token.token, session.user)),
    )
}

/// POST /api/auth/signup
pub async fn signup(
    State(state): State<AppState>,
    parts: Parts,
    jar: CookieJar,
    ValidatedJson(req): ValidatedJson<SignupRequest>,
) -> Result<(StatusCode, CookieJar, Json<TokenResponse>), AppError> {
    let session = state
        .auth_service
        .signup(SignupInput {
            name: req.name,
            email: req.email,
            password: req.password,
            password_confirm: req.password_confirm,
        })
        .await?;

    let (jar, body) = send_token(&state, &parts, jar, session);
    Ok((StatusCode::CREATED, jar, body))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    parts: Parts,
    jar: CookieJar,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<(CookieJar, Json<TokenResponse>), AppError> {
    let session = state.auth_service.login(&req.email, &req.password).await?;
    Ok(send_token(&state, &parts, jar, session))
}

/// GET /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    parts: Parts,
    jar: CookieJar,
) -> (CookieJar, Json<serde_json::Value>) {
    let cookie = state.cookie_policy.logout_cookie(&parts);
    (jar.add(cookie), Json(serde_json::json!({ "status": "success" })))
}

/// POST /api/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    parts: Parts,
    jar: CookieJar,
    CurrentUser(user): CurrentUser,
) -> Result<(CookieJar, Json<TokenResponse>), AppError> {
    let token = state.auth_service.refresh(&user).await?;
    Ok(send_token(&state, &parts, jar, AuthSession { user, token }))
}

/// PATCH /api/auth/update-password
pub async fn update_password(
    State(state): State<AppState>,
    parts: Parts,
    jar: CookieJar,
    CurrentUser(user): CurrentUser,
    ValidatedJson(req): ValidatedJson<UpdatePasswordRequest>,
) -> Result<(CookieJar, Json<TokenResponse>), AppError> {
    let session = state
        .auth_service
        .update_password(
            &user,
            &req.password_current,
            &req.password,
            &req.password_confirm,
        )
        .await?;
    Ok(send_token(&state, &parts, jar, session))
}

/// GET /api/auth/me
pub async fn me(CurrentUser(user): CurrentUser) -> Json<ApiResponse<UserData>> {
    Json(ApiResponse::ok(UserData { user }))
}

/// GET /api/auth/session
pub async fn session(MaybeUser(user): MaybeUser) -> Json<ApiResponse<SessionResponse>> {
    Json(ApiResponse::ok(SessionResponse {
        logged_in: user.is_some(),
        user,
    }))
}
