//! Integration tests for the auth gate, role gate, premium gate, and soft login.

mod helpers;

use axum::http::{Request, StatusCode, header};
use chrono::{Duration, Utc};
use uuid::Uuid;

use bazaar_entity::user::UserRole;
use helpers::TestApp;

#[tokio::test]
async fn test_missing_token_rejected() {
    let app = TestApp::new();
    let response = app.request("GET", "/api/auth/me", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["status"], "fail");
    assert_eq!(response.error_code(), "UNAUTHENTICATED");
    assert_eq!(
        response.body["message"],
        "You are not logged in! Please log in to get access."
    );
}

#[tokio::test]
async fn test_malformed_and_foreign_tokens_rejected() {
    let app = TestApp::new();
    let garbage = app
        .request("GET", "/api/auth/me", None, Some("not.a.token"))
        .await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
    assert_eq!(garbage.error_code(), "INVALID_TOKEN");

    let mut other = helpers::test_config();
    other.auth.jwt_secret = Some("some-other-secret".to_string());
    let other_app = TestApp::with_config(other);
    let user = app.create_user("ada@example.com", UserRole::User).await;
    let forged = other_app.token_for(&user);

    let response = app.request("GET", "/api/auth/me", None, Some(&forged)).await;
    assert_eq!(response.error_code(), "INVALID_TOKEN");
}

#[tokio::test]
async fn test_expired_token_rejected() {
    let app = TestApp::new();
    let user = app.create_user("ada@example.com", UserRole::User).await;
    let expired = app
        .encoder
        .issue_token_at(user.id, Some(user.role), Utc::now() - Duration::days(31))
        .unwrap()
        .token;

    let response = app.request("GET", "/api/auth/me", None, Some(&expired)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "EXPIRED_SESSION");
}

#[tokio::test]
async fn test_unknown_and_removed_identities_rejected() {
    let app = TestApp::new();
    let ghost = app
        .encoder
        .issue_token(Uuid::new_v4(), None)
        .unwrap()
        .token;
    let response = app.request("GET", "/api/auth/me", None, Some(&ghost)).await;
    assert_eq!(response.error_code(), "UNKNOWN_USER");

    let user = app.create_user("ada@example.com", UserRole::User).await;
    let token = app.token_for(&user);
    app.store.modify(user.id, |u| u.deleted_at = Some(Utc::now()));

    let response = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "UNKNOWN_USER");
}

#[tokio::test]
async fn test_password_changed_after_issuance_is_stale() {
    let app = TestApp::new();
    let user = app.create_user("ada@example.com", UserRole::User).await;

    // Issued at t0, password changed at t0 + 1s, checked at t0 + 5s.
    let t0 = Utc::now() - Duration::seconds(5);
    let token = app
        .encoder
        .issue_token_at(user.id, Some(user.role), t0)
        .unwrap()
        .token;
    app.store.modify(user.id, |u| {
        u.password_changed_at = Some(t0 + Duration::seconds(1));
    });

    let response = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "STALE_TOKEN");
}

#[tokio::test]
async fn test_gate_is_idempotent() {
    let app = TestApp::new();
    let user = app.create_user("ada@example.com", UserRole::Employer).await;
    let token = app.token_for(&user);

    let first = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    let second = app.request("GET", "/api/auth/me", None, Some(&token)).await;

    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.status, second.status);
    assert_eq!(first.body, second.body);
}

#[tokio::test]
async fn test_role_gate_user_vs_admin() {
    let app = TestApp::new();
    let user = app.create_user("ada@example.com", UserRole::User).await;
    let admin = app.create_user("root@example.com", UserRole::Admin).await;
    let target = app.create_user("bob@example.com", UserRole::Author).await;
    let path = format!("/api/users/{}/deactivate", target.id);

    let denied = app
        .request("PATCH", &path, None, Some(&app.token_for(&user)))
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);
    assert_eq!(denied.error_code(), "FORBIDDEN");
    assert_eq!(
        denied.body["message"],
        "You do not have permission to perform this action"
    );

    let allowed = app
        .request("PATCH", &path, None, Some(&app.token_for(&admin)))
        .await;
    assert_eq!(allowed.status, StatusCode::OK);
}

#[tokio::test]
async fn test_role_gate_runs_after_auth_gate() {
    let app = TestApp::new();
    let path = format!("/api/users/{}/deactivate", Uuid::new_v4());

    let response = app.request("PATCH", &path, None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_deactivation_after_issuance() {
    let app = TestApp::new();
    let admin = app.create_user("root@example.com", UserRole::Admin).await;
    let user = app.create_user("ada@example.com", UserRole::User).await;
    let token = app.token_for(&user);

    let before = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(before.status, StatusCode::OK);

    let admin_token = app.token_for(&admin);
    let path = format!("/api/users/{}/deactivate", user.id);
    let response = app.request("PATCH", &path, None, Some(&admin_token)).await;
    assert_eq!(response.status, StatusCode::OK);

    let after = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(after.status, StatusCode::UNAUTHORIZED);
    assert_eq!(after.error_code(), "DEACTIVATED_ACCOUNT");

    let path = format!("/api/users/{}/activate", user.id);
    app.request("PATCH", &path, None, Some(&admin_token)).await;
    let restored = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(restored.status, StatusCode::OK);
}

#[tokio::test]
async fn test_deactivate_unknown_account() {
    let app = TestApp::new();
    let admin = app.create_user("root@example.com", UserRole::Admin).await;
    let path = format!("/api/users/{}/deactivate", Uuid::new_v4());

    let response = app
        .request("PATCH", &path, None, Some(&app.token_for(&admin)))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_premium_gate() {
    let app = TestApp::new();
    let basic = app.create_user("ada@example.com", UserRole::User).await;
    let premium = app.create_user("bob@example.com", UserRole::User).await;
    let admin = app.create_user("root@example.com", UserRole::Admin).await;
    app.store.modify(premium.id, |u| u.is_premium = true);

    let denied = app
        .request("GET", "/api/premium/status", None, Some(&app.token_for(&basic)))
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);
    assert_eq!(denied.error_code(), "PREMIUM_REQUIRED");

    let allowed = app
        .request("GET", "/api/premium/status", None, Some(&app.token_for(&premium)))
        .await;
    assert_eq!(allowed.status, StatusCode::OK);
    assert_eq!(allowed.body["data"]["is_premium"], true);

    let admin_view = app
        .request("GET", "/api/premium/status", None, Some(&app.token_for(&admin)))
        .await;
    assert_eq!(admin_view.status, StatusCode::OK);
}

#[tokio::test]
async fn test_soft_login_never_rejects() {
    let app = TestApp::new();
    let user = app.create_user("ada@example.com", UserRole::User).await;
    let token = app.token_for(&user);

    let anonymous = app.request("GET", "/api/auth/session", None, None).await;
    assert_eq!(anonymous.status, StatusCode::OK);
    assert_eq!(anonymous.body["data"]["logged_in"], false);

    let with_cookie = app
        .send(
            Request::builder()
                .uri("/api/auth/session")
                .header(header::COOKIE, format!("jwt={token}")),
            None,
        )
        .await;
    assert_eq!(with_cookie.body["data"]["logged_in"], true);
    assert_eq!(with_cookie.body["data"]["user"]["id"], user.id.to_string());

    let garbage = app
        .send(
            Request::builder()
                .uri("/api/auth/session")
                .header(header::COOKIE, "jwt=loggedout"),
            None,
        )
        .await;
    assert_eq!(garbage.status, StatusCode::OK);
    assert_eq!(garbage.body["data"]["logged_in"], false);

    // The soft-login check only looks at the cookie.
    let bearer_only = app
        .request("GET", "/api/auth/session", None, Some(&token))
        .await;
    assert_eq!(bearer_only.body["data"]["logged_in"], false);

    app.store.modify(user.id, |u| {
        u.password_changed_at = Some(Utc::now());
    });
    let stale = app
        .send(
            Request::builder()
                .uri("/api/auth/session")
                .header(header::COOKIE, format!("jwt={token}")),
            None,
        )
        .await;
    assert_eq!(stale.status, StatusCode::OK);
    assert_eq!(stale.body["data"]["logged_in"], false);
}
