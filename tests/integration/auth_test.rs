//! Integration tests for the session endpoints.

mod helpers;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::{Duration, Utc};
use serde_json::json;
use tower::ServiceExt;

use bazaar_entity::user::UserRole;
use helpers::{PASSWORD, TestApp};

#[tokio::test]
async fn test_signup_issues_token_and_cookie() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/signup",
            Some(json!({
                "name": "Ada",
                "email": "ada@example.com",
                "password": PASSWORD,
                "password_confirm": PASSWORD,
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["status"], "success");
    assert!(response.body["token"].as_str().is_some());

    let user = &response.body["data"]["user"];
    assert_eq!(user["email"], "ada@example.com");
    assert_eq!(user["role"], "user");
    assert!(user.get("password_hash").is_none());
    assert!(user.get("otp").is_none());

    let cookie = response.set_cookie().expect("session cookie");
    assert!(cookie.starts_with("jwt="));
    assert!(cookie.contains("HttpOnly"));
}

#[tokio::test]
async fn test_signup_rejects_bad_input() {
    let app = TestApp::new();

    let mismatch = app
        .request(
            "POST",
            "/api/auth/signup",
            Some(json!({
                "name": "Ada",
                "email": "ada@example.com",
                "password": PASSWORD,
                "password_confirm": "not-the-same-password",
            })),
            None,
        )
        .await;
    assert_eq!(mismatch.status, StatusCode::BAD_REQUEST);

    let bad_email = app
        .request(
            "POST",
            "/api/auth/signup",
            Some(json!({
                "name": "Ada",
                "email": "not-an-email",
                "password": PASSWORD,
                "password_confirm": PASSWORD,
            })),
            None,
        )
        .await;
    assert_eq!(bad_email.status, StatusCode::BAD_REQUEST);
    assert!(app.store.is_empty());
}

#[tokio::test]
async fn test_signup_duplicate_email_conflicts() {
    let app = TestApp::new();
    app.create_user("ada@example.com", UserRole::User).await;

    let response = app
        .request(
            "POST",
            "/api/auth/signup",
            Some(json!({
                "name": "Ada Again",
                "email": "Ada@Example.com",
                "password": PASSWORD,
                "password_confirm": PASSWORD,
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::new();
    let user = app.create_user("ada@example.com", UserRole::Author).await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "ada@example.com", "password": PASSWORD })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["user"]["id"], user.id.to_string());
    assert_eq!(response.body["data"]["user"]["role"], "author");

    let token = response.body["token"].as_str().unwrap();
    let cookie = response.set_cookie().unwrap();
    assert!(cookie.starts_with(&format!("jwt={token}")));
}

#[tokio::test]
async fn test_login_failures_are_uniform() {
    let app = TestApp::new();
    let user = app.create_user("ada@example.com", UserRole::User).await;

    let wrong = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "ada@example.com", "password": "wrong-Password-123" })),
            None,
        )
        .await;
    let unknown = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "nobody@example.com", "password": PASSWORD })),
            None,
        )
        .await;

    app.store.modify(user.id, |u| u.active = false);
    let inactive = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "ada@example.com", "password": PASSWORD })),
            None,
        )
        .await;

    for response in [&wrong, &unknown, &inactive] {
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(response.body["message"], "Incorrect email or password");
        assert!(response.set_cookie().is_none());
    }
}

#[tokio::test]
async fn test_login_missing_fields() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "ada@example.com" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Please provide email and password!");
}

#[tokio::test]
async fn test_login_unreadable_body_uses_error_envelope() {
    let app = TestApp::new();

    let empty = app.request("POST", "/api/auth/login", None, None).await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);
    assert_eq!(empty.body["status"], "fail");
    assert_eq!(empty.error_code(), "VALIDATION_ERROR");

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/login")
                .body(Body::from(r#"{"email": "ada@example.com""#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "fail");
    assert!(body["message"].as_str().is_some());
}

#[tokio::test]
async fn test_logout_replaces_cookie() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/auth/logout", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "success");
    let cookie = response.set_cookie().unwrap();
    assert!(cookie.starts_with("jwt=loggedout"));
    assert!(cookie.contains("HttpOnly"));
}

#[tokio::test]
async fn test_me_with_bearer_and_cookie() {
    let app = TestApp::new();
    let user = app.create_user("ada@example.com", UserRole::User).await;
    let token = app.token_for(&user);

    let bearer = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(bearer.status, StatusCode::OK);
    assert_eq!(bearer.body["data"]["user"]["id"], user.id.to_string());

    let cookie = app
        .send(
            Request::builder()
                .method("GET")
                .uri("/api/auth/me")
                .header(header::COOKIE, format!("jwt={token}")),
            None,
        )
        .await;
    assert_eq!(cookie.status, StatusCode::OK);
    assert_eq!(cookie.body["data"]["user"]["email"], "ada@example.com");
}

#[tokio::test]
async fn test_update_password_invalidates_older_tokens() {
    let app = TestApp::new();
    let user = app.create_user("ada@example.com", UserRole::User).await;
    let old_token = app
        .encoder
        .issue_token_at(user.id, Some(user.role), Utc::now() - Duration::seconds(10))
        .unwrap()
        .token;

    let new_password = "violet-Staple-orbit-42";
    let response = app
        .request(
            "PATCH",
            "/api/auth/update-password",
            Some(json!({
                "password_current": PASSWORD,
                "password": new_password,
                "password_confirm": new_password,
            })),
            Some(&old_token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let new_token = response.body["token"].as_str().unwrap().to_string();

    let stale = app.request("GET", "/api/auth/me", None, Some(&old_token)).await;
    assert_eq!(stale.status, StatusCode::UNAUTHORIZED);
    assert_eq!(stale.error_code(), "STALE_TOKEN");
    assert_eq!(
        stale.body["message"],
        "User recently changed password. Please log in again."
    );

    let fresh = app.request("GET", "/api/auth/me", None, Some(&new_token)).await;
    assert_eq!(fresh.status, StatusCode::OK);

    let login = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "ada@example.com", "password": new_password })),
            None,
        )
        .await;
    assert_eq!(login.status, StatusCode::OK);
}

#[tokio::test]
async fn test_update_password_wrong_current() {
    let app = TestApp::new();
    let user = app.create_user("ada@example.com", UserRole::User).await;
    let token = app.token_for(&user);

    let response = app
        .request(
            "PATCH",
            "/api/auth/update-password",
            Some(json!({
                "password_current": "wrong-Password-123",
                "password": "violet-Staple-orbit-42",
                "password_confirm": "violet-Staple-orbit-42",
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_reissues_for_same_identity() {
    let app = TestApp::new();
    let user = app.create_user("ada@example.com", UserRole::Instructor).await;
    let token = app.token_for(&user);

    let response = app.request("POST", "/api/auth/refresh", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    let refreshed = response.body["token"].as_str().unwrap();
    assert!(response.set_cookie().unwrap().starts_with("jwt="));

    let me = app.request("GET", "/api/auth/me", None, Some(refreshed)).await;
    assert_eq!(me.body["data"]["user"]["role"], "instructor");
}

#[tokio::test]
async fn test_refresh_requires_session() {
    let app = TestApp::new();
    let response = app.request("POST", "/api/auth/refresh", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
}
