//! Integration tests for the per-request session cookie policy.

mod helpers;

use axum::http::{Request, StatusCode, header};
use bazaar_core::config::Environment;
use serde_json::json;

use bazaar_entity::user::UserRole;
use helpers::{PASSWORD, TestApp, TestResponse};

async fn login_with(app: &TestApp, host: &str, origin: Option<&str>) -> TestResponse {
    let mut req = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header(header::HOST, host);
    if let Some(origin) = origin {
        req = req.header(header::ORIGIN, origin);
    }
    app.send(
        req,
        Some(json!({ "email": "ada@example.com", "password": PASSWORD })),
    )
    .await
}

async fn seeded(app: TestApp) -> TestApp {
    app.create_user("ada@example.com", UserRole::User).await;
    app
}

#[tokio::test]
async fn test_same_origin_development_is_lax() {
    let app = seeded(TestApp::new()).await;

    for origin in [None, Some("http://localhost:8000")] {
        let response = login_with(&app, "localhost:8000", origin).await;
        assert_eq!(response.status, StatusCode::OK);

        let cookie = response.set_cookie().unwrap();
        assert!(cookie.contains("SameSite=Lax"), "{cookie}");
        assert!(!cookie.contains("Secure"), "{cookie}");
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("Expires="));
    }
}

#[tokio::test]
async fn test_differing_origin_is_cross_site() {
    let app = seeded(TestApp::new()).await;

    let response = login_with(&app, "api.example.com", Some("https://app.example.com")).await;
    let cookie = response.set_cookie().unwrap();
    assert!(cookie.contains("SameSite=None"), "{cookie}");
    assert!(cookie.contains("Secure"), "{cookie}");
    assert!(!cookie.contains("Domain="), "{cookie}");
}

#[tokio::test]
async fn test_cross_site_on_localhost_is_not_secure() {
    let app = seeded(TestApp::new()).await;

    let response = login_with(&app, "localhost:8000", Some("http://localhost:3000")).await;
    let cookie = response.set_cookie().unwrap();
    assert!(cookie.contains("SameSite=None"), "{cookie}");
    assert!(!cookie.contains("Secure"), "{cookie}");
}

#[tokio::test]
async fn test_force_cross_site_flag() {
    let mut config = helpers::test_config();
    config.cookie.force_cross_site = true;
    let app = seeded(TestApp::with_config(config)).await;

    let response = login_with(&app, "api.example.com", None).await;
    let cookie = response.set_cookie().unwrap();
    assert!(cookie.contains("SameSite=None"), "{cookie}");
    assert!(cookie.contains("Secure"), "{cookie}");
}

#[tokio::test]
async fn test_production_cross_site_with_domain() {
    let mut config = helpers::test_config();
    config.environment = Environment::Production;
    config.cookie.domain = Some("example.com".to_string());
    let app = seeded(TestApp::with_config(config)).await;

    let response = login_with(&app, "api.example.com", Some("https://app.example.com")).await;
    let cookie = response.set_cookie().unwrap();
    assert!(cookie.contains("SameSite=None"), "{cookie}");
    assert!(cookie.contains("Secure"), "{cookie}");
    assert!(cookie.contains("Domain=example.com"), "{cookie}");
    assert!(cookie.contains("HttpOnly"));
}

#[tokio::test]
async fn test_domain_ignored_outside_production() {
    let mut config = helpers::test_config();
    config.cookie.domain = Some("example.com".to_string());
    let app = seeded(TestApp::with_config(config)).await;

    let response = login_with(&app, "api.example.com", None).await;
    let cookie = response.set_cookie().unwrap();
    assert!(!cookie.contains("Domain="), "{cookie}");
}

#[tokio::test]
async fn test_logout_cookie_follows_policy() {
    let app = TestApp::new();

    let response = app
        .send(
            Request::builder()
                .uri("/api/auth/logout")
                .header(header::HOST, "api.example.com")
                .header(header::ORIGIN, "https://app.example.com"),
            None,
        )
        .await;

    let cookie = response.set_cookie().unwrap();
    assert!(cookie.starts_with("jwt=loggedout"));
    assert!(cookie.contains("SameSite=None"), "{cookie}");
    assert!(cookie.contains("Secure"), "{cookie}");
}
