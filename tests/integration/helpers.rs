//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use bazaar_api::{AppState, build_app};
use bazaar_auth::{JwtEncoder, PasswordHasher};
use bazaar_core::config::AppConfig;
use bazaar_database::{MemoryUserStore, UserStore};
use bazaar_entity::user::{CreateUser, User, UserRole};

/// Password every seeded account uses.
pub const PASSWORD: &str = "correct-Horse-battery-9";

/// Configuration with a signing secret and otherwise default settings.
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.auth.jwt_secret = Some("integration-test-secret".to_string());
    config
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Backing credential store, shared with the router
    pub store: MemoryUserStore,
    /// Token issuer using the app's secret
    pub encoder: JwtEncoder,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a test application with the default test config
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    /// Create a test application with a custom config
    pub fn with_config(config: AppConfig) -> Self {
        let store = MemoryUserStore::new();
        let users: Arc<dyn UserStore> = Arc::new(store.clone());
        let state = AppState::new(config.clone(), users).expect("Failed to build state");
        let encoder = JwtEncoder::new(&config.auth).expect("Failed to build encoder");

        Self {
            router: build_app(state),
            store,
            encoder,
            config,
        }
    }

    /// Seed an account with [`PASSWORD`]
    pub async fn create_user(&self, email: &str, role: UserRole) -> User {
        let password_hash = PasswordHasher::new()
            .hash_password(PASSWORD)
            .expect("Failed to hash password");

        self.store
            .create(CreateUser {
                name: "Test User".to_string(),
                email: email.to_string(),
                password_hash,
                role,
            })
            .await
            .expect("Failed to create user")
    }

    /// Issue a token for a seeded account
    pub fn token_for(&self, user: &User) -> String {
        self.encoder
            .issue_token(user.id, Some(user.role))
            .expect("Failed to issue token")
            .token
    }

    /// Make a JSON request with an optional bearer token
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut req = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            req = req.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        self.send(req, body).await
    }

    /// Make a request from a prepared builder, e.g. with cookies or origin headers
    pub async fn send(&self, req: axum::http::request::Builder, body: Option<Value>) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let req = req
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The `Set-Cookie` header, if any
    pub fn set_cookie(&self) -> Option<String> {
        self.headers
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .map(String::from)
    }

    /// The `error` code of a failure body
    pub fn error_code(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }
}
