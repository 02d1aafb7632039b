//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use bazaar_auth::{AuthGuard, AuthService, CookiePolicy, JwtDecoder, JwtEncoder, PasswordValidator};
use bazaar_core::config::AppConfig;
use bazaar_core::error::AppError;
use bazaar_database::UserStore;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. Cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Credential store
    pub users: Arc<dyn UserStore>,
    /// Token issuer
    pub encoder: Arc<JwtEncoder>,
    /// Auth gate and soft-login check
    pub guard: Arc<AuthGuard>,
    /// Per-request session cookie policy
    pub cookie_policy: Arc<CookiePolicy>,
    /// Signup, login, password change, and refresh flows
    pub auth_service: Arc<AuthService>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("guard", &self.guard)
            .field("cookie_policy", &self.cookie_policy)
            .finish()
    }
}

impl AppState {
    /// Wires the auth core over a credential store.
    ///
    /// Fails when the signing secret, token lifetime or cookie lifetime is
    /// misconfigured.
    pub fn new(config: AppConfig, users: Arc<dyn UserStore>) -> Result<Self, AppError> {
        let encoder = Arc::new(JwtEncoder::new(&config.auth)?);
        let decoder = JwtDecoder::new(&config.auth)?;
        let guard = Arc::new(AuthGuard::new(decoder, Arc::clone(&users)));
        let cookie_policy = Arc::new(CookiePolicy::new(&config.cookie, config.environment)?);
        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&users),
            Arc::clone(&encoder),
            PasswordValidator::new(&config.auth),
        ));

        Ok(Self {
            config: Arc::new(config),
            users,
            encoder,
            guard,
            cookie_policy,
            auth_service,
        })
    }
}
