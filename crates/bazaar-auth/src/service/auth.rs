//! Signup, login, password change and refresh.

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use bazaar_core::error::AppError;
use bazaar_database::UserStore;
use bazaar_entity::user::{CreateUser, User, UserRole};

use crate::jwt::{IssuedToken, JwtEncoder};
use crate::password::{PasswordHasher, PasswordValidator};
use crate::refresh::RefreshCoalescer;

const INCORRECT_CREDENTIALS: &str = "Incorrect email or password";

/// An authenticated identity together with its freshly issued token.
#[derive(Debug, Clone, Serialize)]
pub struct AuthSession {
    /// The identity the token was issued for.
    pub user: User,
    /// The signed session token.
    pub token: IssuedToken,
}

/// Fields accepted by [`AuthService::signup`].
#[derive(Debug, Clone)]
pub struct SignupInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

/// Orchestrates the credential flows that mint session tokens.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    hasher: PasswordHasher,
    validator: PasswordValidator,
    encoder: Arc<JwtEncoder>,
    refreshes: RefreshCoalescer<Uuid, IssuedToken>,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("encoder", &self.encoder)
            .field("refreshes", &self.refreshes)
            .finish()
    }
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        users: Arc<dyn UserStore>,
        encoder: Arc<JwtEncoder>,
        validator: PasswordValidator,
    ) -> Self {
        Self {
            users,
            hasher: PasswordHasher::new(),
            validator,
            encoder,
            refreshes: RefreshCoalescer::new(),
        }
    }

    /// Registers a new `user`-role account and signs it in.
    pub async fn signup(&self, input: SignupInput) -> Result<AuthSession, AppError> {
        let name = input.name.trim();
        let email = normalize_email(&input.email);

        if name.is_empty() {
            return Err(AppError::validation("Please tell us your name!"));
        }
        if email.is_empty() {
            return Err(AppError::validation("Please provide your email"));
        }
        self.validator
            .validate(&input.password, &input.password_confirm)?;

        let password_hash = self.hasher.hash_password(&input.password)?;
        let user = self
            .users
            .create(CreateUser {
                name: name.to_string(),
                email,
                password_hash,
                role: UserRole::User,
            })
            .await?;

        info!(user_id = %user.id, "User signed up");
        self.open_session(user)
    }

    /// Verifies credentials and signs the account in.
    ///
    /// Unknown email, wrong password and inactive accounts are reported
    /// identically.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession, AppError> {
        let email = normalize_email(email);
        if email.is_empty() || password.is_empty() {
            return Err(AppError::validation("Please provide email and password!"));
        }

        let Some(user) = self.users.find_by_email(&email).await? else {
            self.hasher.verify_decoy(password);
            debug!("Login attempt for unknown email");
            return Err(AppError::authentication(INCORRECT_CREDENTIALS));
        };

        if !self.hasher.verify_password(password, &user.password_hash)? {
            debug!(user_id = %user.id, "Login attempt with wrong password");
            return Err(AppError::authentication(INCORRECT_CREDENTIALS));
        }

        if !user.active {
            warn!(user_id = %user.id, "Login attempt on deactivated account");
            return Err(AppError::authentication(INCORRECT_CREDENTIALS));
        }

        info!(user_id = %user.id, "User logged in");
        self.open_session(user)
    }

    /// Changes the password of an authenticated identity and reissues its token.
    ///
    /// Every token issued before the change stops passing the auth gate.
    pub async fn update_password(
        &self,
        user: &User,
        current: &str,
        new: &str,
        confirm: &str,
    ) -> Result<AuthSession, AppError> {
        if !self.hasher.verify_password(current, &user.password_hash)? {
            return Err(AppError::authentication("Your current password is wrong."));
        }
        self.validator.validate_not_same(current, new)?;
        self.validator.validate(new, confirm)?;

        let password_hash = self.hasher.hash_password(new)?;
        // Strictly before the replacement token's backdated iat.
        let changed_at = Utc::now() - self.encoder.issued_at_skew() - Duration::seconds(1);
        self.users
            .update_password(user.id, &password_hash, changed_at)
            .await?;

        let updated = self
            .users
            .find_by_id(user.id)
            .await?
            .ok_or_else(|| AppError::not_found("User no longer exists"))?;

        info!(user_id = %updated.id, "Password changed");
        self.open_session(updated)
    }

    /// Reissues a token for an authenticated identity.
    ///
    /// Concurrent refreshes for the same identity share one issuance.
    pub async fn refresh(&self, user: &User) -> Result<IssuedToken, AppError> {
        let encoder = Arc::clone(&self.encoder);
        let (user_id, role) = (user.id, user.role);

        self.refreshes
            .run(user_id, move || async move {
                debug!(user_id = %user_id, "Issuing refreshed token");
                encoder.issue_token(user_id, Some(role))
            })
            .await
    }

    /// Sets the active flag on an account. Fails if the account does not exist.
    pub async fn set_active(&self, user_id: Uuid, active: bool) -> Result<(), AppError> {
        if !self.users.set_active(user_id, active).await? {
            return Err(AppError::not_found(format!("No user found with id {user_id}")));
        }
        info!(user_id = %user_id, active, "Account active flag changed");
        Ok(())
    }

    fn open_session(&self, user: User) -> Result<AuthSession, AppError> {
        let token = self.encoder.issue_token(user.id, Some(user.role))?;
        Ok(AuthSession { user, token })
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
