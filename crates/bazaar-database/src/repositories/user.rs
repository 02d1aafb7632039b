//! Credential store contract and its PostgreSQL repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use bazaar_core::error::{AppError, ErrorKind};
use bazaar_core::result::AppResult;
use bazaar_entity::user::{CreateUser, User};

/// Persistence contract the auth core relies on.
///
/// Every lookup returns the full record, including the fields the gate
/// validates (`role`, `password_changed_at`, `active`). Implementations must
/// exclude permanently removed users (`deleted_at` set) from all lookups.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Find a user by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find a user by email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Create a new user. Fails with a conflict if the email is taken.
    async fn create(&self, data: CreateUser) -> AppResult<User>;

    /// Replace the password hash and record when it changed.
    async fn update_password(
        &self,
        id: Uuid,
        password_hash: &str,
        changed_at: DateTime<Utc>,
    ) -> AppResult<()>;

    /// Set the active flag. Returns `false` if no such user exists.
    async fn set_active(&self, id: Uuid, active: bool) -> AppResult<bool>;

    /// Set the premium flag. Returns `false` if no such user exists.
    async fn set_premium(&self, id: Uuid, is_premium: bool) -> AppResult<bool>;
}

/// PostgreSQL-backed [`UserStore`].
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1 AND deleted_at IS NULL")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE LOWER(email) = LOWER($1) AND deleted_at IS NULL",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by email", e))
    }

    async fn create(&self, data: CreateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            r#"INSERT INTO users (id, name, email, password_hash, role)
               VALUES ($1, $2, LOWER($3), $4, $5)
               RETURNING *"#,
        )
        .bind(Uuid::now_v7())
        .bind(&data.name)
        .bind(&data.email)
        .bind(&data.password_hash)
        .bind(data.role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::conflict(format!("Email '{}' is already registered", data.email))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create user", e),
        })
    }

    async fn update_password(
        &self,
        id: Uuid,
        password_hash: &str,
        changed_at: DateTime<Utc>,
    ) -> AppResult<()> {
        sqlx::query(
            r#"UPDATE users
               SET password_hash = $2, password_changed_at = $3, updated_at = NOW()
               WHERE id = $1 AND deleted_at IS NULL"#,
        )
        .bind(id)
        .bind(password_hash)
        .bind(changed_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update password", e))?;
        Ok(())
    }

    async fn set_active(&self, id: Uuid, active: bool) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE users SET active = $2, updated_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(active)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update active flag", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn set_premium(&self, id: Uuid, is_premium: bool) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE users SET is_premium = $2, updated_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(is_premium)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update premium flag", e)
        })?;
        Ok(result.rows_affected() > 0)
    }
}
