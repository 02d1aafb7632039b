//! PostgreSQL pool backing the credential store.

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{debug, info};

use bazaar_core::config::DatabaseConfig;
use bazaar_core::error::{AppError, ErrorKind};

/// Owned handle to the credential database.
#[derive(Debug, Clone)]
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    /// Open the pool described by `config`.
    ///
    /// The acquire timeout bounds every identity lookup made by the auth gate,
    /// so a stalled database surfaces as a 500 instead of a hung request.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        if config.min_connections > config.max_connections {
            return Err(AppError::configuration(format!(
                "database.min_connections ({}) exceeds database.max_connections ({})",
                config.min_connections, config.max_connections
            )));
        }

        info!(
            target = %redact_url(&config.url),
            max = config.max_connections,
            "Opening credential database"
        );

        let pool = Self::options(config)
            .connect(&config.url)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Cannot reach credential database: {e}"),
                    e,
                )
            })?;

        debug!(size = pool.size(), "Credential database ready");
        Ok(Self { pool })
    }

    fn options(config: &DatabaseConfig) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
            .test_before_acquire(true)
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Drain and close every connection.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Credential database closed");
    }
}

/// Hide the userinfo password in a connection URL before it is logged.
fn redact_url(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    let Some((userinfo, host)) = rest.rsplit_once('@') else {
        return url.to_string();
    };
    match userinfo.split_once(':') {
        Some((user, _)) => format!("{scheme}://{user}:****@{host}"),
        None => url.to_string(),
    }
}
