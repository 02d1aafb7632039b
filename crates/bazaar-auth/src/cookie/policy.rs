//! Per-request session cookie policy.
//!
//! The right attributes depend on who is calling: a browser on another
//! origin only sends the cookie back when it is `SameSite=None; Secure`,
//! while same-origin development over plain HTTP needs `Lax` and no
//! `Secure`. Options are therefore derived from every request's headers and target.

use axum::http::request::Parts;
use axum_extra::extract::cookie::{Cookie, SameSite};
use chrono::{DateTime, Duration, Utc};
use time::OffsetDateTime;

use bazaar_core::config::{CookieConfig, Environment};
use bazaar_core::error::AppError;

use super::origin::{is_foreign_origin, request_hostname};

/// Placeholder value written on logout.
pub const LOGGED_OUT_VALUE: &str = "loggedout";

/// Lifetime of the logout placeholder cookie.
const LOGOUT_COOKIE_SECONDS: i64 = 10;

/// Whether the session cookie must survive cross-site requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteMode {
    /// `SameSite=Lax`.
    SameSite,
    /// `SameSite=None`, requires `Secure` outside localhost.
    CrossSite,
}

/// Attributes computed for one response's session cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieOptions {
    /// Absolute expiry.
    pub expires: DateTime<Utc>,
    /// Always `true`.
    pub http_only: bool,
    /// SameSite attribute.
    pub same_site: SameSite,
    /// Secure attribute.
    pub secure: bool,
    /// Path attribute.
    pub path: String,
    /// Domain attribute; `None` keeps the cookie host-only.
    pub domain: Option<String>,
}

/// Decides session cookie attributes for each request.
#[derive(Debug, Clone)]
pub struct CookiePolicy {
    name: String,
    lifetime: Duration,
    force_cross_site: bool,
    domain: Option<String>,
    path: String,
    environment: Environment,
}

impl CookiePolicy {
    /// Creates a policy from cookie configuration and deployment mode.
    ///
    /// Fails when the lifetime is not positive or would push expiry dates
    /// outside the representable calendar range.
    pub fn new(config: &CookieConfig, environment: Environment) -> Result<Self, AppError> {
        let lifetime = Duration::try_days(config.expires_in_days)
            .filter(|d| *d > Duration::zero())
            .filter(|d| {
                Utc::now()
                    .checked_add_signed(*d)
                    .is_some_and(|at| OffsetDateTime::from_unix_timestamp(at.timestamp()).is_ok())
            })
            .ok_or_else(|| {
                AppError::configuration(format!(
                    "cookie.expires_in_days must be a positive number of days in range, got {}",
                    config.expires_in_days
                ))
            })?;

        Ok(Self {
            name: config.name.clone(),
            lifetime,
            force_cross_site: config.force_cross_site,
            domain: config
                .domain
                .clone()
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
            path: config.path.clone(),
            environment,
        })
    }

    /// Name of the session cookie.
    pub fn cookie_name(&self) -> &str {
        &self.name
    }

    /// Selects same-site or cross-site mode for the request.
    pub fn site_mode(&self, parts: &Parts) -> SiteMode {
        if self.force_cross_site || self.environment.is_production() || is_foreign_origin(parts) {
            SiteMode::CrossSite
        } else {
            SiteMode::SameSite
        }
    }

    /// Computes cookie options for the request.
    pub fn compute(&self, parts: &Parts) -> CookieOptions {
        self.compute_at(parts, Utc::now())
    }

    /// Computes cookie options as if the current time were `now`.
    pub fn compute_at(&self, parts: &Parts, now: DateTime<Utc>) -> CookieOptions {
        let production = self.environment.is_production();

        let (same_site, secure) = match self.site_mode(parts) {
            SiteMode::CrossSite => {
                let local = matches!(
                    request_hostname(parts).as_deref(),
                    Some("localhost") | Some("127.0.0.1")
                );
                (SameSite::None, !local)
            }
            SiteMode::SameSite => (SameSite::Lax, production),
        };

        let domain = if production { self.domain.clone() } else { None };

        CookieOptions {
            expires: now
                .checked_add_signed(self.lifetime)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
            http_only: true,
            same_site,
            secure,
            path: self.path.clone(),
            domain,
        }
    }

    /// Builds the session cookie carrying `token`.
    pub fn session_cookie(&self, parts: &Parts, token: String) -> Cookie<'static> {
        self.build(token, self.compute(parts))
    }

    /// Builds the short-lived placeholder cookie that replaces the session
    /// on logout.
    pub fn logout_cookie(&self, parts: &Parts) -> Cookie<'static> {
        let now = Utc::now();
        let mut options = self.compute_at(parts, now);
        options.expires = now + Duration::seconds(LOGOUT_COOKIE_SECONDS);
        self.build(LOGGED_OUT_VALUE.to_string(), options)
    }

    fn build(&self, value: String, options: CookieOptions) -> Cookie<'static> {
        let mut cookie = Cookie::build((self.name.clone(), value))
            .http_only(options.http_only)
            .same_site(options.same_site)
            .secure(options.secure)
            .path(options.path)
            .build();

        if let Ok(expires) = OffsetDateTime::from_unix_timestamp(options.expires.timestamp()) {
            cookie.set_expires(expires);
        }
        if let Some(domain) = options.domain {
            cookie.set_domain(domain);
        }
        cookie
    }
}
