//! # bazaar-auth
//!
//! Authentication and authorization core for the Bazaar marketplace API.
//!
//! ## Modules
//!
//! - `jwt`: session token claims, issuance, and verification
//! - `cookie`: per-request session cookie policy (same-site vs cross-site)
//! - `guard`: token extraction, the auth gate, and the soft-login check
//! - `rbac`: role gate and premium gate
//! - `password`: Argon2id hashing and password policy
//! - `refresh`: single-flight coalescing of concurrent token refreshes
//! - `service`: signup, login, password change, and refresh flows

pub mod cookie;
pub mod error;
pub mod guard;
pub mod jwt;
pub mod password;
pub mod rbac;
pub mod refresh;
pub mod service;

pub use cookie::{CookieOptions, CookiePolicy, SiteMode};
pub use error::AuthError;
pub use guard::AuthGuard;
pub use jwt::{Claims, IssuedToken, JwtDecoder, JwtEncoder};
pub use password::{PasswordHasher, PasswordValidator};
pub use rbac::{PremiumGate, RoleGate};
pub use refresh::RefreshCoalescer;
pub use service::{AuthService, AuthSession, SignupInput};
