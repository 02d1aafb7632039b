//! Claims carried by every session token.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bazaar_entity::user::UserRole;

/// JWT claims payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user ID.
    pub sub: Uuid,
    /// Role at the time of issuance.
    pub role: UserRole,
    /// Issued-at (seconds since epoch), backdated by the configured skew.
    pub iat: i64,
    /// Expiration (seconds since epoch).
    pub exp: i64,
}

impl Claims {
    /// Returns the user ID from the subject claim.
    pub fn user_id(&self) -> Uuid {
        self.sub
    }
}
