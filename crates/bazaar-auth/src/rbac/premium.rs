//! Premium tier gate, orthogonal to role.

use bazaar_entity::user::User;

use crate::error::AuthError;

/// Admits premium accounts and admins.
#[derive(Debug, Clone, Copy, Default)]
pub struct PremiumGate;

impl PremiumGate {
    /// Checks a resolved identity, returning `PremiumRequired` on mismatch.
    pub fn check(&self, user: &User) -> Result<(), AuthError> {
        if user.is_premium || user.is_admin() {
            Ok(())
        } else {
            Err(AuthError::PremiumRequired)
        }
    }
}
