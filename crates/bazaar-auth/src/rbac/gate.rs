//! Role gate: permits an authenticated identity whose role is in a set.

use std::collections::HashSet;

use bazaar_entity::user::{User, UserRole};

use crate::error::AuthError;

/// How an admin is treated by a [`RoleGate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminOverride {
    /// Admin satisfies every role requirement.
    Superset,
    /// Admin passes only when listed.
    Exact,
}

/// A role requirement, evaluated after the auth gate has resolved the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleGate {
    allowed: HashSet<UserRole>,
    admin: AdminOverride,
}

impl RoleGate {
    /// Permits any listed role; admin always passes.
    pub fn any_of(roles: impl IntoIterator<Item = UserRole>) -> Self {
        Self {
            allowed: roles.into_iter().collect(),
            admin: AdminOverride::Superset,
        }
    }

    /// Permits exactly the listed roles, admin included only if listed.
    pub fn exactly(roles: impl IntoIterator<Item = UserRole>) -> Self {
        Self {
            allowed: roles.into_iter().collect(),
            admin: AdminOverride::Exact,
        }
    }

    /// Shorthand for an admin-only route.
    pub fn admin_only() -> Self {
        Self::exactly([UserRole::Admin])
    }

    /// Whether the role is admitted.
    pub fn permits(&self, role: UserRole) -> bool {
        if role.is_admin() && self.admin == AdminOverride::Superset {
            return true;
        }
        self.allowed.contains(&role)
    }

    /// Checks a resolved identity, returning `Forbidden` on mismatch.
    pub fn check(&self, user: &User) -> Result<(), AuthError> {
        if self.permits(user.role) {
            Ok(())
        } else {
            Err(AuthError::Forbidden)
        }
    }
}
