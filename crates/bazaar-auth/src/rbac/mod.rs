//! Role-based and tier-based authorization gates.

pub mod gate;
pub mod premium;

pub use gate::RoleGate;
pub use premium::PremiumGate;
