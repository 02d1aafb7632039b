//! # bazaar-database
//!
//! PostgreSQL connection management and the credential store: the
//! [`UserStore`] contract, its sqlx-backed repository, and an in-memory
//! implementation used by tests and local tooling.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use memory::MemoryUserStore;
pub use repositories::user::{UserRepository, UserStore};
