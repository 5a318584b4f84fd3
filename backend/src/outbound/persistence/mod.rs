//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repository implementations translate between Diesel rows and domain
//! types and hold no business rules. Row structs (`models.rs`) and table
//! definitions (`schema.rs`) stay private to this module.
//!
//! # Example
//!
//! ```ignore
//! use marketplace::outbound::persistence::{DbPool, PoolConfig, DieselListRepository};
//!
//! let config = PoolConfig::new("postgres://localhost/marketplace");
//! let pool = DbPool::new(config).await?;
//! let repo = DieselListRepository::new(pool);
//! ```

pub(crate) mod diesel_helpers;
mod diesel_list_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_list_repository::DieselListRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
