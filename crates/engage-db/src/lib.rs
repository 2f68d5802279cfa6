//! # engage-db
//!
//! Storage layer implementing the repository traits from `engage-core`.
//!
//! ## Overview
//!
//! Two implementations exist for every trait:
//!
//! - `Pg*Repository` — PostgreSQL via SQLx (runtime queries, no macros)
//! - `Mem*Repository` — `parking_lot::RwLock` over maps, used by tests and
//!   local development
//!
//! The engine itself never sees either concrete type; everything goes
//! through the `engage-core` traits.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use engage_db::pool::{create_pool, DatabaseConfig};
//! use engage_db::repositories::PgNotificationRepository;
//! use engage_core::traits::NotificationRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env();
//!     let pool = create_pool(&config).await?;
//!     let repo = PgNotificationRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use memory::{
    MemCommentRepository, MemFollowRepository, MemLikeRepository, MemNotificationRepository,
    MemPostRepository, MemShareRepository, MemUserRepository,
};
pub use pool::{create_pool, create_pool_from_env, DatabaseConfig, PgPool};
pub use repositories::{
    PgCommentRepository, PgFollowRepository, PgLikeRepository, PgNotificationRepository,
    PgPostRepository, PgShareRepository, PgUserRepository,
};
