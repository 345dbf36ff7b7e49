//! # folio-db
//!
//! Storage layer implementing the folio-core repository traits.
//!
//! ## Overview
//!
//! - Connection pool management and SQL migrations
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - PostgreSQL repositories that translate query descriptors to SQL
//! - An in-memory store implementing the same traits
//!
//! ## Usage
//!
//! ```rust,ignore
//! use folio_db::pool::{create_pool, PoolConfig};
//! use folio_db::repositories::PgArticleRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&PoolConfig::default()).await?;
//!     let articles = PgArticleRepository::new(pool);
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
pub use memory::{MemoryArticleRepository, MemoryReactionRepository, MemoryStore, MemoryUserRepository};
pub use pool::{create_pool, run_migrations, PgPool, PoolConfig};
pub use repositories::{PgArticleRepository, PgReactionRepository, PgUserRepository};
