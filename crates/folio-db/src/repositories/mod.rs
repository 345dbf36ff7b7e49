//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in folio-core.
//! List queries are translated from query descriptors in [`sql`].

mod article;
mod error;
mod reaction;
pub mod sql;
mod user;

pub use article::PgArticleRepository;
pub use reaction::PgReactionRepository;
pub use user::PgUserRepository;
