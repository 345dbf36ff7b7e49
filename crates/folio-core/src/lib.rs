//! # folio-core
//!
//! Domain layer containing entities, value objects, repository traits, and the
//! list-query engine. This crate has zero dependencies on infrastructure
//! (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod query;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Article, ArticlePatch, Reaction, ReactionState, Transition, User, UserPatch, VoteOutcome,
    ARTICLE_SCHEMA, REACTION_SCHEMA, USER_SCHEMA,
};
pub use error::DomainError;
pub use query::{build_query, BuiltQuery, Document, Envelope, PageRequest, QueryWarning, ScopeRules};
pub use traits::{ArticleRepository, Collection, ReactionRepository, RepoResult, UserRepository};
pub use value_objects::{Actor, Attribution, Polarity, RecordId, RecordIdParseError};
