//! Entity <-> Model mappers
//!
//! Conversions between domain entities (folio-core) and database models (SQLx rows).

mod article;
mod reaction;
mod user;

pub use article::ArticleInsert;
