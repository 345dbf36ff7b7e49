//! Axum extractors for request handling
//!
//! Custom extractors for authentication, validation, and list queries.

mod auth;
mod list_query;
mod validated;

pub use auth::AuthUser;
pub use list_query::ListQuery;
pub use validated::{JsonBody, ValidatedJson};
