//! List-query engine
//!
//! Turns a raw query string into a [`QueryDescriptor`] (filter, sort,
//! projection, population), layers the mandatory [`ScopeRules`] on top, and
//! provides the page arithmetic and in-memory document evaluation shared by
//! every store.

mod descriptor;
mod document;
mod page;
mod parser;
mod scalar;
mod schema;
mod scope;

pub use descriptor::{
    Direction, Filter, Population, Predicate, Projection, QueryDescriptor, SortKey,
};
pub use document::{compare_documents, populate, to_document, Document};
pub use page::{Envelope, PageMeta, PageRequest, DEFAULT_PAGE_SIZE};
pub use parser::{parse_query, query_param, BuiltQuery, QueryWarning, RESERVED_KEYS};
pub use scalar::{parse_datetime, FieldKind, Scalar};
pub use schema::{CollectionSchema, FieldSpec, RelationSpec};
pub use scope::ScopeRules;

/// Parse `raw` and apply the scope rules. Pure; never fails.
pub fn build_query(raw: &str, scope: &ScopeRules) -> BuiltQuery {
    let mut built = parse_query(raw, scope.schema);
    scope.apply(&mut built.descriptor.filter);
    built
}
