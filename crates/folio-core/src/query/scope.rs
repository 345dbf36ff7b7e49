//! Mandatory scope rules layered over whatever the caller asked for

use super::descriptor::{Filter, Predicate};
use super::scalar::Scalar;
use super::schema::CollectionSchema;
use crate::value_objects::RecordId;

/// Predicates a list operation injects regardless of the query string
#[derive(Debug, Clone, Copy)]
pub struct ScopeRules {
    pub schema: &'static CollectionSchema,
    owner: Option<(&'static str, RecordId)>,
}

impl ScopeRules {
    pub const fn for_collection(schema: &'static CollectionSchema) -> Self {
        Self {
            schema,
            owner: None,
        }
    }

    /// Restrict results to records whose `field` equals `owner`
    pub const fn owned_by(mut self, field: &'static str, owner: RecordId) -> Self {
        self.owner = Some((field, owner));
        self
    }

    /// Inject soft-delete and ownership predicates.
    ///
    /// An explicit caller filter on `isDeleted` is kept; any caller value on the
    /// ownership field is replaced.
    pub fn apply(&self, filter: &mut Filter) {
        if self.schema.soft_delete && !filter.contains("isDeleted") {
            filter.set("isDeleted", Predicate::Eq(Scalar::Bool(false)));
        }
        if let Some((field, owner)) = self.owner {
            filter.set(field, Predicate::Eq(Scalar::Id(owner)));
        }
    }
}
