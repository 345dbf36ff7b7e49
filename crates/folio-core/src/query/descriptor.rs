//! Query descriptor - the structured, store-agnostic form of a list request

use std::collections::{BTreeMap, BTreeSet};

use super::scalar::Scalar;

/// A single condition on one field
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Eq(Scalar),
    Ne(Scalar),
    Gt(Scalar),
    Gte(Scalar),
    Lt(Scalar),
    Lte(Scalar),
    In(Vec<Scalar>),
    NotIn(Vec<Scalar>),
    /// `true`: field present and non-null; `false`: absent or null
    Exists(bool),
}

/// Field → conjunctive predicates
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter(BTreeMap<String, Vec<Predicate>>);

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a predicate, keeping any already present on the field
    pub fn push(&mut self, field: impl Into<String>, predicate: Predicate) {
        self.0.entry(field.into()).or_default().push(predicate);
    }

    /// Replace every predicate on the field with this one
    pub fn set(&mut self, field: impl Into<String>, predicate: Predicate) {
        self.0.insert(field.into(), vec![predicate]);
    }

    pub fn get(&self, field: &str) -> Option<&[Predicate]> {
        self.0.get(field).map(Vec::as_slice)
    }

    #[inline]
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Predicate])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub field: String,
    pub direction: Direction,
}

impl SortKey {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Desc,
        }
    }
}

/// Which top-level fields a result document keeps. `id` is always kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Projection {
    #[default]
    All,
    Include(BTreeSet<String>),
    Exclude(BTreeSet<String>),
}

/// Resolve a reference field into a trimmed view of the related document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Population {
    pub path: String,
    pub select: Vec<String>,
}

impl Population {
    pub fn new(path: impl Into<String>, select: Vec<String>) -> Self {
        Self {
            path: path.into(),
            select,
        }
    }
}

/// Everything a store needs to answer a list request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryDescriptor {
    pub filter: Filter,
    pub sort: Vec<SortKey>,
    pub projection: Projection,
    pub population: Vec<Population>,
}

impl QueryDescriptor {
    pub fn with_filter(filter: Filter) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }
}
