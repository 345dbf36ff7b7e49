//! Collection schemas - which fields a list query may touch and how they coerce

use super::descriptor::Population;
use super::scalar::FieldKind;

/// A top-level document field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind }
    }
}

/// A reference field that can be resolved into the related document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationSpec {
    /// Field holding the related record's id (e.g. `author`)
    pub path: &'static str,
    /// Fields of the related document that may be selected
    pub fields: &'static [&'static str],
    /// Fields selected when the caller names none
    pub default_select: &'static [&'static str],
}

impl RelationSpec {
    #[inline]
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains(&name)
    }

    pub fn default_population(&self) -> Population {
        Population::new(
            self.path,
            self.default_select.iter().map(|f| (*f).to_string()).collect(),
        )
    }
}

/// Static description of a listable collection
#[derive(Debug)]
pub struct CollectionSchema {
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
    pub relations: &'static [RelationSpec],
    /// Whether reads default to `isDeleted = false`
    pub soft_delete: bool,
    /// Relation populated when the caller asks for none
    pub default_relation: Option<&'static str>,
}

impl CollectionSchema {
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn relation(&self, path: &str) -> Option<&RelationSpec> {
        self.relations.iter().find(|r| r.path == path)
    }

    pub fn default_population(&self) -> Vec<Population> {
        self.default_relation
            .and_then(|path| self.relation(path))
            .map(|relation| vec![relation.default_population()])
            .unwrap_or_default()
    }
}
