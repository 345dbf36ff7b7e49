//! User entity - an account that writes articles and votes on them

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::query::{CollectionSchema, Document, FieldKind, FieldSpec};
use crate::value_objects::{Actor, RecordId};

pub const DEFAULT_AVATAR: &str = "default-avatar.jpg";

/// User entity. The password hash lives only in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    pub avatar: String,
    pub phone: Option<String>,
    pub verified: bool,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with required fields
    pub fn new(id: RecordId, name: String, email: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            email,
            avatar: DEFAULT_AVATAR.to_string(),
            phone: None,
            verified: false,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn actor(&self) -> Actor {
        Actor::new(self.id, self.email.clone())
    }

    pub fn apply(&mut self, patch: &UserPatch) {
        if let Some(name) = &patch.name {
            self.name.clone_from(name);
        }
        if let Some(avatar) = &patch.avatar {
            self.avatar.clone_from(avatar);
        }
        if let Some(phone) = &patch.phone {
            self.phone = Some(phone.clone());
        }
        self.updated_at = Utc::now();
    }

    pub fn to_document(&self) -> Document {
        crate::query::to_document(self)
    }
}

/// Partial profile update
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub name: Option<String>,
    pub avatar: Option<String>,
    pub phone: Option<String>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.avatar.is_none() && self.phone.is_none()
    }
}

pub static USER_SCHEMA: CollectionSchema = CollectionSchema {
    name: "users",
    fields: &[
        FieldSpec::new("id", FieldKind::Id),
        FieldSpec::new("name", FieldKind::Text),
        FieldSpec::new("email", FieldKind::Text),
        FieldSpec::new("avatar", FieldKind::Text),
        FieldSpec::new("phone", FieldKind::Text),
        FieldSpec::new("verified", FieldKind::Boolean),
        FieldSpec::new("isDeleted", FieldKind::Boolean),
        FieldSpec::new("createdAt", FieldKind::DateTime),
        FieldSpec::new("updatedAt", FieldKind::DateTime),
    ],
    relations: &[],
    soft_delete: true,
    default_relation: None,
};
