//! Article entity - the subject users write and vote on

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::query::{CollectionSchema, Document, FieldKind, FieldSpec, RelationSpec};
use crate::value_objects::{Actor, Attribution, RecordId};

/// Article entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: RecordId,
    pub title: String,
    pub content: String,
    pub thumbnail: Option<String>,
    #[serde(rename = "author")]
    pub author_id: RecordId,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_by: Attribution,
    pub updated_by: Option<Attribution>,
    pub deleted_by: Option<Attribution>,
}

impl Article {
    /// Create a new Article authored by `actor`
    pub fn new(
        id: RecordId,
        title: String,
        content: String,
        thumbnail: Option<String>,
        actor: &Actor,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            title,
            content,
            thumbnail,
            author_id: actor.id,
            is_deleted: false,
            created_at: now,
            updated_at: now,
            deleted_at: None,
            created_by: Attribution::from(actor),
            updated_by: None,
            deleted_by: None,
        }
    }

    #[inline]
    pub fn is_owned_by(&self, user_id: RecordId) -> bool {
        self.author_id == user_id
    }

    /// Apply a partial update, stamping the editor
    pub fn apply(&mut self, patch: &ArticlePatch, actor: &Actor) {
        if let Some(title) = &patch.title {
            self.title.clone_from(title);
        }
        if let Some(content) = &patch.content {
            self.content.clone_from(content);
        }
        if let Some(thumbnail) = &patch.thumbnail {
            self.thumbnail = Some(thumbnail.clone());
        }
        self.updated_by = Some(Attribution::from(actor));
        self.updated_at = Utc::now();
    }

    /// Mark as deleted; the row stays
    pub fn soft_delete(&mut self, actor: &Actor) {
        let now = Utc::now();
        self.is_deleted = true;
        self.deleted_at = Some(now);
        self.deleted_by = Some(Attribution::from(actor));
        self.updated_at = now;
    }

    pub fn to_document(&self) -> Document {
        crate::query::to_document(self)
    }
}

/// Partial article update
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticlePatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub thumbnail: Option<String>,
}

impl ArticlePatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.thumbnail.is_none()
    }
}

pub static ARTICLE_SCHEMA: CollectionSchema = CollectionSchema {
    name: "articles",
    fields: &[
        FieldSpec::new("id", FieldKind::Id),
        FieldSpec::new("title", FieldKind::Text),
        FieldSpec::new("content", FieldKind::Text),
        FieldSpec::new("thumbnail", FieldKind::Text),
        FieldSpec::new("author", FieldKind::Id),
        FieldSpec::new("isDeleted", FieldKind::Boolean),
        FieldSpec::new("createdAt", FieldKind::DateTime),
        FieldSpec::new("updatedAt", FieldKind::DateTime),
        FieldSpec::new("deletedAt", FieldKind::DateTime),
        FieldSpec::new("createdBy", FieldKind::Embedded),
        FieldSpec::new("updatedBy", FieldKind::Embedded),
        FieldSpec::new("deletedBy", FieldKind::Embedded),
    ],
    relations: &[RelationSpec {
        path: "author",
        fields: &["id", "name", "email", "avatar"],
        default_select: &["id", "name", "email"],
    }],
    soft_delete: true,
    default_relation: Some("author"),
};
