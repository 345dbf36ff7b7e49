//! Article entity <-> model mapper

use folio_core::entities::Article;
use folio_core::query::{to_document, Document};
use folio_core::value_objects::{Attribution, RecordId};
use serde_json::json;
use uuid::Uuid;

use crate::models::{ArticleModel, ArticleRow};

fn attribution(id: Option<Uuid>, email: Option<String>) -> Option<Attribution> {
    Some(Attribution {
        id: RecordId::from(id?),
        email: email?,
    })
}

/// Convert ArticleModel to Article entity
impl From<ArticleModel> for Article {
    fn from(model: ArticleModel) -> Self {
        Article {
            id: RecordId::from(model.id),
            title: model.title,
            content: model.content,
            thumbnail: model.thumbnail,
            author_id: RecordId::from(model.author_id),
            is_deleted: model.is_deleted,
            created_at: model.created_at,
            updated_at: model.updated_at,
            deleted_at: model.deleted_at,
            created_by: Attribution {
                id: RecordId::from(model.created_by_id),
                email: model.created_by_email,
            },
            updated_by: attribution(model.updated_by_id, model.updated_by_email),
            deleted_by: attribution(model.deleted_by_id, model.deleted_by_email),
        }
    }
}

impl ArticleRow {
    /// Joined author as a document, if the join matched
    pub fn author_document(&self) -> Option<Document> {
        let name = self.author_name.as_ref()?;
        Some(to_document(&json!({
            "id": self.article.author_id,
            "name": name,
            "email": self.author_email,
            "avatar": self.author_avatar,
        })))
    }
}

/// Article values bound on insert
pub struct ArticleInsert<'a> {
    pub id: Uuid,
    pub title: &'a str,
    pub content: &'a str,
    pub thumbnail: Option<&'a str>,
    pub author_id: Uuid,
    pub created_by_id: Uuid,
    pub created_by_email: &'a str,
}

impl<'a> ArticleInsert<'a> {
    pub fn new(article: &'a Article) -> Self {
        Self {
            id: article.id.into_inner(),
            title: &article.title,
            content: &article.content,
            thumbnail: article.thumbnail.as_deref(),
            author_id: article.author_id.into_inner(),
            created_by_id: article.created_by.id.into_inner(),
            created_by_email: &article.created_by.email,
        }
    }
}
