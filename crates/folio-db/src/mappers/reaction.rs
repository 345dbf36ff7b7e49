//! Reaction entity <-> model mapper

use folio_core::entities::Reaction;
use folio_core::error::DomainError;
use folio_core::query::{to_document, Document};
use folio_core::value_objects::{Polarity, RecordId};
use serde_json::json;

use crate::models::{ReactionModel, ReactionRow};

/// Convert ReactionModel to Reaction entity; a stored quantity outside ±1 is corrupt data
impl TryFrom<ReactionModel> for Reaction {
    type Error = DomainError;

    fn try_from(model: ReactionModel) -> Result<Self, Self::Error> {
        let polarity = Polarity::try_from(model.quantity).map_err(|_| {
            DomainError::DatabaseError(format!(
                "like {} has invalid quantity {}",
                model.id, model.quantity
            ))
        })?;

        Ok(Reaction {
            id: RecordId::from(model.id),
            user_id: RecordId::from(model.user_id),
            article_id: RecordId::from(model.article_id),
            polarity,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl ReactionRow {
    /// Joined article as a document, if the join matched
    pub fn article_document(&self) -> Option<Document> {
        let title = self.article_title.as_ref()?;
        Some(to_document(&json!({
            "id": self.reaction.article_id,
            "title": title,
            "content": self.article_content,
            "thumbnail": self.article_thumbnail,
            "author": self.article_author_id,
            "createdAt": self.article_created_at,
        })))
    }

    /// Joined user as a document, if the join matched
    pub fn user_document(&self) -> Option<Document> {
        let name = self.user_name.as_ref()?;
        Some(to_document(&json!({
            "id": self.reaction.user_id,
            "name": name,
            "email": self.user_email,
            "avatar": self.user_avatar,
        })))
    }
}
