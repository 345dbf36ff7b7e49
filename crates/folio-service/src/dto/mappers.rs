//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs, and
//! from update requests to domain patches.

use folio_core::entities::{Article, ArticlePatch, Reaction, User, UserPatch};
use folio_core::value_objects::Attribution;

use super::requests::{UpdateArticleRequest, UpdateUserRequest};
use super::responses::{ArticleResponse, AttributionResponse, LikeResponse, UserResponse};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            avatar: user.avatar.clone(),
            phone: user.phone.clone(),
            verified: user.verified,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<UpdateUserRequest> for UserPatch {
    fn from(request: UpdateUserRequest) -> Self {
        Self {
            name: request.name,
            avatar: request.avatar,
            phone: request.phone,
        }
    }
}

// ============================================================================
// Article Mappers
// ============================================================================

impl From<&Attribution> for AttributionResponse {
    fn from(by: &Attribution) -> Self {
        Self {
            id: by.id.to_string(),
            email: by.email.clone(),
        }
    }
}

impl From<&Article> for ArticleResponse {
    fn from(article: &Article) -> Self {
        Self {
            id: article.id.to_string(),
            title: article.title.clone(),
            content: article.content.clone(),
            thumbnail: article.thumbnail.clone(),
            author: article.author_id.to_string(),
            created_at: article.created_at,
            updated_at: article.updated_at,
            created_by: AttributionResponse::from(&article.created_by),
            updated_by: article.updated_by.as_ref().map(AttributionResponse::from),
        }
    }
}

impl From<UpdateArticleRequest> for ArticlePatch {
    fn from(request: UpdateArticleRequest) -> Self {
        Self {
            title: request.title,
            content: request.content,
            thumbnail: request.thumbnail,
        }
    }
}

// ============================================================================
// Like Mappers
// ============================================================================

impl From<&Reaction> for LikeResponse {
    fn from(reaction: &Reaction) -> Self {
        Self {
            id: reaction.id.to_string(),
            user: reaction.user_id.to_string(),
            article: reaction.article_id.to_string(),
            quantity: reaction.polarity.value(),
            created_at: reaction.created_at,
            updated_at: reaction.updated_at,
        }
    }
}
