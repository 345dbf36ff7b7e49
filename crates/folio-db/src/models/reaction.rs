//! Like (reaction) database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for the likes table
#[derive(Debug, Clone, FromRow)]
pub struct ReactionModel {
    pub id: Uuid,
    pub user_id: Uuid,
    pub article_id: Uuid,
    pub quantity: i16,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Like joined with its article and user, for list queries
#[derive(Debug, Clone, FromRow)]
pub struct ReactionRow {
    #[sqlx(flatten)]
    pub reaction: ReactionModel,
    pub article_title: Option<String>,
    pub article_content: Option<String>,
    pub article_thumbnail: Option<String>,
    pub article_author_id: Option<Uuid>,
    pub article_created_at: Option<DateTime<Utc>>,
    pub user_name: Option<String>,
    pub user_email: Option<String>,
    pub user_avatar: Option<String>,
}
