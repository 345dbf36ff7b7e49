//! Article database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for the articles table
#[derive(Debug, Clone, FromRow)]
pub struct ArticleModel {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub thumbnail: Option<String>,
    pub author_id: Uuid,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_by_id: Uuid,
    pub created_by_email: String,
    pub updated_by_id: Option<Uuid>,
    pub updated_by_email: Option<String>,
    pub deleted_by_id: Option<Uuid>,
    pub deleted_by_email: Option<String>,
}

/// Article joined with its author, for list queries
#[derive(Debug, Clone, FromRow)]
pub struct ArticleRow {
    #[sqlx(flatten)]
    pub article: ArticleModel,
    pub author_name: Option<String>,
    pub author_email: Option<String>,
    pub author_avatar: Option<String>,
}
