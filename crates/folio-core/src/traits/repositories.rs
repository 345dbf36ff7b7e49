//! Repository traits (ports) - define the interface for data access
//!
//! These traits follow the Repository pattern from Domain-Driven Design.
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;

use crate::entities::{Article, ArticlePatch, Reaction, User, UserPatch};
use crate::error::DomainError;
use crate::query::{CollectionSchema, Document, Filter, QueryDescriptor};
use crate::value_objects::{Attribution, Polarity, RecordId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Listable Collection
// ============================================================================

/// Count and page through a collection with a query descriptor
#[async_trait]
pub trait Collection: Send + Sync {
    fn schema(&self) -> &'static CollectionSchema;

    /// Count every record matching the filter
    async fn count(&self, filter: &Filter) -> RepoResult<u64>;

    /// Fetch one page, sorted and populated; projection is applied by the caller
    async fn find_documents(
        &self,
        query: &QueryDescriptor,
        skip: u64,
        limit: u64,
    ) -> RepoResult<Vec<Document>>;
}

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Collection {
    /// Find a non-deleted user by ID
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<User>>;

    /// Find a non-deleted user by email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Create a new user. A taken email is `EmailAlreadyExists`.
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Apply a profile patch, returning the updated user
    async fn update(&self, id: RecordId, patch: &UserPatch) -> RepoResult<Option<User>>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: RecordId) -> RepoResult<Option<String>>;
}

// ============================================================================
// Article Repository
// ============================================================================

#[async_trait]
pub trait ArticleRepository: Collection {
    /// Find a non-deleted article by ID
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Article>>;

    /// Create a new article
    async fn create(&self, article: &Article) -> RepoResult<()>;

    /// Patch an article only if it exists, belongs to `owner` and is not deleted
    async fn update_owned(
        &self,
        id: RecordId,
        owner: RecordId,
        patch: &ArticlePatch,
        by: &Attribution,
    ) -> RepoResult<Option<Article>>;

    /// Soft-delete under the same conditions as `update_owned`
    async fn soft_delete_owned(
        &self,
        id: RecordId,
        owner: RecordId,
        by: &Attribution,
    ) -> RepoResult<bool>;
}

// ============================================================================
// Reaction Repository
// ============================================================================

#[async_trait]
pub trait ReactionRepository: Collection {
    /// Find reaction by ID
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Reaction>>;

    /// Find the unique reaction of a user on an article
    async fn find_by_pair(
        &self,
        user_id: RecordId,
        article_id: RecordId,
    ) -> RepoResult<Option<Reaction>>;

    /// Insert a reaction. A second record for the same pair is `ReactionAlreadyExists`.
    async fn insert(&self, reaction: &Reaction) -> RepoResult<()>;

    /// Set polarity and refresh `updated_at`
    async fn update_polarity(
        &self,
        id: RecordId,
        polarity: Polarity,
    ) -> RepoResult<Option<Reaction>>;

    /// Hard delete
    async fn delete(&self, id: RecordId) -> RepoResult<bool>;
}
