//! Service context - dependency container for services
//!
//! Holds the repositories and other dependencies needed by services.

use std::sync::Arc;

use folio_common::auth::JwtService;
use folio_core::traits::{ArticleRepository, ReactionRepository, UserRepository};
use folio_db::{
    MemoryStore, PgArticleRepository, PgPool, PgReactionRepository, PgUserRepository,
};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// Repositories are trait objects so the same services run against
/// PostgreSQL or the in-memory store.
#[derive(Clone)]
pub struct ServiceContext {
    // Database pool, absent when running on the in-memory store
    pool: Option<PgPool>,

    // Repositories
    user_repo: Arc<dyn UserRepository>,
    article_repo: Arc<dyn ArticleRepository>,
    reaction_repo: Arc<dyn ReactionRepository>,

    // Services
    jwt_service: Arc<JwtService>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        pool: Option<PgPool>,
        user_repo: Arc<dyn UserRepository>,
        article_repo: Arc<dyn ArticleRepository>,
        reaction_repo: Arc<dyn ReactionRepository>,
        jwt_service: Arc<JwtService>,
    ) -> Self {
        Self {
            pool,
            user_repo,
            article_repo,
            reaction_repo,
            jwt_service,
        }
    }

    // === Database Pool ===

    /// Get the PostgreSQL connection pool, if any
    pub fn pool(&self) -> Option<&PgPool> {
        self.pool.as_ref()
    }

    /// Whether the backing store answers. The in-memory store always does.
    pub async fn database_healthy(&self) -> bool {
        match &self.pool {
            Some(pool) => sqlx::query("SELECT 1").execute(pool).await.is_ok(),
            None => true,
        }
    }

    // === Repositories ===

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the article repository
    pub fn article_repo(&self) -> &dyn ArticleRepository {
        self.article_repo.as_ref()
    }

    /// Get the reaction repository
    pub fn reaction_repo(&self) -> &dyn ReactionRepository {
        self.reaction_repo.as_ref()
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &self.pool.as_ref().map(|_| "PgPool"))
            .field("repositories", &"...")
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    user_repo: Option<Arc<dyn UserRepository>>,
    article_repo: Option<Arc<dyn ArticleRepository>>,
    reaction_repo: Option<Arc<dyn ReactionRepository>>,
    jwt_service: Option<Arc<JwtService>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use PostgreSQL repositories backed by `pool`
    pub fn postgres(self, pool: PgPool) -> Self {
        self.user_repo(Arc::new(PgUserRepository::new(pool.clone())))
            .article_repo(Arc::new(PgArticleRepository::new(pool.clone())))
            .reaction_repo(Arc::new(PgReactionRepository::new(pool.clone())))
            .pool(pool)
    }

    /// Use the in-memory repositories of `store`
    pub fn memory(self, store: &MemoryStore) -> Self {
        self.user_repo(Arc::new(store.users()))
            .article_repo(Arc::new(store.articles()))
            .reaction_repo(Arc::new(store.reactions()))
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn article_repo(mut self, repo: Arc<dyn ArticleRepository>) -> Self {
        self.article_repo = Some(repo);
        self
    }

    pub fn reaction_repo(mut self, repo: Arc<dyn ReactionRepository>) -> Self {
        self.reaction_repo = Some(repo);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::MissingDependency` naming the first absent dependency
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.pool,
            self.user_repo
                .ok_or(ServiceError::MissingDependency("user_repo"))?,
            self.article_repo
                .ok_or(ServiceError::MissingDependency("article_repo"))?,
            self.reaction_repo
                .ok_or(ServiceError::MissingDependency("reaction_repo"))?,
            self.jwt_service
                .ok_or(ServiceError::MissingDependency("jwt_service"))?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_requires_jwt_service() {
        let result = ServiceContextBuilder::new()
            .memory(&MemoryStore::new())
            .build();
        assert!(matches!(result, Err(ServiceError::MissingDependency("jwt_service"))));
    }

    #[tokio::test]
    async fn test_memory_context_is_healthy() {
        let ctx = ServiceContextBuilder::new()
            .memory(&MemoryStore::new())
            .jwt_service(Arc::new(JwtService::new("test-secret", 60)))
            .build()
            .unwrap();
        assert!(ctx.pool().is_none());
        assert!(ctx.database_healthy().await);
    }
}
