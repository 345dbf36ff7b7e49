//! Article service
//!
//! Handles article CRUD. Writes are restricted to the author; deletes are soft.

use folio_core::entities::{Article, ArticlePatch, ARTICLE_SCHEMA};
use folio_core::error::DomainError;
use folio_core::query::{Document, Envelope, PageRequest, Predicate, Scalar, ScopeRules};
use folio_core::value_objects::{Actor, Attribution, RecordId};
use tracing::{info, instrument};

use crate::dto::{ArticleResponse, CreateArticleRequest, DataResponse, UpdateArticleRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::listing::{find_one, paginate, scoped_query};

/// Article service
pub struct ArticleService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ArticleService<'a> {
    /// Create a new ArticleService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create an article authored by the caller
    #[instrument(skip(self, request), fields(author_id = %actor.id))]
    pub async fn create(
        &self,
        actor: &Actor,
        request: CreateArticleRequest,
    ) -> ServiceResult<DataResponse<ArticleResponse>> {
        let article = Article::new(
            RecordId::new(),
            request.title,
            request.content,
            request.thumbnail,
            actor,
        );

        self.ctx.article_repo().create(&article).await?;

        info!(article_id = %article.id, "Article created");
        Ok(DataResponse::new(
            "Article created successfully",
            ArticleResponse::from(&article),
        ))
    }

    /// Public list of non-deleted articles
    #[instrument(skip(self, raw_query))]
    pub async fn list(
        &self,
        raw_query: &str,
        page: PageRequest,
    ) -> ServiceResult<Envelope<Document>> {
        let descriptor = scoped_query(raw_query, &ScopeRules::for_collection(&ARTICLE_SCHEMA));
        paginate(self.ctx.article_repo(), descriptor, page).await
    }

    /// The caller's own articles
    #[instrument(skip(self, raw_query))]
    pub async fn list_mine(
        &self,
        actor_id: RecordId,
        raw_query: &str,
        page: PageRequest,
    ) -> ServiceResult<Envelope<Document>> {
        let scope = ScopeRules::for_collection(&ARTICLE_SCHEMA).owned_by("author", actor_id);
        let descriptor = scoped_query(raw_query, &scope);
        paginate(self.ctx.article_repo(), descriptor, page).await
    }

    /// One article with its author populated
    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> ServiceResult<DataResponse<Document>> {
        let id = RecordId::parse(id).map_err(DomainError::from)?;

        let mut descriptor = scoped_query("", &ScopeRules::for_collection(&ARTICLE_SCHEMA));
        descriptor.filter.set("id", Predicate::Eq(Scalar::Id(id)));

        let article = find_one(self.ctx.article_repo(), descriptor)
            .await?
            .ok_or(DomainError::ArticleNotFound(id))?;
        Ok(DataResponse::new("Article found", article))
    }

    /// Patch one of the caller's articles
    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        actor: &Actor,
        id: &str,
        request: UpdateArticleRequest,
    ) -> ServiceResult<DataResponse<ArticleResponse>> {
        let id = RecordId::parse(id).map_err(DomainError::from)?;
        let patch = ArticlePatch::from(request);

        let article = self
            .ctx
            .article_repo()
            .update_owned(id, actor.id, &patch, &Attribution::from(actor))
            .await?
            .ok_or(DomainError::ArticleNotFound(id))?;

        info!(article_id = %id, "Article updated");
        Ok(DataResponse::new(
            "Article updated successfully",
            ArticleResponse::from(&article),
        ))
    }

    /// Soft-delete one of the caller's articles
    #[instrument(skip(self))]
    pub async fn remove(&self, actor: &Actor, id: &str) -> ServiceResult<DataResponse<Option<()>>> {
        let id = RecordId::parse(id).map_err(DomainError::from)?;

        let deleted = self
            .ctx
            .article_repo()
            .soft_delete_owned(id, actor.id, &Attribution::from(actor))
            .await?;
        if !deleted {
            return Err(DomainError::ArticleNotFound(id).into());
        }

        info!(article_id = %id, "Article deleted");
        Ok(DataResponse::new("Article deleted successfully", None))
    }
}
