//! In-memory implementation of ArticleRepository

use async_trait::async_trait;
use tracing::instrument;

use folio_core::entities::{Article, ArticlePatch, ARTICLE_SCHEMA};
use folio_core::query::{CollectionSchema, Document, Filter, QueryDescriptor};
use folio_core::traits::{ArticleRepository, Collection, RepoResult};
use folio_core::value_objects::{Actor, Attribution, RecordId};

use super::{count_matching, MemoryStore};

/// Article view over a [`MemoryStore`]
#[derive(Clone)]
pub struct MemoryArticleRepository {
    store: MemoryStore,
}

impl MemoryArticleRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Collection for MemoryArticleRepository {
    fn schema(&self) -> &'static CollectionSchema {
        &ARTICLE_SCHEMA
    }

    #[instrument(skip(self))]
    async fn count(&self, filter: &Filter) -> RepoResult<u64> {
        let tables = self.store.tables.read().await;
        Ok(count_matching(tables.articles.iter().map(Article::to_document), filter))
    }

    #[instrument(skip(self))]
    async fn find_documents(
        &self,
        query: &QueryDescriptor,
        skip: u64,
        limit: u64,
    ) -> RepoResult<Vec<Document>> {
        let tables = self.store.tables.read().await;
        let documents = tables.articles.iter().map(Article::to_document);
        Ok(tables.page(documents, query, skip, limit))
    }
}

#[async_trait]
impl ArticleRepository for MemoryArticleRepository {
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Article>> {
        let tables = self.store.tables.read().await;
        Ok(tables.article(id).filter(|a| !a.is_deleted).cloned())
    }

    async fn create(&self, article: &Article) -> RepoResult<()> {
        self.store.tables.write().await.articles.push(article.clone());
        Ok(())
    }

    async fn update_owned(
        &self,
        id: RecordId,
        owner: RecordId,
        patch: &ArticlePatch,
        by: &Attribution,
    ) -> RepoResult<Option<Article>> {
        let mut tables = self.store.tables.write().await;
        let Some(article) = tables
            .articles
            .iter_mut()
            .find(|a| a.id == id && a.is_owned_by(owner) && !a.is_deleted)
        else {
            return Ok(None);
        };

        article.apply(patch, &Actor::new(by.id, by.email.clone()));
        Ok(Some(article.clone()))
    }

    async fn soft_delete_owned(
        &self,
        id: RecordId,
        owner: RecordId,
        by: &Attribution,
    ) -> RepoResult<bool> {
        let mut tables = self.store.tables.write().await;
        match tables
            .articles
            .iter_mut()
            .find(|a| a.id == id && a.is_owned_by(owner) && !a.is_deleted)
        {
            Some(article) => {
                article.soft_delete(&Actor::new(by.id, by.email.clone()));
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
