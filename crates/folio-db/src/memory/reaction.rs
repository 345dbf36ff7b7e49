//! In-memory implementation of ReactionRepository

use async_trait::async_trait;
use tracing::instrument;

use folio_core::entities::{Reaction, REACTION_SCHEMA};
use folio_core::error::DomainError;
use folio_core::query::{CollectionSchema, Document, Filter, QueryDescriptor};
use folio_core::traits::{Collection, ReactionRepository, RepoResult};
use folio_core::value_objects::{Polarity, RecordId};

use super::{count_matching, MemoryStore};

/// Reaction view over a [`MemoryStore`]
#[derive(Clone)]
pub struct MemoryReactionRepository {
    store: MemoryStore,
}

impl MemoryReactionRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Collection for MemoryReactionRepository {
    fn schema(&self) -> &'static CollectionSchema {
        &REACTION_SCHEMA
    }

    #[instrument(skip(self))]
    async fn count(&self, filter: &Filter) -> RepoResult<u64> {
        let tables = self.store.tables.read().await;
        Ok(count_matching(tables.reactions.iter().map(Reaction::to_document), filter))
    }

    #[instrument(skip(self))]
    async fn find_documents(
        &self,
        query: &QueryDescriptor,
        skip: u64,
        limit: u64,
    ) -> RepoResult<Vec<Document>> {
        let tables = self.store.tables.read().await;
        let documents = tables.reactions.iter().map(Reaction::to_document);
        Ok(tables.page(documents, query, skip, limit))
    }
}

#[async_trait]
impl ReactionRepository for MemoryReactionRepository {
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Reaction>> {
        let tables = self.store.tables.read().await;
        Ok(tables.reactions.iter().find(|r| r.id == id).cloned())
    }

    async fn find_by_pair(
        &self,
        user_id: RecordId,
        article_id: RecordId,
    ) -> RepoResult<Option<Reaction>> {
        let tables = self.store.tables.read().await;
        Ok(tables
            .reactions
            .iter()
            .find(|r| r.user_id == user_id && r.article_id == article_id)
            .cloned())
    }

    async fn insert(&self, reaction: &Reaction) -> RepoResult<()> {
        let mut tables = self.store.tables.write().await;
        if tables
            .reactions
            .iter()
            .any(|r| r.user_id == reaction.user_id && r.article_id == reaction.article_id)
        {
            return Err(DomainError::ReactionAlreadyExists);
        }
        tables.reactions.push(reaction.clone());
        Ok(())
    }

    async fn update_polarity(
        &self,
        id: RecordId,
        polarity: Polarity,
    ) -> RepoResult<Option<Reaction>> {
        let mut tables = self.store.tables.write().await;
        Ok(tables
            .reactions
            .iter_mut()
            .find(|r| r.id == id)
            .map(|reaction| {
                reaction.set_polarity(polarity);
                reaction.clone()
            }))
    }

    async fn delete(&self, id: RecordId) -> RepoResult<bool> {
        let mut tables = self.store.tables.write().await;
        let before = tables.reactions.len();
        tables.reactions.retain(|r| r.id != id);
        Ok(tables.reactions.len() < before)
    }
}
