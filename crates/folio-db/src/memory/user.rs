//! In-memory implementation of UserRepository

use async_trait::async_trait;
use tracing::instrument;

use folio_core::entities::{User, UserPatch, USER_SCHEMA};
use folio_core::error::DomainError;
use folio_core::query::{CollectionSchema, Document, Filter, QueryDescriptor};
use folio_core::traits::{Collection, RepoResult, UserRepository};
use folio_core::value_objects::RecordId;

use super::{count_matching, MemoryStore, StoredUser};

/// User view over a [`MemoryStore`]
#[derive(Clone)]
pub struct MemoryUserRepository {
    store: MemoryStore,
}

impl MemoryUserRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Collection for MemoryUserRepository {
    fn schema(&self) -> &'static CollectionSchema {
        &USER_SCHEMA
    }

    #[instrument(skip(self))]
    async fn count(&self, filter: &Filter) -> RepoResult<u64> {
        let tables = self.store.tables.read().await;
        Ok(count_matching(
            tables.users.iter().map(|s| s.user.to_document()),
            filter,
        ))
    }

    #[instrument(skip(self))]
    async fn find_documents(
        &self,
        query: &QueryDescriptor,
        skip: u64,
        limit: u64,
    ) -> RepoResult<Vec<Document>> {
        let tables = self.store.tables.read().await;
        let documents = tables.users.iter().map(|s| s.user.to_document());
        Ok(tables.page(documents, query, skip, limit))
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<User>> {
        let tables = self.store.tables.read().await;
        Ok(tables.user(id).filter(|u| !u.is_deleted).cloned())
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let tables = self.store.tables.read().await;
        Ok(tables
            .users
            .iter()
            .map(|s| &s.user)
            .find(|u| u.email == email && !u.is_deleted)
            .cloned())
    }

    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()> {
        let mut tables = self.store.tables.write().await;
        if tables.users.iter().any(|s| s.user.email == user.email) {
            return Err(DomainError::EmailAlreadyExists);
        }
        tables.users.push(StoredUser {
            user: user.clone(),
            password_hash: password_hash.to_string(),
        });
        Ok(())
    }

    async fn update(&self, id: RecordId, patch: &UserPatch) -> RepoResult<Option<User>> {
        let mut tables = self.store.tables.write().await;
        Ok(tables
            .users
            .iter_mut()
            .map(|s| &mut s.user)
            .find(|u| u.id == id && !u.is_deleted)
            .map(|user| {
                user.apply(patch);
                user.clone()
            }))
    }

    async fn get_password_hash(&self, id: RecordId) -> RepoResult<Option<String>> {
        let tables = self.store.tables.read().await;
        Ok(tables
            .users
            .iter()
            .find(|s| s.user.id == id && !s.user.is_deleted)
            .map(|s| s.password_hash.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(email: &str) -> User {
        User::new(RecordId::new(), "Reader".to_string(), email.to_string())
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let repo = MemoryStore::new().users();
        repo.create(&user("dup@example.com"), "hash").await.unwrap();

        let result = repo.create(&user("dup@example.com"), "hash").await;
        assert!(matches!(result, Err(DomainError::EmailAlreadyExists)));
    }

    #[tokio::test]
    async fn test_password_hash_never_in_documents() {
        let repo = MemoryStore::new().users();
        let stored = user("secret@example.com");
        repo.create(&stored, "argon-hash").await.unwrap();

        assert_eq!(
            repo.get_password_hash(stored.id).await.unwrap().as_deref(),
            Some("argon-hash")
        );
        let docs = repo
            .find_documents(&QueryDescriptor::default(), 0, 10)
            .await
            .unwrap();
        assert_eq!(docs.len(), 1);
        assert!(docs[0].values().all(|v| v != "argon-hash"));
    }

    #[tokio::test]
    async fn test_update_applies_patch() {
        let repo = MemoryStore::new().users();
        let stored = user("patch@example.com");
        repo.create(&stored, "hash").await.unwrap();

        let patch = UserPatch {
            phone: Some("555-0100".to_string()),
            ..Default::default()
        };
        let updated = repo.update(stored.id, &patch).await.unwrap().unwrap();
        assert_eq!(updated.phone.as_deref(), Some("555-0100"));
        assert_eq!(updated.name, "Reader");
        assert!(repo.update(RecordId::new(), &patch).await.unwrap().is_none());
    }
}
