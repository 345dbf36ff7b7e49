//! In-memory document store
//!
//! Implements the same repository traits as the PostgreSQL layer on top of
//! plain vectors behind a `tokio::sync::RwLock`. Filters, sort orders and
//! population are evaluated with the folio-core document functions, so list
//! queries behave like their SQL translation. Used by the service tests and
//! for running the API without a database.

mod article;
mod reaction;
mod user;

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;

use folio_core::entities::{Article, Reaction, User};
use folio_core::query::{compare_documents, populate, Document, Filter, Population, QueryDescriptor};
use folio_core::value_objects::RecordId;

pub use article::MemoryArticleRepository;
pub use reaction::MemoryReactionRepository;
pub use user::MemoryUserRepository;

/// Shared in-memory tables. Clones share the same data.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn articles(&self) -> MemoryArticleRepository {
        MemoryArticleRepository::new(self.clone())
    }

    pub fn reactions(&self) -> MemoryReactionRepository {
        MemoryReactionRepository::new(self.clone())
    }

    pub fn users(&self) -> MemoryUserRepository {
        MemoryUserRepository::new(self.clone())
    }
}

#[derive(Default)]
struct Tables {
    users: Vec<StoredUser>,
    articles: Vec<Article>,
    reactions: Vec<Reaction>,
}

struct StoredUser {
    user: User,
    password_hash: String,
}

impl Tables {
    fn user(&self, id: RecordId) -> Option<&User> {
        self.users.iter().map(|s| &s.user).find(|u| u.id == id)
    }

    fn article(&self, id: RecordId) -> Option<&Article> {
        self.articles.iter().find(|a| a.id == id)
    }

    /// Look up the document a stored reference points at
    fn resolve(&self, relation: &Population, reference: &Value) -> Option<Document> {
        let id = reference.as_str().and_then(|raw| RecordId::parse(raw).ok())?;
        match relation.path.as_str() {
            "author" | "user" => self.user(id).map(User::to_document),
            "article" => self.article(id).map(Article::to_document),
            _ => None,
        }
    }

    /// Filter, order, slice and populate one page of documents.
    /// Without an explicit sort, documents keep insertion order.
    fn page(
        &self,
        documents: impl Iterator<Item = Document>,
        query: &QueryDescriptor,
        skip: u64,
        limit: u64,
    ) -> Vec<Document> {
        let mut matched: Vec<Document> = documents.filter(|doc| query.filter.matches(doc)).collect();
        if !query.sort.is_empty() {
            matched.sort_by(|a, b| compare_documents(&query.sort, a, b));
        }

        matched
            .into_iter()
            .skip(usize::try_from(skip).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .map(|mut doc| {
                populate(&mut doc, &query.population, |relation, reference| {
                    self.resolve(relation, reference)
                });
                doc
            })
            .collect()
    }
}

fn count_matching(documents: impl Iterator<Item = Document>, filter: &Filter) -> u64 {
    documents.filter(|doc| filter.matches(doc)).count() as u64
}
