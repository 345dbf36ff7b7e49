//! PostgreSQL implementation of ReactionRepository

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::instrument;

use folio_core::entities::{Reaction, REACTION_SCHEMA};
use folio_core::error::DomainError;
use folio_core::query::{populate, CollectionSchema, Document, Filter, QueryDescriptor};
use folio_core::traits::{Collection, ReactionRepository, RepoResult};
use folio_core::value_objects::{Polarity, RecordId};

use crate::models::{ReactionModel, ReactionRow};

use super::error::{map_db_error, map_unique_violation, to_u64};
use super::sql::{push_filter, push_order, push_page};

const REACTION_COLUMNS: &str = "r.id, r.user_id, r.article_id, r.quantity, r.created_at, r.updated_at";

/// PostgreSQL implementation of ReactionRepository
#[derive(Clone)]
pub struct PgReactionRepository {
    pool: PgPool,
}

impl PgReactionRepository {
    /// Create a new PgReactionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Collection for PgReactionRepository {
    fn schema(&self) -> &'static CollectionSchema {
        &REACTION_SCHEMA
    }

    #[instrument(skip(self))]
    async fn count(&self, filter: &Filter) -> RepoResult<u64> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM likes r WHERE TRUE");
        push_filter(&mut builder, &REACTION_SCHEMA, "r", filter);

        let total = builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(to_u64(total))
    }

    #[instrument(skip(self))]
    async fn find_documents(
        &self,
        query: &QueryDescriptor,
        skip: u64,
        limit: u64,
    ) -> RepoResult<Vec<Document>> {
        let mut builder = QueryBuilder::<Postgres>::new(format!(
            "SELECT {REACTION_COLUMNS}, \
             ar.title AS article_title, ar.content AS article_content, \
             ar.thumbnail AS article_thumbnail, ar.author_id AS article_author_id, \
             ar.created_at AS article_created_at, \
             u.name AS user_name, u.email AS user_email, u.avatar AS user_avatar \
             FROM likes r \
             LEFT JOIN articles ar ON ar.id = r.article_id \
             LEFT JOIN users u ON u.id = r.user_id \
             WHERE TRUE"
        ));
        push_filter(&mut builder, &REACTION_SCHEMA, "r", &query.filter);
        push_order(&mut builder, &REACTION_SCHEMA, "r", &query.sort);
        push_page(&mut builder, skip, limit);

        let rows = builder
            .build_query_as::<ReactionRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        rows.into_iter()
            .map(|row| {
                let article = row.article_document();
                let user = row.user_document();
                let mut doc = Reaction::try_from(row.reaction)?.to_document();
                populate(&mut doc, &query.population, |relation, _| {
                    match relation.path.as_str() {
                        "article" => article.clone(),
                        "user" => user.clone(),
                        _ => None,
                    }
                });
                Ok(doc)
            })
            .collect()
    }
}

#[async_trait]
impl ReactionRepository for PgReactionRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Reaction>> {
        let result = sqlx::query_as::<_, ReactionModel>(&format!(
            "SELECT {REACTION_COLUMNS} FROM likes r WHERE r.id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Reaction::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_pair(
        &self,
        user_id: RecordId,
        article_id: RecordId,
    ) -> RepoResult<Option<Reaction>> {
        let result = sqlx::query_as::<_, ReactionModel>(&format!(
            "SELECT {REACTION_COLUMNS} FROM likes r WHERE r.user_id = $1 AND r.article_id = $2"
        ))
        .bind(user_id.into_inner())
        .bind(article_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Reaction::try_from).transpose()
    }

    #[instrument(skip(self, reaction), fields(reaction_id = %reaction.id))]
    async fn insert(&self, reaction: &Reaction) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO likes (id, user_id, article_id, quantity, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(reaction.id.into_inner())
        .bind(reaction.user_id.into_inner())
        .bind(reaction.article_id.into_inner())
        .bind(reaction.polarity.value())
        .bind(reaction.created_at)
        .bind(reaction.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::ReactionAlreadyExists))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn update_polarity(
        &self,
        id: RecordId,
        polarity: Polarity,
    ) -> RepoResult<Option<Reaction>> {
        let result = sqlx::query_as::<_, ReactionModel>(
            r"
            UPDATE likes
            SET quantity = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, user_id, article_id, quantity, created_at, updated_at
            ",
        )
        .bind(id.into_inner())
        .bind(polarity.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Reaction::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: RecordId) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM likes WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
