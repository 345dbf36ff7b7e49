//! PostgreSQL implementation of ArticleRepository

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::instrument;

use folio_core::entities::{Article, ArticlePatch, ARTICLE_SCHEMA};
use folio_core::query::{populate, CollectionSchema, Document, Filter, QueryDescriptor};
use folio_core::traits::{ArticleRepository, Collection, RepoResult};
use folio_core::value_objects::{Attribution, RecordId};

use crate::mappers::ArticleInsert;
use crate::models::{ArticleModel, ArticleRow};

use super::error::{map_db_error, to_u64};
use super::sql::{push_filter, push_order, push_page};

const ARTICLE_COLUMNS: &str = "a.id, a.title, a.content, a.thumbnail, a.author_id, a.is_deleted, \
     a.created_at, a.updated_at, a.deleted_at, a.created_by_id, a.created_by_email, \
     a.updated_by_id, a.updated_by_email, a.deleted_by_id, a.deleted_by_email";

/// PostgreSQL implementation of ArticleRepository
#[derive(Clone)]
pub struct PgArticleRepository {
    pool: PgPool,
}

impl PgArticleRepository {
    /// Create a new PgArticleRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Collection for PgArticleRepository {
    fn schema(&self) -> &'static CollectionSchema {
        &ARTICLE_SCHEMA
    }

    #[instrument(skip(self))]
    async fn count(&self, filter: &Filter) -> RepoResult<u64> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM articles a WHERE TRUE");
        push_filter(&mut builder, &ARTICLE_SCHEMA, "a", filter);

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
            "SELECT {ARTICLE_COLUMNS}, u.name AS author_name, u.email AS author_email, \
             u.avatar AS author_avatar \
             FROM articles a LEFT JOIN users u ON u.id = a.author_id WHERE TRUE"
        ));
        push_filter(&mut builder, &ARTICLE_SCHEMA, "a", &query.filter);
        push_order(&mut builder, &ARTICLE_SCHEMA, "a", &query.sort);
        push_page(&mut builder, skip, limit);

        let rows = builder
            .build_query_as::<ArticleRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let author = row.author_document();
                let mut doc = Article::from(row.article).to_document();
                populate(&mut doc, &query.population, |relation, _| {
                    (relation.path == "author").then(|| author.clone()).flatten()
                });
                doc
            })
            .collect())
    }
}

#[async_trait]
impl ArticleRepository for PgArticleRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Article>> {
        let result = sqlx::query_as::<_, ArticleModel>(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles a WHERE a.id = $1 AND a.is_deleted = FALSE"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Article::from))
    }

    #[instrument(skip(self, article), fields(article_id = %article.id))]
    async fn create(&self, article: &Article) -> RepoResult<()> {
        let insert = ArticleInsert::new(article);

        sqlx::query(
            r"
            INSERT INTO articles (
                id, title, content, thumbnail, author_id, is_deleted,
                created_at, updated_at, created_by_id, created_by_email
            )
            VALUES ($1, $2, $3, $4, $5, FALSE, $6, $7, $8, $9)
            ",
        )
        .bind(insert.id)
        .bind(insert.title)
        .bind(insert.content)
        .bind(insert.thumbnail)
        .bind(insert.author_id)
        .bind(article.created_at)
        .bind(article.updated_at)
        .bind(insert.created_by_id)
        .bind(insert.created_by_email)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, patch, by))]
    async fn update_owned(
        &self,
        id: RecordId,
        owner: RecordId,
        patch: &ArticlePatch,
        by: &Attribution,
    ) -> RepoResult<Option<Article>> {
        let result = sqlx::query_as::<_, ArticleModel>(&format!(
            r"
            UPDATE articles AS a
            SET title = COALESCE($3, a.title),
                content = COALESCE($4, a.content),
                thumbnail = COALESCE($5, a.thumbnail),
                updated_by_id = $6,
                updated_by_email = $7,
                updated_at = NOW()
            WHERE a.id = $1 AND a.author_id = $2 AND a.is_deleted = FALSE
            RETURNING {ARTICLE_COLUMNS}
            "
        ))
        .bind(id.into_inner())
        .bind(owner.into_inner())
        .bind(patch.title.as_deref())
        .bind(patch.content.as_deref())
        .bind(patch.thumbnail.as_deref())
        .bind(by.id.into_inner())
        .bind(&by.email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Article::from))
    }

    #[instrument(skip(self, by))]
    async fn soft_delete_owned(
        &self,
        id: RecordId,
        owner: RecordId,
        by: &Attribution,
    ) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE articles
            SET is_deleted = TRUE,
                deleted_at = NOW(),
                deleted_by_id = $3,
                deleted_by_email = $4,
                updated_at = NOW()
            WHERE id = $1 AND author_id = $2 AND is_deleted = FALSE
            ",
        )
        .bind(id.into_inner())
        .bind(owner.into_inner())
        .bind(by.id.into_inner())
        .bind(&by.email)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
