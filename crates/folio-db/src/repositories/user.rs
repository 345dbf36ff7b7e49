//! PostgreSQL implementation of UserRepository

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::instrument;

use folio_core::entities::{User, UserPatch, USER_SCHEMA};
use folio_core::error::DomainError;
use folio_core::query::{CollectionSchema, Document, Filter, QueryDescriptor};
use folio_core::traits::{Collection, RepoResult, UserRepository};
use folio_core::value_objects::RecordId;

use crate::models::UserModel;

use super::error::{map_db_error, map_unique_violation, to_u64};
use super::sql::{push_filter, push_order, push_page};

const USER_COLUMNS: &str =
    "u.id, u.name, u.email, u.avatar, u.phone, u.verified, u.is_deleted, u.created_at, u.updated_at";

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Collection for PgUserRepository {
    fn schema(&self) -> &'static CollectionSchema {
        &USER_SCHEMA
    }

    #[instrument(skip(self))]
    async fn count(&self, filter: &Filter) -> RepoResult<u64> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM users u WHERE TRUE");
        push_filter(&mut builder, &USER_SCHEMA, "u", filter);

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
        let mut builder =
            QueryBuilder::<Postgres>::new(format!("SELECT {USER_COLUMNS} FROM users u WHERE TRUE"));
        push_filter(&mut builder, &USER_SCHEMA, "u", &query.filter);
        push_order(&mut builder, &USER_SCHEMA, "u", &query.sort);
        push_page(&mut builder, skip, limit);

        let rows = builder
            .build_query_as::<UserModel>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(rows
            .into_iter()
            .map(|row| User::from(row).to_document())
            .collect())
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(&format!(
            "SELECT {USER_COLUMNS} FROM users u WHERE u.id = $1 AND u.is_deleted = FALSE"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(&format!(
            "SELECT {USER_COLUMNS} FROM users u WHERE u.email = $1 AND u.is_deleted = FALSE"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self, user, password_hash), fields(user_id = %user.id))]
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO users (
                id, name, email, password_hash, avatar, phone, verified, is_deleted,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, FALSE, $8, $9)
            ",
        )
        .bind(user.id.into_inner())
        .bind(&user.name)
        .bind(&user.email)
        .bind(password_hash)
        .bind(&user.avatar)
        .bind(&user.phone)
        .bind(user.verified)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::EmailAlreadyExists))?;

        Ok(())
    }

    #[instrument(skip(self, patch))]
    async fn update(&self, id: RecordId, patch: &UserPatch) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            UPDATE users
            SET name = COALESCE($2, name),
                avatar = COALESCE($3, avatar),
                phone = COALESCE($4, phone),
                updated_at = NOW()
            WHERE id = $1 AND is_deleted = FALSE
            RETURNING id, name, email, avatar, phone, verified, is_deleted, created_at, updated_at
            ",
        )
        .bind(id.into_inner())
        .bind(patch.name.as_deref())
        .bind(patch.avatar.as_deref())
        .bind(patch.phone.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn get_password_hash(&self, id: RecordId) -> RepoResult<Option<String>> {
        let result = sqlx::query_scalar::<_, String>(
            r"
            SELECT password_hash FROM users WHERE id = $1 AND is_deleted = FALSE
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgUserRepository>();
    }
}
