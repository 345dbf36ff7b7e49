//! User service
//!
//! Handles user profile operations.

use folio_core::entities::{UserPatch, USER_SCHEMA};
use folio_core::error::DomainError;
use folio_core::query::{Document, Envelope, PageRequest, ScopeRules};
use folio_core::value_objects::RecordId;
use tracing::{info, instrument};

use crate::dto::{DataResponse, UpdateUserRequest, UserResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::listing::{paginate, scoped_query};

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Paginated list of active users
    #[instrument(skip(self, raw_query))]
    pub async fn list(
        &self,
        raw_query: &str,
        page: PageRequest,
    ) -> ServiceResult<Envelope<Document>> {
        let descriptor = scoped_query(raw_query, &ScopeRules::for_collection(&USER_SCHEMA));
        paginate(self.ctx.user_repo(), descriptor, page).await
    }

    /// Get user by ID
    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> ServiceResult<DataResponse<UserResponse>> {
        let id = RecordId::parse(id).map_err(DomainError::from)?;
        let user = self
            .ctx
            .user_repo()
            .find_by_id(id)
            .await?
            .ok_or(DomainError::UserNotFound(id))?;

        Ok(DataResponse::new("User found", UserResponse::from(&user)))
    }

    /// Get current authenticated user
    #[instrument(skip(self))]
    pub async fn get_current(&self, user_id: RecordId) -> ServiceResult<DataResponse<UserResponse>> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?;

        Ok(DataResponse::new("User found", UserResponse::from(&user)))
    }

    /// Update current user
    #[instrument(skip(self, request))]
    pub async fn update_current(
        &self,
        user_id: RecordId,
        request: UpdateUserRequest,
    ) -> ServiceResult<DataResponse<UserResponse>> {
        let patch = UserPatch::from(request);

        let user = self
            .ctx
            .user_repo()
            .update(user_id, &patch)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?;

        if !patch.is_empty() {
            info!(user_id = %user_id, "User profile updated");
        }
        Ok(DataResponse::new(
            "User updated successfully",
            UserResponse::from(&user),
        ))
    }
}
