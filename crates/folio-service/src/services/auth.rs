//! Authentication service
//!
//! Handles user registration and login.

use folio_common::auth::{hash_password, verify_credentials};
use folio_common::AppError;
use folio_core::entities::User;
use folio_core::error::DomainError;
use folio_core::value_objects::RecordId;
use tracing::{info, instrument, warn};

use crate::dto::{AuthResponse, DataResponse, LoginRequest, RegisterRequest, UserResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(
        &self,
        request: RegisterRequest,
    ) -> ServiceResult<DataResponse<UserResponse>> {
        let email = request.email.trim().to_lowercase();
        let password_hash = hash_password(&request.password)?;

        let user = User::new(RecordId::new(), request.name, email);
        match self.ctx.user_repo().create(&user, &password_hash).await {
            Ok(()) => {}
            Err(DomainError::EmailAlreadyExists) => {
                return Err(ServiceError::conflict(format!(
                    "Email {} is already registered",
                    user.email
                )));
            }
            Err(e) => return Err(e.into()),
        }

        info!(user_id = %user.id, "User registered successfully");
        Ok(DataResponse::new(
            "User registered successfully",
            UserResponse::from(&user),
        ))
    }

    /// Login with email and password
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        let email = request.email.trim().to_lowercase();

        let user = self
            .ctx
            .user_repo()
            .find_by_email(&email)
            .await?
            .ok_or_else(|| {
                warn!("Login failed: user not found");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user.id, "Login failed: no password hash");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        verify_credentials(&request.password, &password_hash).inspect_err(|_| {
            warn!(user_id = %user.id, "Login failed: invalid password");
        })?;

        let token = self.ctx.jwt_service().issue(&user.actor())?;

        info!(user_id = %user.id, "User logged in successfully");
        Ok(AuthResponse {
            access_token: token.access_token,
            token_type: token.token_type,
            expires_in: token.expires_in,
            user: UserResponse::from(&user),
        })
    }
}
