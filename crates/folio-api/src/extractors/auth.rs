//! Authentication extractor
//!
//! Resolves the bearer token into the acting user.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use folio_core::Actor;

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated caller extracted from a verified access token
#[derive(Debug, Clone)]
pub struct AuthUser(pub Actor);

impl AuthUser {
    pub fn actor(&self) -> &Actor {
        &self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingAuth)?;

        let app_state = AppState::from_ref(state);

        let actor = app_state
            .jwt_service()
            .validate(bearer.token())
            .and_then(|claims| claims.actor())
            .map_err(|e| {
                tracing::warn!(error = %e, "Rejected access token");
                ApiError::InvalidToken
            })?;

        Ok(AuthUser(actor))
    }
}
