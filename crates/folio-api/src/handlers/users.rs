//! User handlers
//!
//! Endpoints for profiles and the user directory.

use axum::{
    extract::{Path, State},
    Json,
};
use folio_core::{Document, Envelope};
use folio_service::dto::{DataResponse, UpdateUserRequest, UserResponse};
use folio_service::UserService;

use crate::extractors::{AuthUser, ListQuery, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// List users
///
/// GET /users
pub async fn list_users(
    State(state): State<AppState>,
    _auth: AuthUser,
    query: ListQuery,
) -> ApiResult<Json<Envelope<Document>>> {
    let service = UserService::new(state.service_context());
    let envelope = service.list(&query.raw, query.page).await?;
    Ok(Json(envelope))
}

/// Get current user
///
/// GET /users/@me
pub async fn get_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<DataResponse<UserResponse>>> {
    let service = UserService::new(state.service_context());
    let response = service.get_current(auth.actor().id).await?;
    Ok(Json(response))
}

/// Update current user
///
/// PATCH /users/@me
pub async fn update_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<Json<DataResponse<UserResponse>>> {
    let service = UserService::new(state.service_context());
    let response = service.update_current(auth.actor().id, request).await?;
    Ok(Json(response))
}

/// Get user by ID
///
/// GET /users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<DataResponse<UserResponse>>> {
    let service = UserService::new(state.service_context());
    let response = service.get(&id).await?;
    Ok(Json(response))
}
