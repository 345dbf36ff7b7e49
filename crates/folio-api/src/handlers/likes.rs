//! Like handlers
//!
//! `POST /likes` is the toggle: it may create, flip or retract the caller's
//! reaction, so a `null` data payload is a successful retraction.

use axum::{
    extract::{Path, State},
    Json,
};
use folio_core::{Document, Envelope};
use folio_service::dto::{DataResponse, LikeResponse, UpdateLikeRequest, VoteRequest};
use folio_service::ReactionService;

use crate::extractors::{AuthUser, JsonBody, ListQuery, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// Apply a vote to an article
///
/// POST /likes
pub async fn vote(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<VoteRequest>,
) -> ApiResult<Json<DataResponse<Option<LikeResponse>>>> {
    let service = ReactionService::new(state.service_context());
    let response = service.create(auth.actor(), request).await?;
    Ok(Json(response))
}

/// List the caller's reactions
///
/// GET /likes
pub async fn list_likes(
    State(state): State<AppState>,
    auth: AuthUser,
    query: ListQuery,
) -> ApiResult<Json<Envelope<Document>>> {
    let service = ReactionService::new(state.service_context());
    let envelope = service
        .list_for_actor(auth.actor().id, &query.raw, query.page)
        .await?;
    Ok(Json(envelope))
}

/// The caller's reaction on one article, if any
///
/// GET /likes/{article_id}
pub async fn get_like_for_article(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(article_id): Path<String>,
) -> ApiResult<Json<DataResponse<Option<Document>>>> {
    let service = ReactionService::new(state.service_context());
    let response = service.find_by_article(auth.actor().id, &article_id).await?;
    Ok(Json(response))
}

/// PATCH /likes/{id}
pub async fn update_like(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<UpdateLikeRequest>,
) -> ApiResult<Json<DataResponse<LikeResponse>>> {
    let service = ReactionService::new(state.service_context());
    let response = service.update(auth.actor().id, &id, request).await?;
    Ok(Json(response))
}

/// DELETE /likes/{id}
pub async fn delete_like(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<DataResponse<Option<LikeResponse>>>> {
    let service = ReactionService::new(state.service_context());
    let response = service.remove(auth.actor().id, &id).await?;
    Ok(Json(response))
}
