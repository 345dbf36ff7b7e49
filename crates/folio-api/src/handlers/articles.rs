//! Article handlers

use axum::{
    extract::{Path, State},
    Json,
};
use folio_core::{Document, Envelope};
use folio_service::dto::{ArticleResponse, CreateArticleRequest, DataResponse, UpdateArticleRequest};
use folio_service::ArticleService;

use crate::extractors::{AuthUser, ListQuery, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Create an article authored by the caller
///
/// POST /articles
pub async fn create_article(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateArticleRequest>,
) -> ApiResult<Created<Json<DataResponse<ArticleResponse>>>> {
    let service = ArticleService::new(state.service_context());
    let response = service.create(auth.actor(), request).await?;
    Ok(Created(Json(response)))
}

/// List articles
///
/// GET /articles
pub async fn list_articles(
    State(state): State<AppState>,
    _auth: AuthUser,
    query: ListQuery,
) -> ApiResult<Json<Envelope<Document>>> {
    let service = ArticleService::new(state.service_context());
    let envelope = service.list(&query.raw, query.page).await?;
    Ok(Json(envelope))
}

/// List the caller's own articles
///
/// GET /articles/mine
pub async fn list_my_articles(
    State(state): State<AppState>,
    auth: AuthUser,
    query: ListQuery,
) -> ApiResult<Json<Envelope<Document>>> {
    let service = ArticleService::new(state.service_context());
    let envelope = service
        .list_mine(auth.actor().id, &query.raw, query.page)
        .await?;
    Ok(Json(envelope))
}

/// GET /articles/{id}
pub async fn get_article(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<DataResponse<Document>>> {
    let service = ArticleService::new(state.service_context());
    let response = service.get(&id).await?;
    Ok(Json(response))
}

/// PUT /articles/{id}
pub async fn update_article(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateArticleRequest>,
) -> ApiResult<Json<DataResponse<ArticleResponse>>> {
    let service = ArticleService::new(state.service_context());
    let response = service.update(auth.actor(), &id, request).await?;
    Ok(Json(response))
}

/// Soft-delete one of the caller's articles
///
/// DELETE /articles/{id}
pub async fn delete_article(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<DataResponse<Option<()>>>> {
    let service = ArticleService::new(state.service_context());
    let response = service.remove(auth.actor(), &id).await?;
    Ok(Json(response))
}
